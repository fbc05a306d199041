//! Reelvault: Movie Metadata Lookup with a Local Identifier Vault
//!
//! Queries a remote movie metadata API (search by title, fetch by
//! identifier), resolves one canonical record from ambiguous hits using a
//! year or director disambiguator, and persists chosen identifiers to a
//! local deduplicated vault file.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod session;
pub mod tooling;
pub mod types;
pub mod vault;
pub mod views;
