//! Tooling Layer
//!
//! Command-line interface over the metadata client, resolver and vault.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
