//! CLI Tooling
//!
//! Command-line interface for all reelvault operations. Each subcommand maps
//! to one core operation: search, resolve-and-display, verified add, vault
//! listing, and removal. The interactive mode drives the same operations
//! through the add-session state machine.

use crate::client::{MetadataProvider, OmdbClient};
use crate::config::ReelvaultConfig;
use crate::error::ApiError;
use crate::resolver;
use crate::session::{AddOutcome, AddSession, SessionInput};
use crate::types::{MovieRecord, SearchHit, NOT_AVAILABLE};
use crate::vault::Vault;
use crate::views::{
    format_hits_text, format_identifiers_text, format_record_text, format_vault_text,
    SearchOutput, VaultListing, VaultOutput,
};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

/// Reelvault CLI - movie metadata lookup with a local identifier vault
#[derive(Parser)]
#[command(name = "reelvault")]
#[command(about = "Look up movie metadata and keep a local vault of chosen identifiers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Vault file path (overrides config and platform default)
    #[arg(long)]
    pub vault_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the metadata API by title
    Search {
        /// Title to search for
        #[arg(long)]
        title: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve one record by title and exact year, and show its details
    Details {
        /// Title to search for
        #[arg(long)]
        title: String,
        /// Release year (exact text match against the hit's year field)
        #[arg(long)]
        year: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve one record and add its identifier to the vault
    Add {
        /// Title to search for
        #[arg(long)]
        title: String,
        /// Release year disambiguator
        #[arg(long, conflicts_with = "director", required_unless_present = "director")]
        year: Option<String>,
        /// Director name to verify against (case-insensitive substring)
        #[arg(long)]
        director: Option<String>,
    },
    /// List vault contents
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Print bare identifiers without fetching details
        #[arg(long)]
        ids: bool,
    },
    /// Remove identifiers from the vault
    Remove {
        /// Title to resolve (removes every matching hit's identifier)
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        title: Option<String>,
        /// Narrow the title to one exact year
        #[arg(long, requires = "title")]
        year: Option<String>,
        /// Remove one identifier directly
        #[arg(long)]
        id: Option<String>,
    },
    /// Menu-driven mode: search, add verified movies, view the vault
    Interactive,
}

/// CLI context owning the metadata provider and the vault.
pub struct CliContext {
    provider: Box<dyn MetadataProvider>,
    vault: Vault,
    runtime: tokio::runtime::Runtime,
}

impl CliContext {
    /// Create a CLI context from loaded configuration.
    pub fn new(
        config: &ReelvaultConfig,
        vault_path_override: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let api_key = config.api.resolve_api_key()?;
        let client = OmdbClient::new(
            config.api.base_url.clone(),
            api_key,
            config.api.timeout(),
            config.api.retry_policy(),
        )?;

        let vault_path = match vault_path_override {
            Some(path) => path,
            None => config.storage.resolve_vault_path()?,
        };
        let vault = Vault::open(vault_path)?;

        Self::with_parts(Box::new(client), vault)
    }

    /// Create a context from explicit parts. Tests inject a stub provider
    /// here to exercise command flows without a network.
    pub fn with_parts(provider: Box<dyn MetadataProvider>, vault: Vault) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
        Ok(Self {
            provider,
            vault,
            runtime,
        })
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    fn search_blocking(&self, title: &str) -> Result<Vec<SearchHit>, ApiError> {
        self.runtime.block_on(self.provider.search(title))
    }

    fn details_blocking(&self, identifier: &str) -> Result<MovieRecord, ApiError> {
        self.runtime.block_on(self.provider.details(identifier))
    }

    /// Execute a CLI command, returning its printable output.
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Search { title, format } => self.handle_search(title, format),
            Commands::Details {
                title,
                year,
                format,
            } => self.handle_details(title, year, format),
            Commands::Add {
                title,
                year,
                director,
            } => self.handle_add(title, year.as_deref(), director.as_deref()),
            Commands::List { format, ids } => self.handle_list(format, *ids),
            Commands::Remove { title, year, id } => {
                self.handle_remove(title.as_deref(), year.as_deref(), id.as_deref())
            }
            Commands::Interactive => self.run_interactive(),
        }
    }

    fn handle_search(&self, title: &str, format: &str) -> Result<String, ApiError> {
        let hits = self.search_blocking(title)?;
        if format == "json" {
            let output = SearchOutput {
                total: hits.len(),
                hits: &hits,
            };
            return serde_json::to_string_pretty(&output)
                .map_err(|e| ApiError::InputError(e.to_string()));
        }
        if hits.is_empty() {
            return Ok(format!("No results found for '{}'.", title));
        }
        Ok(format_hits_text(&hits))
    }

    fn handle_details(&self, title: &str, year: &str, format: &str) -> Result<String, ApiError> {
        let hits = self.search_blocking(title)?;
        let hit = resolver::pick_by_year(title, &hits, year)?;
        let record = self.details_blocking(&hit.identifier)?;
        if format == "json" {
            return serde_json::to_string_pretty(&record)
                .map_err(|e| ApiError::InputError(e.to_string()));
        }
        Ok(format_record_text(&record))
    }

    fn handle_add(
        &mut self,
        title: &str,
        year: Option<&str>,
        director: Option<&str>,
    ) -> Result<String, ApiError> {
        let hits = self.search_blocking(title)?;
        if hits.is_empty() {
            return Err(ApiError::NotFound(title.to_string()));
        }

        let record = match (year, director) {
            (Some(year), _) => {
                let hit = resolver::pick_by_year(title, &hits, year)?;
                self.details_blocking(&hit.identifier)?
            }
            (None, Some(director)) => {
                // Flag-driven verification has no selection step: the first
                // hit stands in for the user's choice.
                let record = self.details_blocking(&hits[0].identifier)?;
                resolver::verify_director(&record, director)?;
                record
            }
            (None, None) => {
                return Err(ApiError::InputError(
                    "Either --year or --director is required".to_string(),
                ))
            }
        };

        self.store_record(&record)
    }

    fn store_record(&mut self, record: &MovieRecord) -> Result<String, ApiError> {
        if self.vault.add(&record.identifier)? {
            info!(identifier = %record.identifier, title = %record.title, "added to vault");
            Ok(format!(
                "Added {} ({}, {}) to vault.",
                record.identifier, record.title, record.year
            ))
        } else {
            Ok(format!(
                "{} ({}) is already in the vault.",
                record.identifier, record.title
            ))
        }
    }

    fn handle_list(&self, format: &str, ids_only: bool) -> Result<String, ApiError> {
        let identifiers: Vec<String> = self.vault.list().to_vec();

        if ids_only {
            if format == "json" {
                return serde_json::to_string_pretty(&identifiers)
                    .map_err(|e| ApiError::InputError(e.to_string()));
            }
            return Ok(format_identifiers_text(&identifiers));
        }

        let mut entries = Vec::with_capacity(identifiers.len());
        for identifier in &identifiers {
            match self.details_blocking(identifier) {
                Ok(record) => entries.push(VaultListing::from_record(&record)),
                Err(ApiError::NotFound(_)) => {
                    // A stale identifier must not break the listing.
                    tracing::warn!(identifier, "vault identifier no longer resolves");
                    entries.push(VaultListing {
                        identifier: identifier.clone(),
                        title: NOT_AVAILABLE.to_string(),
                        year: NOT_AVAILABLE.to_string(),
                        director: NOT_AVAILABLE.to_string(),
                        rating: None,
                    });
                }
                Err(other) => return Err(other),
            }
        }

        if format == "json" {
            let output = VaultOutput {
                total: entries.len(),
                entries,
            };
            return serde_json::to_string_pretty(&output)
                .map_err(|e| ApiError::InputError(e.to_string()));
        }
        Ok(format_vault_text(&entries))
    }

    fn handle_remove(
        &mut self,
        title: Option<&str>,
        year: Option<&str>,
        id: Option<&str>,
    ) -> Result<String, ApiError> {
        let targets: HashSet<String> = match (id, title) {
            (Some(id), _) => [id.to_string()].into_iter().collect(),
            (None, Some(title)) => {
                let hits = self.search_blocking(title)?;
                if hits.is_empty() {
                    return Err(ApiError::NotFound(title.to_string()));
                }
                match year {
                    Some(year) => {
                        let hit = resolver::pick_by_year(title, &hits, year)?;
                        [hit.identifier.clone()].into_iter().collect()
                    }
                    None => hits.into_iter().map(|hit| hit.identifier).collect(),
                }
            }
            (None, None) => {
                return Err(ApiError::InputError(
                    "Either --title or --id is required".to_string(),
                ))
            }
        };

        let removed = self.vault.remove(&targets)?;
        if removed == 0 {
            Ok("Nothing to remove: no matching identifier in the vault.".to_string())
        } else {
            info!(removed, "removed identifiers from vault");
            Ok(format!(
                "Removed {} identifier{} from vault.",
                removed,
                if removed == 1 { "" } else { "s" }
            ))
        }
    }

    // Interactive menu loop. Prompts come from dialoguer; the add flow is
    // driven through the AddSession state machine.
    fn run_interactive(&mut self) -> Result<String, ApiError> {
        use dialoguer::Select;

        loop {
            let choice = Select::new()
                .with_prompt("reelvault")
                .items(&["Search movies", "Add verified movie", "View vault", "Quit"])
                .default(0)
                .interact()
                .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))?;

            let output = match choice {
                0 => self.interactive_search(),
                1 => self.interactive_add(),
                2 => self.handle_list("text", false),
                _ => return Ok("Goodbye.".to_string()),
            };

            // Expected resolution outcomes are shown and the menu continues;
            // transport and storage failures abort the loop.
            match output {
                Ok(message) => println!("{}", message),
                Err(
                    err @ (ApiError::NotFound(_)
                    | ApiError::NoExactMatch { .. }
                    | ApiError::VerificationFailed { .. }
                    | ApiError::InputError(_)),
                ) => println!("{}", err),
                Err(err) => return Err(err),
            }
        }
    }

    fn interactive_search(&self) -> Result<String, ApiError> {
        use dialoguer::{Input, Select};

        let title: String = Input::new()
            .with_prompt("Title to search")
            .interact_text()
            .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))?;

        let hits = self.search_blocking(&title)?;
        if hits.is_empty() {
            return Ok(format!("No results found for '{}'.", title));
        }
        println!("{}", format_hits_text(&hits));

        let mut items: Vec<String> = hits
            .iter()
            .map(|hit| format!("{} ({})", hit.title, hit.year))
            .collect();
        items.push("Back".to_string());

        let selection = Select::new()
            .with_prompt("Show details for")
            .items(&items)
            .default(items.len() - 1)
            .interact()
            .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))?;

        if selection == items.len() - 1 {
            return Ok(String::new());
        }
        let record = self.details_blocking(&hits[selection].identifier)?;
        Ok(format_record_text(&record))
    }

    fn interactive_add(&mut self) -> Result<String, ApiError> {
        use dialoguer::{Input, Select};

        let title: String = Input::new()
            .with_prompt("Title to add")
            .interact_text()
            .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))?;
        let director: String = Input::new()
            .with_prompt("Director's name for verification")
            .interact_text()
            .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))?;

        let mut session = AddSession::new();
        session.apply(SessionInput::Search { title, director })?;
        session.apply(SessionInput::Hits(self.search_blocking_from(&session)?))?;

        if !session.is_done() {
            let hits = match &session {
                AddSession::AwaitingSelection { hits, .. } => hits.clone(),
                _ => Vec::new(),
            };
            let items: Vec<String> = hits
                .iter()
                .map(|hit| format!("{} ({}) [{}]", hit.title, hit.year, hit.kind.as_str()))
                .collect();
            let selection = Select::new()
                .with_prompt("Select the correct movie")
                .items(&items)
                .default(0)
                .interact()
                .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))?;
            session.apply(SessionInput::Select(selection))?;

            let identifier = session
                .selected_hit()
                .map(|hit| hit.identifier.clone())
                .ok_or_else(|| ApiError::InputError("No hit selected".to_string()))?;
            let record = self.details_blocking(&identifier)?;
            session.apply(SessionInput::Record(record))?;
        }

        match session.outcome() {
            Some(AddOutcome::Verified(record)) => {
                let record = record.clone();
                self.store_record(&record)
            }
            Some(AddOutcome::Mismatch { actual, .. }) => Ok(format!(
                "Director mismatch. Record says: {}",
                actual
            )),
            Some(AddOutcome::NoResults { title }) => {
                Ok(format!("No results found for '{}'.", title))
            }
            Some(AddOutcome::Cancelled) => Ok("Cancelled.".to_string()),
            None => Err(ApiError::InputError(
                "Add flow ended in an unexpected state".to_string(),
            )),
        }
    }

    fn search_blocking_from(&self, session: &AddSession) -> Result<Vec<SearchHit>, ApiError> {
        match session {
            AddSession::Searching { title, .. } => self.search_blocking(title),
            _ => Err(ApiError::InputError(
                "Session is not ready to search".to_string(),
            )),
        }
    }
}
