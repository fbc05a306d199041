//! Format search hits, records, and vault listings as text or JSON.

use crate::types::{MovieRecord, SearchHit};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

/// One row of `list` output: a vault identifier with the display fields
/// fetched for it.
#[derive(Debug, Clone, Serialize)]
pub struct VaultListing {
    pub identifier: String,
    pub title: String,
    pub year: String,
    pub director: String,
    pub rating: Option<String>,
}

impl VaultListing {
    pub fn from_record(record: &MovieRecord) -> Self {
        Self {
            identifier: record.identifier.clone(),
            title: record.title.clone(),
            year: record.year.clone(),
            director: record.director.clone(),
            rating: record.rating.clone(),
        }
    }
}

/// JSON contract for `search --format json`.
#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    pub total: usize,
    pub hits: &'a [SearchHit],
}

/// JSON contract for `list --format json`.
#[derive(Debug, Serialize)]
pub struct VaultOutput {
    pub total: usize,
    pub entries: Vec<VaultListing>,
}

/// Format search hits as a numbered table.
pub fn format_hits_text(hits: &[SearchHit]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Title", "Year", "Kind", "ID"]);
    for (index, hit) in hits.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            hit.title.clone(),
            hit.year.clone(),
            hit.kind.as_str().to_string(),
            hit.identifier.clone(),
        ]);
    }
    format!("{}", table)
}

/// Format a full record as a labeled field block.
pub fn format_record_text(record: &MovieRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("Title     : {}\n", record.title));
    out.push_str(&format!("Year      : {}\n", record.year));
    out.push_str(&format!("Director  : {}\n", record.director));
    out.push_str(&format!("Genre     : {}\n", record.genre));
    out.push_str(&format!("Cast      : {}\n", record.cast));
    out.push_str(&format!("Plot      : {}\n", record.plot));
    out.push_str(&format!("Rating    : {}\n", record.rating_display()));
    out.push_str(&format!("Runtime   : {}\n", record.runtime));
    out.push_str(&format!("Language  : {}\n", record.language));
    out.push_str(&format!("Country   : {}\n", record.country));
    out.push_str(&format!("ID        : {}", record.identifier));
    out
}

/// Format vault listings as a table.
pub fn format_vault_text(entries: &[VaultListing]) -> String {
    if entries.is_empty() {
        return "Vault is empty.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Title", "Year", "Director", "Rating", "ID"]);
    for (index, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            entry.title.clone(),
            entry.year.clone(),
            entry.director.clone(),
            entry.rating.clone().unwrap_or_else(|| "N/A".to_string()),
            entry.identifier.clone(),
        ]);
    }
    format!("{}", table)
}

/// Format bare identifiers, one per line, for `list --ids`.
pub fn format_identifiers_text(identifiers: &[String]) -> String {
    if identifiers.is_empty() {
        return "Vault is empty.".to_string();
    }
    identifiers.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaKind;

    fn hit(title: &str, year: &str, identifier: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            year: year.to_string(),
            identifier: identifier.to_string(),
            kind: MediaKind::Movie,
        }
    }

    #[test]
    fn hits_table_numbers_rows_from_one() {
        let out = format_hits_text(&[hit("Inception", "2010", "tt1375666")]);
        assert!(out.contains("Inception"));
        assert!(out.contains("2010"));
        assert!(out.contains("tt1375666"));
        assert!(out.contains('1'));
    }

    #[test]
    fn record_text_restores_rating_sentinel() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"imdbID":"tt1","Title":"X","Year":"1999"}"#).unwrap();
        let out = format_record_text(&record);
        assert!(out.contains("Rating    : N/A"));
        assert!(out.contains("ID        : tt1"));
    }

    #[test]
    fn empty_vault_has_a_friendly_message() {
        assert_eq!(format_vault_text(&[]), "Vault is empty.");
        assert_eq!(format_identifiers_text(&[]), "Vault is empty.");
    }

    #[test]
    fn search_output_serializes_with_totals() {
        let hits = vec![hit("Inception", "2010", "tt1375666")];
        let output = SearchOutput {
            total: hits.len(),
            hits: &hits,
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&output).unwrap()).unwrap();
        assert_eq!(json.get("total").and_then(|v| v.as_u64()), Some(1));
        assert!(json.get("hits").and_then(|v| v.as_array()).is_some());
    }
}
