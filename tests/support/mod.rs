//! Shared test fixtures: an in-memory metadata provider and record builders.

use async_trait::async_trait;
use reelvault::client::MetadataProvider;
use reelvault::error::ApiError;
use reelvault::types::{MediaKind, MovieRecord, SearchHit};
use std::collections::HashMap;

pub fn hit(title: &str, year: &str, identifier: &str) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        year: year.to_string(),
        identifier: identifier.to_string(),
        kind: MediaKind::Movie,
    }
}

pub fn record(identifier: &str, title: &str, year: &str, director: &str) -> MovieRecord {
    serde_json::from_value(serde_json::json!({
        "imdbID": identifier,
        "Title": title,
        "Year": year,
        "Director": director,
        "Genre": "Sci-Fi",
        "Actors": "Ensemble",
        "Plot": "A plot.",
        "imdbRating": "8.0",
        "Runtime": "120 min",
        "Language": "English",
        "Country": "USA",
    }))
    .unwrap()
}

/// In-memory stand-in for the remote metadata API.
#[derive(Default)]
pub struct StubProvider {
    hits: HashMap<String, Vec<SearchHit>>,
    records: HashMap<String, MovieRecord>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, title: &str, hits: Vec<SearchHit>) -> Self {
        self.hits.insert(title.to_string(), hits);
        self
    }

    pub fn with_record(mut self, record: MovieRecord) -> Self {
        self.records.insert(record.identifier.clone(), record);
        self
    }
}

#[async_trait]
impl MetadataProvider for StubProvider {
    async fn search(&self, title: &str) -> Result<Vec<SearchHit>, ApiError> {
        Ok(self.hits.get(title).cloned().unwrap_or_default())
    }

    async fn details(&self, identifier: &str) -> Result<MovieRecord, ApiError> {
        self.records
            .get(identifier)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(identifier.to_string()))
    }
}

/// Provider whose transport always fails, for error-path tests.
pub struct UnreachableProvider;

#[async_trait]
impl MetadataProvider for UnreachableProvider {
    async fn search(&self, _title: &str) -> Result<Vec<SearchHit>, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }

    async fn details(&self, _identifier: &str) -> Result<MovieRecord, ApiError> {
        Err(ApiError::Transport("connection refused".to_string()))
    }
}

/// A provider pre-loaded with the Nolan filmography slice the command tests
/// lean on.
pub fn nolan_provider() -> StubProvider {
    StubProvider::new()
        .with_search(
            "Inception",
            vec![hit("Inception", "2010", "tt1375666")],
        )
        .with_search(
            "Batman",
            vec![
                hit("Batman Begins", "2005", "tt0372784"),
                hit("The Dark Knight", "2008", "tt0468569"),
                hit("Batman: The Series", "2004–2008", "tt0398417"),
            ],
        )
        .with_record(record(
            "tt1375666",
            "Inception",
            "2010",
            "Christopher Nolan",
        ))
        .with_record(record(
            "tt0372784",
            "Batman Begins",
            "2005",
            "Christopher Nolan",
        ))
        .with_record(record(
            "tt0468569",
            "The Dark Knight",
            "2008",
            "Christopher Nolan",
        ))
}
