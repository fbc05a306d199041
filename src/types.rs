//! Core types for movie metadata records.
//!
//! Field names follow the remote API's wire format (`Title`, `Year`,
//! `imdbID`, ...) via serde renames; absent detail fields map to the `"N/A"`
//! sentinel rather than being omitted.

use serde::{Deserialize, Serialize};

/// Sentinel used by the remote API for fields it has no data for.
pub const NOT_AVAILABLE: &str = "N/A";

/// Media kind attached to a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    /// The API occasionally returns kinds outside the documented set
    /// (e.g. "game"); they are carried through rather than failing the parse.
    #[serde(other)]
    Other,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Episode => "episode",
            MediaKind::Other => "other",
        }
    }
}

/// A single lightweight search result, before full details are fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "Title")]
    pub title: String,

    /// Four-digit year, possibly with a range suffix ("2010–2015").
    /// Kept as text: year matching is exact string equality, never numeric.
    #[serde(rename = "Year")]
    pub year: String,

    /// Opaque external key for the record.
    #[serde(rename = "imdbID")]
    pub identifier: String,

    #[serde(rename = "Type")]
    pub kind: MediaKind,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Deserialize the rating field, folding the API's "N/A" sentinel into None.
fn rating_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| s != NOT_AVAILABLE))
}

/// Full metadata document for one identifier. Immutable once fetched; the
/// client does not cache these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "imdbID", default = "not_available")]
    pub identifier: String,

    #[serde(rename = "Title", default = "not_available")]
    pub title: String,

    #[serde(rename = "Year", default = "not_available")]
    pub year: String,

    #[serde(rename = "Director", default = "not_available")]
    pub director: String,

    #[serde(rename = "Genre", default = "not_available")]
    pub genre: String,

    #[serde(rename = "Actors", default = "not_available")]
    pub cast: String,

    #[serde(rename = "Plot", default = "not_available")]
    pub plot: String,

    /// Decimal rating as text, None when the API reports "N/A".
    #[serde(rename = "imdbRating", default, deserialize_with = "rating_or_none")]
    pub rating: Option<String>,

    #[serde(rename = "Runtime", default = "not_available")]
    pub runtime: String,

    #[serde(rename = "Language", default = "not_available")]
    pub language: String,

    #[serde(rename = "Country", default = "not_available")]
    pub country: String,
}

impl MovieRecord {
    /// Rating for display, with the sentinel restored for missing values.
    pub fn rating_display(&self) -> &str {
        self.rating.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}
