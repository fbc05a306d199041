//! Record resolution.
//!
//! Turns an ambiguous list of search hits plus a disambiguating signal
//! (release year or director name) into exactly one confirmed record, or a
//! clear failure. Resolution is pure: fetching happens in the caller.

use crate::error::ApiError;
use crate::types::{MovieRecord, SearchHit};

/// Select the hit whose year exactly string-matches `year`.
///
/// Ties (multiple hits with the same year) resolve to the first in
/// API-returned order. Comparison is exact text equality, never numeric:
/// a hit with year "2010–2015" does not match "2010". Zero hits terminate
/// immediately with `NotFound`; a non-empty list with no matching year
/// yields `NoExactMatch`.
pub fn pick_by_year<'a>(
    title: &str,
    hits: &'a [SearchHit],
    year: &str,
) -> Result<&'a SearchHit, ApiError> {
    if hits.is_empty() {
        return Err(ApiError::NotFound(title.to_string()));
    }
    hits.iter()
        .find(|hit| hit.year == year)
        .ok_or_else(|| ApiError::NoExactMatch {
            title: title.to_string(),
            year: year.to_string(),
        })
}

/// Verify a fetched record against a director name.
///
/// The supplied name must occur as a case-insensitive substring of the
/// record's director field. A mismatch reports `VerificationFailed` carrying
/// the actual director string so the caller can show what the record says.
pub fn verify_director(record: &MovieRecord, director: &str) -> Result<(), ApiError> {
    let needle = director.trim().to_lowercase();
    if needle.is_empty() {
        return Err(ApiError::InputError(
            "Director name must not be empty".to_string(),
        ));
    }
    if record.director.to_lowercase().contains(&needle) {
        Ok(())
    } else {
        Err(ApiError::VerificationFailed {
            expected: director.trim().to_string(),
            actual: record.director.clone(),
        })
    }
}
