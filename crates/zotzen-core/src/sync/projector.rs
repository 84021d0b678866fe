//! Sync projector
//!
//! Maps a citation record onto the archive metadata schema. Callers
//! invoke the projection only once the pair is consistently linked; the
//! linkage gate lives in the link engine, not here.

use crate::domain::{CitationRecord, DepositCreator, DepositMetadata};
use crate::error::{Result, ZotzenError};

/// Substituted when the citation has no usable abstract
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available.";

/// Abstracts shorter than this are replaced by the placeholder
const MIN_ABSTRACT_LEN: usize = 3;

/// Project a citation record into an archive metadata payload.
///
/// Aborts with `MissingTitle` / `MissingCreators` when the record fails
/// a projection precondition; a missing or too-short abstract is not an
/// error here and falls back to the placeholder.
pub fn project(record: &CitationRecord) -> Result<DepositMetadata> {
    if record.title.trim().is_empty() {
        return Err(ZotzenError::MissingTitle(record.compound_key()));
    }
    if record.creators.is_empty() {
        return Err(ZotzenError::MissingCreators(record.compound_key()));
    }

    let mut description = match &record.abstract_note {
        Some(text) if text.len() >= MIN_ABSTRACT_LEN => text.clone(),
        _ => DESCRIPTION_PLACEHOLDER.to_string(),
    };
    if let Some(url) = &record.url {
        description.push_str(&format!("\n\nAlso see: {}", url));
    }

    let creators = record
        .creators
        .iter()
        .filter_map(|c| c.archive_name())
        .map(|name| DepositCreator { name })
        .collect::<Vec<_>>();
    if creators.is_empty() {
        return Err(ZotzenError::MissingCreators(record.compound_key()));
    }

    Ok(DepositMetadata {
        title: record.title.clone(),
        description,
        // Omitted from the payload entirely when the citation has no date.
        publication_date: record.date.clone().filter(|d| !d.trim().is_empty()),
        creators,
    })
}

/// Non-fatal projection preflight.
///
/// Reports every precondition problem at once so an inspection run can
/// surface them without aborting the invocation.
pub fn preflight(record: &CitationRecord) -> Vec<ZotzenError> {
    let mut warnings = Vec::new();
    if record.title.trim().is_empty() {
        warnings.push(ZotzenError::MissingTitle(record.compound_key()));
    }
    if record.creators.is_empty() {
        warnings.push(ZotzenError::MissingCreators(record.compound_key()));
    }
    let abstract_ok = record
        .abstract_note
        .as_ref()
        .map(|a| a.len() >= MIN_ABSTRACT_LEN)
        .unwrap_or(false);
    if !abstract_ok {
        warnings.push(ZotzenError::InsufficientAbstract(record.compound_key()));
    }
    warnings
}
