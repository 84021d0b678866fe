//! Identifier extraction and reference resolution
//!
//! Provides:
//! - Archive-DOI extraction from the citation record's free-text extra field
//! - Parsing of the three accepted reference surface forms (deep link,
//!   compound key, bare key) into an [`ItemReference`](crate::domain::ItemReference)

pub mod extract;
pub mod resolver;

pub use extract::{
    extra_with_doi, extract_archive_doi, extract_archive_dois, record_id_from_doi,
    record_id_from_token,
};
pub use resolver::resolve;
