//! zotzen-core: pairing citation records with archival deposits
//!
//! This library links bibliographic records in a reference manager with
//! deposit records in a research-data repository. It provides pure Rust
//! implementations of:
//! - Reference token resolution (deep link, compound key, bare key)
//! - Archive-DOI extraction from the citation's free-text extra field
//! - The linking-and-synchronization state machine
//! - Citation-to-archive metadata projection
//! - Attachment transfer between the two systems
//!
//! All remote access goes through the two external command-line helpers
//! behind the gateway traits; the relationship between the paired records
//! is re-derived from the two remote sources on every invocation and
//! never cached locally.

pub mod attachments;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod identifiers;
pub mod link;
pub mod prompt;
pub mod sync;

// Re-export main types for convenience
pub use attachments::{push_attachments, PushReport};
pub use domain::{
    ArchiveRecord, ArchiveState, AttachmentRef, CitationRecord, Creator, DepositCreator,
    DepositMetadata, DepositTemplate, ItemReference, LibraryKind,
};
pub use error::{GatewayError, Result, ZotzenError};
pub use gateway::{
    ArchiveGateway, CitationGateway, CliRunner, CommandRunner, Helper, HelperCommand, NewItemSpec,
    ZenodoCli, ZoteroCli,
};
pub use identifiers::{extract_archive_doi, record_id_from_doi, record_id_from_token, resolve};
pub use link::{DoiOutcome, InteractiveOutcome, LinkEngine, LinkOutcome, Linkage};
pub use prompt::{Prompter, StdinPrompter};
pub use sync::{preflight, project, DESCRIPTION_PLACEHOLDER};
