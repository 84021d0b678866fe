//! Domain models for zotzen
//!
//! These are the canonical typed representations of both external systems'
//! records. Payloads are parsed once at the gateway boundary; everything
//! inside the crate operates on these structures.

pub mod archive;
pub mod citation;
pub mod reference;

pub use archive::{
    ArchiveRecord, ArchiveState, DepositCreator, DepositMetadata, DepositTemplate,
    RELATED_IDENTIFIER_RELATION,
};
pub use citation::{AttachmentRef, CitationRecord, Creator};
pub use reference::{ItemReference, LibraryKind};
