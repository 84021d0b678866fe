//! Gateways to the two external systems
//!
//! Stateless request/response wrappers around the citation manager's and
//! the research-data repository's command-line helpers. The gateways own
//! all outbound calls and payload (de)serialization; everything behind
//! these traits is exercised synchronously, one request at a time, and
//! never retried.

pub mod runner;
pub mod zenodo;
pub mod zotero;

pub use runner::{CliRunner, CommandRunner, Helper, HelperCommand};
pub use zenodo::ZenodoCli;
pub use zotero::{NewItemSpec, ZoteroCli};

use crate::domain::{
    ArchiveRecord, AttachmentRef, CitationRecord, DepositMetadata, DepositTemplate, ItemReference,
};
use crate::error::GatewayError;

/// Boundary to the reference manager
pub trait CitationGateway {
    fn fetch_citation(&self, reference: &ItemReference) -> Result<CitationRecord, GatewayError>;

    fn create_citation(&self, spec: &zotero::NewItemSpec) -> Result<CitationRecord, GatewayError>;

    /// Replace the record's extra field. The extra field is the only
    /// persistence slot this system writes on the citation side.
    fn update_citation_extra(
        &self,
        reference: &ItemReference,
        extra: &str,
    ) -> Result<(), GatewayError>;

    fn fetch_attachments(
        &self,
        reference: &ItemReference,
    ) -> Result<Vec<AttachmentRef>, GatewayError>;

    fn fetch_attachment_bytes(
        &self,
        reference: &ItemReference,
        attachment_key: &str,
    ) -> Result<Vec<u8>, GatewayError>;
}

/// Boundary to the research-data repository
///
/// All methods address deposits by their numeric record id; callers
/// derive it from the archive DOI.
pub trait ArchiveGateway {
    fn fetch_archive(&self, record_id: &str) -> Result<ArchiveRecord, GatewayError>;

    fn create_archive(&self, template: &DepositTemplate) -> Result<ArchiveRecord, GatewayError>;

    fn update_archive_metadata(
        &self,
        record_id: &str,
        metadata: &DepositMetadata,
    ) -> Result<(), GatewayError>;

    fn set_archive_back_reference(
        &self,
        record_id: &str,
        select_link: &str,
    ) -> Result<(), GatewayError>;

    fn publish_archive(&self, record_id: &str) -> Result<(), GatewayError>;

    fn upload_attachment(
        &self,
        record_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(), GatewayError>;
}
