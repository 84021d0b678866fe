//! Attachment pusher
//!
//! Transfers file attachments of a citation record into its archive
//! deposit, one at a time, in the citation gateway's enumeration order.
//! The filter is a case-insensitive filename-extension match; MIME types
//! reported by the citation side are ignored. The first per-file failure
//! aborts the whole push; files uploaded earlier in the sequence are not
//! rolled back, and nothing is retried.

use crate::domain::{ArchiveRecord, CitationRecord};
use crate::error::{Result, ZotzenError};
use crate::gateway::{ArchiveGateway, CitationGateway};

/// What a completed push transferred
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PushReport {
    /// File names uploaded, in transfer order
    pub uploaded: Vec<String>,
    /// Attachments enumerated but skipped by the extension filter
    pub skipped: Vec<String>,
}

/// Push every matching attachment of `record` into `archive`.
pub fn push_attachments<C, A>(
    citations: &C,
    archives: &A,
    record: &CitationRecord,
    archive: &ArchiveRecord,
    extension: &str,
) -> Result<PushReport>
where
    C: CitationGateway,
    A: ArchiveGateway,
{
    if !archive.writable() {
        return Err(ZotzenError::ArchiveNotWritable(archive.doi.clone()));
    }

    let reference = record.item_reference();
    let attachments = citations.fetch_attachments(&reference)?;

    let mut report = PushReport::default();
    for attachment in attachments {
        if !attachment.has_extension(extension) {
            report.skipped.push(attachment.filename);
            continue;
        }
        tracing::info!(file = %attachment.filename, "pushing attachment");
        let bytes = citations.fetch_attachment_bytes(&reference, &attachment.key)?;
        archives.upload_attachment(&archive.record_id, &attachment.filename, &bytes)?;
        report.uploaded.push(attachment.filename);
    }
    Ok(report)
}
