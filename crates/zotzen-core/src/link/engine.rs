//! Link state engine
//!
//! Computes the relationship between a citation record and its archive
//! deposit fresh on every invocation, and performs the transitions of the
//! linking state machine. The relationship is stored asymmetrically: the
//! citation side carries the DOI in its extra field, the archive side
//! carries the citation's select link as its related identifier; both
//! must match for the pair to count as consistently linked.

use crate::domain::{ArchiveRecord, CitationRecord, DepositTemplate};
use crate::error::{Result, ZotzenError};
use crate::gateway::{ArchiveGateway, CitationGateway};
use crate::identifiers::{
    extra_with_doi, extract_archive_doi, record_id_from_doi, record_id_from_token,
};
use crate::prompt::Prompter;

/// Computed linkage state, derived per invocation, never persisted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Linkage {
    /// No archive DOI on the citation side
    Unlinked,
    /// DOI present and the archive points back at this citation record
    LinkedConsistent { doi: String },
    /// DOI present but the archive's back-reference differs or is absent
    LinkedInconsistent { doi: String, found: Option<String> },
}

/// Result of the obtain-or-create transition
#[derive(Debug)]
pub enum DoiOutcome {
    /// Citation already carried a DOI; nothing was mutated
    Existing { doi: String },
    /// A new deposit was created and the DOI written to the citation
    Created { archive: ArchiveRecord },
}

/// Result of the explicit-link transition
#[derive(Debug)]
pub enum LinkOutcome {
    /// Citation already carried a DOI; the candidate was ignored
    AlreadyLinked { doi: String },
    /// Bidirectional link written
    Linked { archive: ArchiveRecord },
}

/// Result of the interactive repair path
#[derive(Debug)]
pub enum InteractiveOutcome {
    /// No DOI on the citation side; nothing to repair
    NothingToDo,
    /// Back-reference already matches
    AlreadyConsistent { doi: String },
    /// Operator confirmed; back-reference written
    Repaired { doi: String },
    /// Operator declined; nothing was mutated
    Declined { doi: String },
}

/// The state machine over the two gateways and the operator prompt
pub struct LinkEngine<'a, C, A, P> {
    citations: &'a C,
    archives: &'a A,
    prompter: &'a P,
}

impl<'a, C, A, P> LinkEngine<'a, C, A, P>
where
    C: CitationGateway,
    A: ArchiveGateway,
    P: Prompter,
{
    pub fn new(citations: &'a C, archives: &'a A, prompter: &'a P) -> Self {
        Self {
            citations,
            archives,
            prompter,
        }
    }

    /// Derive the linkage state, fetching the archive record when the
    /// citation carries a DOI.
    pub fn resolve_linkage(
        &self,
        record: &CitationRecord,
    ) -> Result<(Linkage, Option<ArchiveRecord>)> {
        let doi = match extract_archive_doi(&record.extra_text) {
            Some(doi) => doi,
            None => return Ok((Linkage::Unlinked, None)),
        };
        let record_id = record_id_from_doi(&doi)
            .ok_or_else(|| ZotzenError::NotLinked(record.compound_key()))?;
        let archive = self.archives.fetch_archive(&record_id)?;
        let linkage = if archive.related_identifier.as_deref() == Some(record.select_link().as_str())
        {
            Linkage::LinkedConsistent { doi }
        } else {
            Linkage::LinkedInconsistent {
                doi,
                found: archive.related_identifier.clone(),
            }
        };
        Ok((linkage, Some(archive)))
    }

    /// Obtain-or-create transition.
    ///
    /// With a DOI already on the citation the call reports it and mutates
    /// nothing. Otherwise a new deposit is created from the template and
    /// the DOI is written into the citation's extra field.
    pub fn ensure_doi(
        &self,
        record: &CitationRecord,
        template: &DepositTemplate,
    ) -> Result<DoiOutcome> {
        if let Some(doi) = extract_archive_doi(&record.extra_text) {
            return Ok(DoiOutcome::Existing { doi });
        }

        let mut template = template.clone();
        template.set_title(&record.title);
        template.set_description(&record.title);
        template.set_related_identifier(&record.select_link());

        let archive = self.archives.create_archive(&template)?;
        let extra = extra_with_doi(&record.extra_text, &archive.doi);
        self.citations
            .update_citation_extra(&record.item_reference(), &extra)?;
        Ok(DoiOutcome::Created { archive })
    }

    /// Explicit-link transition against an operator-supplied candidate.
    ///
    /// An existing DOI always wins: the candidate is treated as
    /// informational only and never overwrites. Otherwise the candidate
    /// deposit must already point back at this citation record; on a
    /// match both sides of the link are written.
    pub fn link_explicit(&self, record: &CitationRecord, candidate: &str) -> Result<LinkOutcome> {
        if let Some(doi) = extract_archive_doi(&record.extra_text) {
            return Ok(LinkOutcome::AlreadyLinked { doi });
        }

        let record_id =
            record_id_from_token(candidate).ok_or_else(|| ZotzenError::InvalidReference {
                token: candidate.to_string(),
                reason: "expected an archive DOI or numeric record id".to_string(),
            })?;
        let archive = self.archives.fetch_archive(&record_id)?;
        let expected = record.select_link();

        if archive.related_identifier.as_deref() != Some(expected.as_str()) {
            return Err(ZotzenError::LinkMismatch {
                doi: archive.doi,
                expected,
                found: archive
                    .related_identifier
                    .unwrap_or_else(|| "(absent)".to_string()),
            });
        }

        let extra = extra_with_doi(&record.extra_text, &archive.doi);
        self.citations
            .update_citation_extra(&record.item_reference(), &extra)?;
        self.archives
            .set_archive_back_reference(&archive.record_id, &expected)?;
        Ok(LinkOutcome::Linked { archive })
    }

    /// Gate for sync, push and publish: the pair must be consistently
    /// linked, or the requested operation aborts without mutation.
    pub fn require_linked(&self, record: &CitationRecord) -> Result<ArchiveRecord> {
        let doi = extract_archive_doi(&record.extra_text)
            .ok_or_else(|| ZotzenError::NotLinked(record.compound_key()))?;
        let record_id = record_id_from_doi(&doi)
            .ok_or_else(|| ZotzenError::NotLinked(record.compound_key()))?;
        let archive = self.archives.fetch_archive(&record_id)?;
        let expected = record.select_link();
        match archive.related_identifier.as_deref() {
            Some(found) if found == expected => Ok(archive),
            found => Err(ZotzenError::LinkMismatch {
                doi,
                expected,
                found: found.map(String::from).unwrap_or_else(|| "(absent)".to_string()),
            }),
        }
    }

    /// Interactive repair path: with a DOI present but the back-reference
    /// inconsistent, ask the operator (default yes) before writing the
    /// archive's back-reference.
    pub fn interactive_link(&self, record: &CitationRecord) -> Result<InteractiveOutcome> {
        let (linkage, archive) = self.resolve_linkage(record)?;
        match linkage {
            Linkage::Unlinked => Ok(InteractiveOutcome::NothingToDo),
            Linkage::LinkedConsistent { doi } => Ok(InteractiveOutcome::AlreadyConsistent { doi }),
            Linkage::LinkedInconsistent { doi, .. } => {
                let archive = archive.expect("inconsistent linkage carries an archive record");
                let question = format!(
                    "Archive record {} does not point back at {}. Link it now?",
                    doi,
                    record.compound_key()
                );
                if self.prompter.confirm(&question, true) {
                    self.archives
                        .set_archive_back_reference(&archive.record_id, &record.select_link())?;
                    Ok(InteractiveOutcome::Repaired { doi })
                } else {
                    Ok(InteractiveOutcome::Declined { doi })
                }
            }
        }
    }
}
