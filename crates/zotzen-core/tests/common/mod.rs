//! Shared fixtures and gateway mocks for integration tests

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use zotzen_core::domain::{
    ArchiveRecord, ArchiveState, AttachmentRef, CitationRecord, Creator, DepositMetadata,
    DepositTemplate, ItemReference, LibraryKind,
};
use zotzen_core::error::GatewayError;
use zotzen_core::gateway::{ArchiveGateway, CitationGateway, NewItemSpec};
use zotzen_core::prompt::Prompter;

pub fn citation_record(extra: &str) -> CitationRecord {
    CitationRecord {
        key: "ABCD1234".to_string(),
        title: "A Study".to_string(),
        abstract_note: Some("A sufficiently long abstract".to_string()),
        date: Some("2020-06-01".to_string()),
        url: None,
        creators: vec![Creator::structured("Jane", "Doe")],
        extra_text: extra.to_string(),
        library_kind: LibraryKind::User,
        library_id: "12345".to_string(),
        api_href: None,
    }
}

pub fn archive_record(record_id: &str, related: Option<&str>) -> ArchiveRecord {
    ArchiveRecord {
        doi: format!("10.5281/zenodo.{}", record_id),
        record_id: record_id.to_string(),
        title: Some("A Study".to_string()),
        description: Some("A sufficiently long abstract".to_string()),
        creators: vec!["Doe, Jane".to_string()],
        publication_date: Some("2020-06-01".to_string()),
        related_identifier: related.map(String::from),
        state: ArchiveState::Draft,
        deposit_url: Some(format!("https://zenodo.org/deposit/{}", record_id)),
    }
}

/// Citation gateway mock recording every mutation call
#[derive(Default)]
pub struct MockCitationGateway {
    pub record: Option<CitationRecord>,
    pub attachments: Vec<AttachmentRef>,
    pub attachment_bytes: HashMap<String, Vec<u8>>,
    pub calls: RefCell<Vec<String>>,
}

impl MockCitationGateway {
    pub fn with_record(record: CitationRecord) -> Self {
        Self {
            record: Some(record),
            ..Default::default()
        }
    }

    pub fn mutation_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with("update"))
            .count()
    }
}

impl CitationGateway for MockCitationGateway {
    fn fetch_citation(&self, _reference: &ItemReference) -> Result<CitationRecord, GatewayError> {
        self.calls.borrow_mut().push("fetch_citation".to_string());
        self.record.clone().ok_or(GatewayError::CommandFailed {
            helper: "zotero-cli",
            message: "no such item".to_string(),
        })
    }

    fn create_citation(&self, _spec: &NewItemSpec) -> Result<CitationRecord, GatewayError> {
        self.calls.borrow_mut().push("create_citation".to_string());
        self.record.clone().ok_or(GatewayError::CommandFailed {
            helper: "zotero-cli",
            message: "create failed".to_string(),
        })
    }

    fn update_citation_extra(
        &self,
        _reference: &ItemReference,
        extra: &str,
    ) -> Result<(), GatewayError> {
        self.calls
            .borrow_mut()
            .push(format!("update_extra:{}", extra));
        Ok(())
    }

    fn fetch_attachments(
        &self,
        _reference: &ItemReference,
    ) -> Result<Vec<AttachmentRef>, GatewayError> {
        self.calls.borrow_mut().push("fetch_attachments".to_string());
        Ok(self.attachments.clone())
    }

    fn fetch_attachment_bytes(
        &self,
        _reference: &ItemReference,
        attachment_key: &str,
    ) -> Result<Vec<u8>, GatewayError> {
        self.calls
            .borrow_mut()
            .push(format!("fetch_bytes:{}", attachment_key));
        self.attachment_bytes
            .get(attachment_key)
            .cloned()
            .ok_or(GatewayError::CommandFailed {
                helper: "zotero-cli",
                message: format!("attachment {} unavailable", attachment_key),
            })
    }
}

/// Archive gateway mock recording every mutation call
#[derive(Default)]
pub struct MockArchiveGateway {
    pub records: HashMap<String, ArchiveRecord>,
    pub created: Option<ArchiveRecord>,
    /// File names whose upload should fail
    pub failing_uploads: Vec<String>,
    pub calls: RefCell<Vec<String>>,
}

impl MockArchiveGateway {
    pub fn with_record(record: ArchiveRecord) -> Self {
        let mut records = HashMap::new();
        records.insert(record.record_id.clone(), record);
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn mutation_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !c.starts_with("fetch"))
            .count()
    }
}

impl ArchiveGateway for MockArchiveGateway {
    fn fetch_archive(&self, record_id: &str) -> Result<ArchiveRecord, GatewayError> {
        self.calls
            .borrow_mut()
            .push(format!("fetch_archive:{}", record_id));
        self.records
            .get(record_id)
            .cloned()
            .ok_or(GatewayError::CommandFailed {
                helper: "zenodo-cli",
                message: format!("no deposit {}", record_id),
            })
    }

    fn create_archive(&self, template: &DepositTemplate) -> Result<ArchiveRecord, GatewayError> {
        self.calls.borrow_mut().push(format!(
            "create_archive:{}",
            template.as_json()["related_identifiers"][0]["identifier"]
                .as_str()
                .unwrap_or_default()
        ));
        self.created.clone().ok_or(GatewayError::CommandFailed {
            helper: "zenodo-cli",
            message: "create failed".to_string(),
        })
    }

    fn update_archive_metadata(
        &self,
        record_id: &str,
        _metadata: &DepositMetadata,
    ) -> Result<(), GatewayError> {
        self.calls
            .borrow_mut()
            .push(format!("update_metadata:{}", record_id));
        Ok(())
    }

    fn set_archive_back_reference(
        &self,
        record_id: &str,
        select_link: &str,
    ) -> Result<(), GatewayError> {
        self.calls
            .borrow_mut()
            .push(format!("set_back_reference:{}:{}", record_id, select_link));
        Ok(())
    }

    fn publish_archive(&self, record_id: &str) -> Result<(), GatewayError> {
        self.calls
            .borrow_mut()
            .push(format!("publish:{}", record_id));
        Ok(())
    }

    fn upload_attachment(
        &self,
        record_id: &str,
        file_name: &str,
        _bytes: &[u8],
    ) -> Result<(), GatewayError> {
        if self.failing_uploads.iter().any(|f| f == file_name) {
            return Err(GatewayError::CommandFailed {
                helper: "zenodo-cli",
                message: format!("upload of {} rejected", file_name),
            });
        }
        self.calls
            .borrow_mut()
            .push(format!("upload:{}:{}", record_id, file_name));
        Ok(())
    }
}

/// Scripted prompter: pops answers front-to-back, empty applies default
pub struct ScriptedPrompter {
    answers: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _question: &str, default_yes: bool) -> bool {
        let answer = self.input("");
        match answer.trim().to_lowercase().as_str() {
            "" => default_yes,
            "y" | "yes" => true,
            _ => false,
        }
    }

    fn input(&self, _prompt: &str) -> String {
        let mut answers = self.answers.borrow_mut();
        if answers.is_empty() {
            String::new()
        } else {
            answers.remove(0)
        }
    }
}
