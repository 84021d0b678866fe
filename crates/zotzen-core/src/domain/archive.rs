//! Archive deposit domain model

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZotzenError};

/// Lifecycle state of an archive deposit
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ArchiveState {
    Draft,
    Published,
}

/// An archival deposit record fetched from the research-data repository
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArchiveRecord {
    pub doi: String,
    pub record_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Formatted creator names, in deposit order
    pub creators: Vec<String>,
    pub publication_date: Option<String>,
    /// Back-reference to the paired citation record's select link
    pub related_identifier: Option<String>,
    pub state: ArchiveState,
    pub deposit_url: Option<String>,
}

impl ArchiveRecord {
    /// Draft deposits accept metadata and file writes; published ones do not.
    pub fn writable(&self) -> bool {
        self.state == ArchiveState::Draft
    }

    /// Whether applying `metadata` would change nothing on this record.
    pub fn metadata_matches(&self, metadata: &DepositMetadata) -> bool {
        self.title.as_deref() == Some(metadata.title.as_str())
            && self.description.as_deref() == Some(metadata.description.as_str())
            && self.publication_date == metadata.publication_date
            && self.creators == metadata.creator_names()
    }
}

/// A creator entry in the archive metadata schema
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DepositCreator {
    pub name: String,
}

/// Metadata payload projected from a citation record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DepositMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    pub creators: Vec<DepositCreator>,
}

impl DepositMetadata {
    pub fn creator_names(&self) -> Vec<String> {
        self.creators.iter().map(|c| c.name.clone()).collect()
    }
}

/// Relation name used for the citation back-reference
pub const RELATED_IDENTIFIER_RELATION: &str = "isAlternateIdentifier";

/// Creation template for new archive deposits
///
/// Loaded from a user-supplied JSON file or built in, and specialized per
/// citation record before the create call: title, description and the
/// related-identifier back-reference are filled in at creation time.
#[derive(Clone, Debug)]
pub struct DepositTemplate {
    value: serde_json::Value,
}

impl Default for DepositTemplate {
    fn default() -> Self {
        Self {
            value: serde_json::json!({
                "upload_type": "publication",
                "publication_type": "report",
                "access_right": "open",
                "license": "cc-by",
                "title": "",
                "description": "",
                "communities": [],
                "related_identifiers": [
                    { "identifier": "", "relation": RELATED_IDENTIFIER_RELATION }
                ],
            }),
        }
    }
}

impl DepositTemplate {
    /// Load a template from a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ZotzenError::Config(format!("cannot read template {:?}: {}", path, e)))?;
        let value = serde_json::from_str(&text)
            .map_err(|e| ZotzenError::Config(format!("invalid template {:?}: {}", path, e)))?;
        Ok(Self { value })
    }

    pub fn set_title(&mut self, title: &str) {
        self.value["title"] = serde_json::Value::String(title.to_string());
    }

    pub fn set_description(&mut self, description: &str) {
        self.value["description"] = serde_json::Value::String(description.to_string());
    }

    /// Point the template's first related identifier at the citation record.
    pub fn set_related_identifier(&mut self, select_link: &str) {
        let entry = serde_json::json!({
            "identifier": select_link,
            "relation": RELATED_IDENTIFIER_RELATION,
        });
        match self.value["related_identifiers"].as_array_mut() {
            Some(list) if !list.is_empty() => list[0] = entry,
            Some(list) => list.push(entry),
            None => self.value["related_identifiers"] = serde_json::Value::Array(vec![entry]),
        }
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.value
    }
}
