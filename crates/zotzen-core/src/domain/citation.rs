//! Citation record domain model

use serde::{Deserialize, Serialize};

use super::reference::{select_link_for, LibraryKind};

/// A creator of a citation record
///
/// Either structured name parts (`first_name`/`last_name`) or a single
/// free-text `name` is populated, mirroring the reference manager's schema.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Creator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub creator_type: String,
}

impl Creator {
    /// Create a structured creator
    pub fn structured(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            name: None,
            creator_type: "author".to_string(),
        }
    }

    /// Create a free-text creator
    pub fn freeform(name: impl Into<String>) -> Self {
        Self {
            first_name: None,
            last_name: None,
            name: Some(name.into()),
            creator_type: "author".to_string(),
        }
    }

    /// Format as "Last, First" for the archive metadata schema.
    ///
    /// Falls back to the free-text name when no structured parts exist.
    pub fn archive_name(&self) -> Option<String> {
        match (&self.last_name, &self.first_name) {
            (Some(last), Some(first)) => Some(format!("{}, {}", last, first)),
            (Some(last), None) => Some(last.clone()),
            _ => self.name.clone(),
        }
    }
}

/// A citation record fetched from the reference manager
///
/// `extra_text` is the only persistence slot for the archival identifier
/// (pattern `DOI: <value>`); it is mutated only through an explicit update
/// call and never deleted by this system.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CitationRecord {
    pub key: String,
    pub title: String,
    pub abstract_note: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub creators: Vec<Creator>,
    pub extra_text: String,
    pub library_kind: LibraryKind,
    pub library_id: String,
    /// API self link, as reported by the reference manager
    pub api_href: Option<String>,
}

impl CitationRecord {
    /// Canonical deep link identifying this record (derived, not stored)
    pub fn select_link(&self) -> String {
        select_link_for(self.library_kind, &self.library_id, &self.key)
    }

    /// Compact `library:key` identifier
    pub fn compound_key(&self) -> String {
        format!("{}:{}", self.library_id, self.key)
    }

    /// Fully-scoped reference back to this record
    pub fn item_reference(&self) -> super::ItemReference {
        super::ItemReference {
            library_kind: self.library_kind,
            library_id: Some(self.library_id.clone()),
            item_key: self.key.clone(),
        }
    }
}

/// A file attachment child of a citation record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttachmentRef {
    pub key: String,
    pub filename: String,
    pub content_type: Option<String>,
}

impl AttachmentRef {
    /// Case-insensitive filename extension match.
    ///
    /// This is the one consistent attachment filter semantics used by the
    /// pusher; MIME values reported by the citation side are ignored.
    pub fn has_extension(&self, extension: &str) -> bool {
        let suffix = format!(".{}", extension.to_lowercase());
        self.filename.to_lowercase().ends_with(&suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CitationRecord {
        CitationRecord {
            key: "ABCD1234".to_string(),
            title: "A Study".to_string(),
            abstract_note: None,
            date: None,
            url: None,
            creators: vec![],
            extra_text: String::new(),
            library_kind: LibraryKind::User,
            library_id: "12345".to_string(),
            api_href: None,
        }
    }

    #[test]
    fn test_select_link() {
        assert_eq!(
            record().select_link(),
            "zotero://select/users/12345/items/ABCD1234"
        );
    }

    #[test]
    fn test_archive_name_structured() {
        let c = Creator::structured("Jane", "Doe");
        assert_eq!(c.archive_name(), Some("Doe, Jane".to_string()));
    }

    #[test]
    fn test_archive_name_last_only() {
        let c = Creator {
            last_name: Some("Doe".to_string()),
            ..Default::default()
        };
        assert_eq!(c.archive_name(), Some("Doe".to_string()));
    }

    #[test]
    fn test_archive_name_freeform() {
        let c = Creator::freeform("Research Consortium");
        assert_eq!(c.archive_name(), Some("Research Consortium".to_string()));
    }

    #[test]
    fn test_attachment_extension_match() {
        let a = AttachmentRef {
            key: "K".to_string(),
            filename: "Paper.PDF".to_string(),
            content_type: Some("application/pdf".to_string()),
        };
        assert!(a.has_extension("pdf"));
        assert!(!a.has_extension("csv"));
    }
}
