//! Item reference representation

use serde::{Deserialize, Serialize};

/// Scheme prefix of a citation-record deep link
pub const SELECT_LINK_PREFIX: &str = "zotero://select";

/// Which kind of library a reference points into
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LibraryKind {
    User,
    Group,
}

impl LibraryKind {
    /// Path segment used in select links (`users` / `groups`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            LibraryKind::User => "users",
            LibraryKind::Group => "groups",
        }
    }
}

/// A resolved reference to a citation record
///
/// A `Group` reference always carries a library id. A `User` reference
/// carries one only when it was parsed from a deep link; `None` means the
/// default user library of the configured credentials.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemReference {
    pub library_kind: LibraryKind,
    pub library_id: Option<String>,
    pub item_key: String,
}

impl ItemReference {
    /// Reference into the default user library
    pub fn user(item_key: impl Into<String>) -> Self {
        Self {
            library_kind: LibraryKind::User,
            library_id: None,
            item_key: item_key.into(),
        }
    }

    /// Reference into a specific group library
    pub fn group(library_id: impl Into<String>, item_key: impl Into<String>) -> Self {
        Self {
            library_kind: LibraryKind::Group,
            library_id: Some(library_id.into()),
            item_key: item_key.into(),
        }
    }

    /// Canonical deep link, when the library id is known
    pub fn select_link(&self) -> Option<String> {
        self.library_id.as_ref().map(|id| {
            select_link_for(self.library_kind, id, &self.item_key)
        })
    }

    /// Compact `library:key` display form
    pub fn display(&self) -> String {
        match &self.library_id {
            Some(id) => format!("{}:{}", id, self.item_key),
            None => self.item_key.clone(),
        }
    }
}

/// Build the canonical select link for a library scope and item key.
pub fn select_link_for(kind: LibraryKind, library_id: &str, item_key: &str) -> String {
    format!(
        "{}/{}/{}/items/{}",
        SELECT_LINK_PREFIX,
        kind.path_segment(),
        library_id,
        item_key
    )
}
