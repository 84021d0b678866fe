//! Reference token resolution
//!
//! Parses a user-supplied reference into an [`ItemReference`] from one of
//! three accepted surface forms, first match wins:
//! 1. deep link — `zotero://select/{users|groups}/{id}/items/{key}`
//! 2. compound key — `{groupId}:{itemKey}`
//! 3. bare key — default user library

use crate::domain::{ItemReference, LibraryKind, reference::SELECT_LINK_PREFIX};
use crate::error::{Result, ZotzenError};

/// Resolve a reference token.
///
/// `group` reinterprets a bare key as group-scoped; it does not override
/// the scope encoded in a deep link or compound key.
pub fn resolve(token: &str, group: Option<&str>) -> Result<ItemReference> {
    let token = token.trim();
    if token.contains(SELECT_LINK_PREFIX) {
        parse_deep_link(token)
    } else if token.contains(':') {
        parse_compound_key(token)
    } else if token.is_empty() {
        Err(invalid(token, "empty reference"))
    } else {
        match group {
            Some(id) => Ok(ItemReference::group(id, token)),
            None => Ok(ItemReference::user(token)),
        }
    }
}

fn parse_deep_link(token: &str) -> Result<ItemReference> {
    let segments: Vec<&str> = token.split('/').collect();
    if segments.len() < 7 {
        return Err(invalid(token, "deep link has fewer than 7 path segments"));
    }
    let kind = match segments[3] {
        "users" => LibraryKind::User,
        "groups" => LibraryKind::Group,
        other => return Err(invalid(token, &format!("unknown library scope '{}'", other))),
    };
    let library_id = segments[4];
    let item_key = segments[6];
    if library_id.is_empty() || item_key.is_empty() {
        return Err(invalid(token, "deep link is missing the library id or item key"));
    }
    Ok(ItemReference {
        library_kind: kind,
        library_id: Some(library_id.to_string()),
        item_key: item_key.to_string(),
    })
}

fn parse_compound_key(token: &str) -> Result<ItemReference> {
    let (group_id, item_key) = token
        .split_once(':')
        .expect("compound key contains a colon");
    if group_id.is_empty() || item_key.is_empty() {
        return Err(invalid(token, "compound key needs both a group id and an item key"));
    }
    Ok(ItemReference::group(group_id, item_key))
}

fn invalid(token: &str, reason: &str) -> ZotzenError {
    ZotzenError::InvalidReference {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}
