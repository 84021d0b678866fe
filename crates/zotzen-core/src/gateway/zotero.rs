//! Citation-side gateway backed by zotero-cli
//!
//! Exchanges structured JSON records keyed by
//! `{data: {...}, key, library: {id}, links: {self: {href}}}`.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use super::runner::{CommandRunner, Helper};
use super::CitationGateway;
use crate::domain::{AttachmentRef, CitationRecord, Creator, ItemReference, LibraryKind};
use crate::error::GatewayError;

const HELPER: &str = "zotero-cli";

/// How to create a new citation record
#[derive(Clone, Debug)]
pub enum NewItemSpec {
    /// Instantiate the helper's report template with a title
    Template { title: String },
    /// Submit a user-supplied item JSON file verbatim
    JsonFile(PathBuf),
}

#[derive(Debug, Deserialize)]
struct ItemEnvelope {
    data: ItemData,
    key: Option<String>,
    library: Option<LibraryInfo>,
    links: Option<Links>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ItemData {
    key: Option<String>,
    item_type: Option<String>,
    title: Option<String>,
    abstract_note: Option<String>,
    date: Option<String>,
    url: Option<String>,
    extra: Option<String>,
    creators: Vec<Creator>,
    filename: Option<String>,
    content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LibraryInfo {
    id: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Links {
    #[serde(rename = "self")]
    self_link: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    successful: HashMap<String, ItemEnvelope>,
}

/// Citation gateway over a [`CommandRunner`]
pub struct ZoteroCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> ZoteroCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn scope_args(reference: &ItemReference) -> Vec<String> {
        match (&reference.library_kind, &reference.library_id) {
            (LibraryKind::Group, Some(id)) => vec!["--group-id".to_string(), id.clone()],
            (LibraryKind::User, Some(id)) => vec!["--user-id".to_string(), id.clone()],
            // Default user library comes from the helper's own credentials.
            _ => Vec::new(),
        }
    }

    fn run_scoped(
        &self,
        reference: &ItemReference,
        args: &[&str],
    ) -> Result<String, GatewayError> {
        let scope = Self::scope_args(reference);
        let mut full: Vec<&str> = scope.iter().map(String::as_str).collect();
        full.extend_from_slice(args);
        self.runner.run(Helper::Zotero, &full)
    }

    fn record_from_envelope(
        envelope: ItemEnvelope,
        fallback: Option<&ItemReference>,
    ) -> Result<CitationRecord, GatewayError> {
        let href = envelope
            .links
            .as_ref()
            .and_then(|l| l.self_link.as_ref())
            .map(|l| l.href.clone());

        let library_kind = match &href {
            Some(h) if h.contains("/groups/") => LibraryKind::Group,
            Some(_) => LibraryKind::User,
            None => fallback.map(|r| r.library_kind).unwrap_or(LibraryKind::User),
        };

        let library_id = envelope
            .library
            .as_ref()
            .map(|l| trimmed_id(&l.id))
            .or_else(|| href.as_deref().and_then(library_id_from_href))
            .or_else(|| fallback.and_then(|r| r.library_id.clone()))
            .ok_or_else(|| GatewayError::malformed(HELPER, "response carries no library id"))?;

        let key = envelope
            .key
            .or(envelope.data.key)
            .or_else(|| fallback.map(|r| r.item_key.clone()))
            .ok_or_else(|| GatewayError::malformed(HELPER, "response carries no item key"))?;

        Ok(CitationRecord {
            key,
            title: envelope.data.title.unwrap_or_default(),
            abstract_note: envelope.data.abstract_note.filter(|s| !s.is_empty()),
            date: envelope.data.date.filter(|s| !s.is_empty()),
            url: envelope.data.url.filter(|s| !s.is_empty()),
            creators: envelope.data.creators,
            extra_text: envelope.data.extra.unwrap_or_default(),
            library_kind,
            library_id,
            api_href: href,
        })
    }

    fn parse_item(
        json: &str,
        fallback: Option<&ItemReference>,
    ) -> Result<CitationRecord, GatewayError> {
        // `item --key` responds with a single envelope; some helper
        // versions wrap it in a one-element array.
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| GatewayError::malformed(HELPER, e))?;
        let value = match value {
            serde_json::Value::Array(mut items) if !items.is_empty() => items.remove(0),
            other => other,
        };
        let envelope: ItemEnvelope =
            serde_json::from_value(value).map_err(|e| GatewayError::malformed(HELPER, e))?;
        Self::record_from_envelope(envelope, fallback)
    }
}

fn trimmed_id(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Library id out of an API href like `https://api.zotero.org/users/12345/items/K`
fn library_id_from_href(href: &str) -> Option<String> {
    let segments: Vec<&str> = href.split('/').collect();
    segments
        .iter()
        .position(|s| *s == "users" || *s == "groups")
        .and_then(|i| segments.get(i + 1))
        .map(|s| s.to_string())
}

impl<R: CommandRunner> CitationGateway for ZoteroCli<R> {
    fn fetch_citation(&self, reference: &ItemReference) -> Result<CitationRecord, GatewayError> {
        let json = self.run_scoped(reference, &["item", "--key", &reference.item_key])?;
        Self::parse_item(&json, Some(reference))
    }

    fn create_citation(&self, spec: &NewItemSpec) -> Result<CitationRecord, GatewayError> {
        let json = match spec {
            NewItemSpec::JsonFile(path) => {
                let path = path.to_string_lossy();
                self.runner
                    .run(Helper::Zotero, &["create-item", path.as_ref()])?
            }
            NewItemSpec::Template { title } => {
                let template_json = self
                    .runner
                    .run(Helper::Zotero, &["create-item", "--template", "report"])?;
                let mut template: serde_json::Value = serde_json::from_str(&template_json)
                    .map_err(|e| GatewayError::malformed(HELPER, e))?;
                template["title"] = serde_json::Value::String(title.clone());
                self.runner
                    .run_with_payload(Helper::Zotero, &["create-item"], &template)?
            }
        };

        let response: CreateResponse =
            serde_json::from_str(&json).map_err(|e| GatewayError::malformed(HELPER, e))?;
        let envelope = response
            .successful
            .into_iter()
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, envelope)| envelope)
            .ok_or_else(|| GatewayError::malformed(HELPER, "create-item reported no new item"))?;
        Self::record_from_envelope(envelope, None)
    }

    fn update_citation_extra(
        &self,
        reference: &ItemReference,
        extra: &str,
    ) -> Result<(), GatewayError> {
        let scope = Self::scope_args(reference);
        let mut args: Vec<&str> = scope.iter().map(String::as_str).collect();
        args.extend_from_slice(&["update-item", "--key", &reference.item_key]);
        self.runner.run_with_payload(
            Helper::Zotero,
            &args,
            &serde_json::json!({ "extra": extra }),
        )?;
        Ok(())
    }

    fn fetch_attachments(
        &self,
        reference: &ItemReference,
    ) -> Result<Vec<AttachmentRef>, GatewayError> {
        let json =
            self.run_scoped(reference, &["item", "--key", &reference.item_key, "--children"])?;
        let children: Vec<ItemEnvelope> =
            serde_json::from_str(&json).map_err(|e| GatewayError::malformed(HELPER, e))?;

        // Enumeration order is the helper's order; callers rely on it.
        Ok(children
            .into_iter()
            .filter(|c| c.data.item_type.as_deref() == Some("attachment"))
            .filter_map(|c| {
                let key = c.key.or(c.data.key)?;
                let filename = c.data.filename?;
                Some(AttachmentRef {
                    key,
                    filename,
                    content_type: c.data.content_type,
                })
            })
            .collect())
    }

    fn fetch_attachment_bytes(
        &self,
        reference: &ItemReference,
        attachment_key: &str,
    ) -> Result<Vec<u8>, GatewayError> {
        let staging = std::env::temp_dir().join(format!("zotzen-attachment-{}", attachment_key));
        let staging_str = staging.to_string_lossy().into_owned();
        self.run_scoped(
            reference,
            &["attachment", "--key", attachment_key, "--save", &staging_str],
        )?;
        let bytes = std::fs::read(&staging)?;
        let _ = std::fs::remove_file(&staging);
        Ok(bytes)
    }
}
