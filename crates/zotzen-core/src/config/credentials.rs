//! Credential installation
//!
//! The `--install` mode collects four credentials from the operator and
//! writes them into the two helpers' own credential files: plain JSON
//! for zotero-cli, flat `key = "value"` text for zenodo-cli. This is
//! config bootstrapping only; nothing here is consulted by the core.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZotzenError};
use crate::prompt::Prompter;

/// zotero-cli credential file contents (JSON)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ZoteroCredentials {
    #[serde(rename = "api-key")]
    pub api_key: String,
    #[serde(rename = "user-id")]
    pub user_id: String,
}

/// zenodo-cli credential file contents (flat key = "value" text)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ZenodoCredentials {
    pub access_token: String,
    pub env: String,
}

/// Where the two credential files live
#[derive(Clone, Debug)]
pub struct InstallPaths {
    pub zotero_config: PathBuf,
    pub zenodo_config: PathBuf,
}

impl InstallPaths {
    /// Per-user default locations under the platform config directory.
    pub fn default_locations() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| ZotzenError::Config("no user config directory".to_string()))?;
        Ok(Self {
            zotero_config: base.join("zotero-cli").join("zotero-cli.json"),
            zenodo_config: base.join("zenodo-cli").join("zenodo-cli.toml"),
        })
    }
}

/// Interactively collect the four credentials and write both files.
pub fn install<P: Prompter>(prompter: &P, paths: &InstallPaths) -> Result<()> {
    let zotero = ZoteroCredentials {
        api_key: prompter.input("Zotero API key:"),
        user_id: prompter.input("Zotero user id:"),
    };
    let zenodo = ZenodoCredentials {
        access_token: prompter.input("Zenodo access token:"),
        env: {
            let answer = prompter.input("Zenodo environment (sandbox/production) [production]:");
            if answer.trim().is_empty() {
                "production".to_string()
            } else {
                answer.trim().to_string()
            }
        },
    };

    write_zotero(&zotero, &paths.zotero_config)?;
    write_zenodo(&zenodo, &paths.zenodo_config)?;
    Ok(())
}

fn write_zotero(credentials: &ZoteroCredentials, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(credentials)
        .map_err(|e| ZotzenError::Config(e.to_string()))?;
    write_credential_file(path, &text)
}

fn write_zenodo(credentials: &ZenodoCredentials, path: &Path) -> Result<()> {
    let text = toml::to_string(credentials).map_err(|e| ZotzenError::Config(e.to_string()))?;
    write_credential_file(path, &text)
}

fn write_credential_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ZotzenError::Config(format!("cannot create {:?}: {}", parent, e)))?;
    }
    std::fs::write(path, contents)
        .map_err(|e| ZotzenError::Config(format!("cannot write {:?}: {}", path, e)))
}
