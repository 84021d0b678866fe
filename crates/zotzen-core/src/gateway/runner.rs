//! External helper invocation
//!
//! Both external systems are driven through their command-line helpers.
//! Request payloads travel through one single-slot temporary file per
//! helper, created immediately before and deleted immediately after each
//! call; the file is a transport mechanism, not durable state.

use std::path::PathBuf;
use std::process::Command;

use crate::error::GatewayError;

/// Which external helper a call targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Helper {
    Zotero,
    Zenodo,
}

impl Helper {
    pub fn name(&self) -> &'static str {
        match self {
            Helper::Zotero => "zotero-cli",
            Helper::Zenodo => "zenodo-cli",
        }
    }
}

/// How to invoke one helper: program, fixed leading args, working
/// directory, and the single-slot payload file inside it.
#[derive(Clone, Debug)]
pub struct HelperCommand {
    pub program: String,
    pub base_args: Vec<String>,
    pub workdir: PathBuf,
    pub payload_file: String,
}

impl HelperCommand {
    fn payload_path(&self) -> PathBuf {
        self.workdir.join(&self.payload_file)
    }
}

/// Runs helper commands and returns their stdout
pub trait CommandRunner {
    fn run(&self, helper: Helper, args: &[&str]) -> Result<String, GatewayError>;

    /// Run with a JSON payload staged in the helper's payload file. The
    /// file name is appended as the final argument.
    fn run_with_payload(
        &self,
        helper: Helper,
        args: &[&str],
        payload: &serde_json::Value,
    ) -> Result<String, GatewayError>;
}

/// Production runner shelling out to the two helpers
#[derive(Clone)]
pub struct CliRunner {
    zotero: HelperCommand,
    zenodo: HelperCommand,
}

impl Default for CliRunner {
    fn default() -> Self {
        Self {
            zotero: HelperCommand {
                program: "node".to_string(),
                base_args: vec!["bin/zotero-cli.js".to_string()],
                workdir: PathBuf::from("zotero-cli"),
                payload_file: "tmp".to_string(),
            },
            zenodo: HelperCommand {
                program: "python".to_string(),
                base_args: vec!["zenodo-cli.py".to_string()],
                workdir: PathBuf::from("zenodo-cli"),
                payload_file: "tmp".to_string(),
            },
        }
    }
}

impl CliRunner {
    pub fn new(zotero: HelperCommand, zenodo: HelperCommand) -> Self {
        Self { zotero, zenodo }
    }

    fn command(&self, helper: Helper) -> &HelperCommand {
        match helper {
            Helper::Zotero => &self.zotero,
            Helper::Zenodo => &self.zenodo,
        }
    }
}

impl CommandRunner for CliRunner {
    fn run(&self, helper: Helper, args: &[&str]) -> Result<String, GatewayError> {
        let spec = self.command(helper);
        tracing::debug!(helper = helper.name(), ?args, "invoking helper");

        let output = Command::new(&spec.program)
            .args(&spec.base_args)
            .args(args)
            .current_dir(&spec.workdir)
            .output()
            .map_err(|e| GatewayError::Spawn {
                helper: helper.name(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(GatewayError::CommandFailed {
                helper: helper.name(),
                message,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_with_payload(
        &self,
        helper: Helper,
        args: &[&str],
        payload: &serde_json::Value,
    ) -> Result<String, GatewayError> {
        let spec = self.command(helper);
        let path = spec.payload_path();
        std::fs::write(&path, serde_json::to_vec(payload).expect("payload serializes"))?;

        let mut full_args: Vec<&str> = args.to_vec();
        full_args.push(&spec.payload_file);
        let result = self.run(helper, &full_args);

        // The slot file is transport only; drop it whether or not the
        // helper succeeded.
        let _ = std::fs::remove_file(&path);
        result
    }
}
