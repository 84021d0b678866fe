//! Command runner integration tests
//!
//! Exercise the production runner against stand-in programs so the
//! transport contract (argv assembly, single-slot payload file, failure
//! propagation) is observable without the real helpers.

use zotzen_core::error::GatewayError;
use zotzen_core::gateway::{CliRunner, CommandRunner, Helper, HelperCommand};

fn helper_command(dir: &std::path::Path, program: &str, base_args: &[&str]) -> HelperCommand {
    HelperCommand {
        program: program.to_string(),
        base_args: base_args.iter().map(|s| s.to_string()).collect(),
        workdir: dir.to_path_buf(),
        payload_file: "tmp".to_string(),
    }
}

fn runner_with(dir: &std::path::Path, program: &str, base_args: &[&str]) -> CliRunner {
    CliRunner::new(
        helper_command(dir, program, base_args),
        helper_command(dir, program, base_args),
    )
}

#[test]
fn run_captures_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner_with(dir.path(), "echo", &["item"]);

    let output = runner.run(Helper::Zotero, &["--key", "ABCD1234"]).unwrap();
    assert_eq!(output.trim(), "item --key ABCD1234");
}

#[test]
fn run_with_payload_stages_and_removes_slot_file() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner_with(dir.path(), "echo", &["update-item"]);
    let payload = serde_json::json!({ "extra": "DOI: 10.5281/zenodo.1" });

    let output = runner
        .run_with_payload(Helper::Zenodo, &["--key", "K"], &payload)
        .unwrap();

    // The slot file name rides along as the final argument...
    assert_eq!(output.trim(), "update-item --key K tmp");
    // ...and the slot file is gone once the call returns.
    assert!(!dir.path().join("tmp").exists());
}

#[test]
fn non_zero_exit_becomes_command_failed() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner_with(dir.path(), "false", &[]);

    let err = runner.run(Helper::Zenodo, &[]).unwrap_err();
    assert!(matches!(err, GatewayError::CommandFailed { helper, .. } if helper == "zenodo-cli"));
}

#[test]
fn missing_program_becomes_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner_with(dir.path(), "zotzen-no-such-program", &[]);

    let err = runner.run(Helper::Zotero, &[]).unwrap_err();
    assert!(matches!(err, GatewayError::Spawn { helper, .. } if helper == "zotero-cli"));
}

#[test]
fn payload_slot_file_removed_even_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner_with(dir.path(), "false", &[]);
    let payload = serde_json::json!({});

    let result = runner.run_with_payload(Helper::Zenodo, &[], &payload);

    assert!(result.is_err());
    assert!(!dir.path().join("tmp").exists());
}
