//! Archive-side gateway backed by zenodo-cli
//!
//! The helper responds with a line-oriented `Key: value` report. Fields
//! are extracted by locating the line beginning with `<Key>:` and taking
//! the remainder of that line, later colons included.

use super::runner::{CommandRunner, Helper};
use super::ArchiveGateway;
use crate::domain::{
    ArchiveRecord, ArchiveState, DepositMetadata, DepositTemplate, RELATED_IDENTIFIER_RELATION,
};
use crate::error::GatewayError;

const HELPER: &str = "zenodo-cli";

/// Take the remainder of the first line beginning with `<key>:`.
pub fn report_field(report: &str, key: &str) -> Option<String> {
    let prefix = format!("{}:", key);
    report
        .lines()
        .find(|line| line.starts_with(&prefix))
        .map(|line| line[prefix.len()..].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Archive gateway over a [`CommandRunner`]
pub struct ZenodoCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> ZenodoCli<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn parse_report(report: &str) -> Result<ArchiveRecord, GatewayError> {
        let doi = report_field(report, "DOI")
            .ok_or_else(|| GatewayError::malformed(HELPER, "report carries no DOI line"))?;
        let record_id = report_field(report, "RecordId")
            .or_else(|| crate::identifiers::record_id_from_doi(&doi))
            .ok_or_else(|| GatewayError::malformed(HELPER, "report carries no record id"))?;

        // Either a `Published: yes` or a `State: done` line marks the
        // deposit as published; anything else is a writable draft.
        let published = report_field(report, "Published")
            .map(|v| v.eq_ignore_ascii_case("yes"))
            .unwrap_or(false)
            || report_field(report, "State")
                .map(|v| v.eq_ignore_ascii_case("done"))
                .unwrap_or(false);
        let state = if published {
            ArchiveState::Published
        } else {
            ArchiveState::Draft
        };

        let creators = report_field(report, "Creators")
            .map(|v| {
                v.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ArchiveRecord {
            doi,
            record_id,
            title: report_field(report, "Title"),
            description: report_field(report, "Description"),
            creators,
            publication_date: report_field(report, "PublicationDate"),
            related_identifier: report_field(report, "RelatedIdentifier"),
            state,
            deposit_url: report_field(report, "URL"),
        })
    }
}

impl<R: CommandRunner> ArchiveGateway for ZenodoCli<R> {
    fn fetch_archive(&self, record_id: &str) -> Result<ArchiveRecord, GatewayError> {
        let report = self.runner.run(Helper::Zenodo, &["get", record_id, "--show"])?;
        Self::parse_report(&report)
    }

    fn create_archive(&self, template: &DepositTemplate) -> Result<ArchiveRecord, GatewayError> {
        let report =
            self.runner
                .run_with_payload(Helper::Zenodo, &["create", "--show"], template.as_json())?;
        Self::parse_report(&report)
    }

    fn update_archive_metadata(
        &self,
        record_id: &str,
        metadata: &DepositMetadata,
    ) -> Result<(), GatewayError> {
        let payload =
            serde_json::to_value(metadata).map_err(|e| GatewayError::malformed(HELPER, e))?;
        self.runner
            .run_with_payload(Helper::Zenodo, &["update", record_id], &payload)?;
        Ok(())
    }

    fn set_archive_back_reference(
        &self,
        record_id: &str,
        select_link: &str,
    ) -> Result<(), GatewayError> {
        let payload = serde_json::json!({
            "related_identifiers": [
                { "identifier": select_link, "relation": RELATED_IDENTIFIER_RELATION }
            ]
        });
        self.runner
            .run_with_payload(Helper::Zenodo, &["update", record_id], &payload)?;
        Ok(())
    }

    fn publish_archive(&self, record_id: &str) -> Result<(), GatewayError> {
        self.runner.run(Helper::Zenodo, &["publish", record_id])?;
        Ok(())
    }

    fn upload_attachment(
        &self,
        record_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(), GatewayError> {
        // Stage under the attachment's own name so the deposit keeps it.
        let base = std::path::Path::new(file_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        let staging = std::env::temp_dir().join(&base);
        std::fs::write(&staging, bytes)?;
        let staging_str = staging.to_string_lossy().into_owned();
        let result = self
            .runner
            .run(Helper::Zenodo, &["upload", record_id, &staging_str]);
        let _ = std::fs::remove_file(&staging);
        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_REPORT: &str = "\
RecordId: 123456
DOI: 10.5281/zenodo.123456
URL: https://zenodo.org/deposit/123456
Title: A Study
State: inprogress
Published: no
RelatedIdentifier: zotero://select/users/12345/items/ABCD1234
Creators: Doe, Jane; Roe, Richard
";

    #[test]
    fn test_report_field_keeps_later_colons() {
        assert_eq!(
            report_field(SAMPLE_REPORT, "URL").unwrap(),
            "https://zenodo.org/deposit/123456"
        );
    }

    #[test]
    fn test_report_field_missing_key() {
        assert_eq!(report_field(SAMPLE_REPORT, "License"), None);
    }

    #[test]
    fn test_parse_report() {
        let record = ZenodoCli::<super::super::runner::CliRunner>::parse_report(SAMPLE_REPORT)
            .unwrap();
        assert_eq!(record.doi, "10.5281/zenodo.123456");
        assert_eq!(record.record_id, "123456");
        assert_eq!(record.state, ArchiveState::Draft);
        assert!(record.writable());
        assert_eq!(
            record.related_identifier.as_deref(),
            Some("zotero://select/users/12345/items/ABCD1234")
        );
        assert_eq!(record.creators, vec!["Doe, Jane", "Roe, Richard"]);
    }

    #[test]
    fn test_parse_report_published() {
        let report = SAMPLE_REPORT.replace("Published: no", "Published: yes");
        let record =
            ZenodoCli::<super::super::runner::CliRunner>::parse_report(&report).unwrap();
        assert_eq!(record.state, ArchiveState::Published);
        assert!(!record.writable());
    }

    #[test]
    fn test_parse_report_state_done_marks_published() {
        let report = SAMPLE_REPORT
            .replace("State: inprogress", "State: done")
            .replace("Published: no\n", "");
        let record =
            ZenodoCli::<super::super::runner::CliRunner>::parse_report(&report).unwrap();
        assert_eq!(record.state, ArchiveState::Published);
    }

    #[test]
    fn test_parse_report_without_doi_rejected() {
        let err = ZenodoCli::<super::super::runner::CliRunner>::parse_report("Title: x\n")
            .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse { .. }));
    }
}
