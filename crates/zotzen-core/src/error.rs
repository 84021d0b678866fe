//! Error types for zotzen-core

use thiserror::Error;

/// Result type alias for zotzen operations
pub type Result<T> = std::result::Result<T, ZotzenError>;

/// Main error type for zotzen operations
#[derive(Error, Debug)]
pub enum ZotzenError {
    /// Malformed reference token supplied by the operator
    #[error("Invalid reference '{token}': {reason}")]
    InvalidReference { token: String, reason: String },

    /// One of the two external helpers failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Citation record lacks a title required for projection
    #[error("Citation record '{0}' has no title")]
    MissingTitle(String),

    /// Citation record lacks creators required for projection
    #[error("Citation record '{0}' has no creators")]
    MissingCreators(String),

    /// Abstract absent or shorter than the projection minimum
    #[error("Citation record '{0}' has a missing or too-short abstract")]
    InsufficientAbstract(String),

    /// Archive back-reference does not point at this citation record
    #[error(
        "Link mismatch: archive record {doi} points at {found}, expected {expected}; \
         link the records explicitly before retrying"
    )]
    LinkMismatch {
        doi: String,
        expected: String,
        found: String,
    },

    /// Citation record carries no archive DOI yet
    #[error("Citation record '{0}' is not linked to an archive record; run --getdoi or --zen first")]
    NotLinked(String),

    /// Archive record is published and can no longer be written to
    #[error("Archive record {0} is published and not writable")]
    ArchiveNotWritable(String),

    /// Credential bootstrapping failure
    #[error("Config error: {0}")]
    Config(String),
}

impl ZotzenError {
    /// Whether the failure aborts only the current sub-operation.
    ///
    /// Non-fatal errors are reported and the invocation continues with
    /// its remaining independent sub-operations.
    pub fn is_sub_operation_error(&self) -> bool {
        matches!(
            self,
            ZotzenError::MissingTitle(_)
                | ZotzenError::MissingCreators(_)
                | ZotzenError::InsufficientAbstract(_)
                | ZotzenError::LinkMismatch { .. }
                | ZotzenError::NotLinked(_)
                | ZotzenError::ArchiveNotWritable(_)
        )
    }
}

/// Errors from the external helper boundary
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Helper exited non-zero
    #[error("{helper} failed: {message}")]
    CommandFailed { helper: &'static str, message: String },

    /// Helper process could not be launched
    #[error("Could not launch {helper}: {message}")]
    Spawn { helper: &'static str, message: String },

    /// Helper output did not match its wire contract
    #[error("Malformed {helper} response: {message}")]
    MalformedResponse { helper: &'static str, message: String },

    /// Temp payload file or attachment staging I/O
    #[error("Transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Wrap a JSON decoding failure against a named helper.
    pub fn malformed(helper: &'static str, err: impl std::fmt::Display) -> Self {
        GatewayError::MalformedResponse {
            helper,
            message: err.to_string(),
        }
    }
}
