//! Normalized operation outcomes.

use crate::downloads::DownloadHandle;
use crate::operation::OperationKind;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one operation. Failures are values, never panics.
pub type OperationResult = std::result::Result<OperationOutput, Failure>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationOutput {
    /// A file returned by the service, held in the download store.
    File(FileOutput),
    /// A JSON result object (Jira and Notion endpoints).
    Report(serde_json::Value),
}

impl OperationOutput {
    pub fn file(&self) -> Option<&FileOutput> {
        match self {
            Self::File(f) => Some(f),
            Self::Report(_) => None,
        }
    }

    pub fn into_file(self) -> Option<FileOutput> {
        match self {
            Self::File(f) => Some(f),
            Self::Report(_) => None,
        }
    }

    pub fn report(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Report(v) => Some(v),
            Self::File(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutput {
    pub handle: DownloadHandle,
    /// Suggested name for saving the file.
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<SizeMetrics>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMetrics {
    Compression {
        original_size: u64,
        compressed_size: u64,
        /// Percentage saved; negative when the file grew. `None` for empty input.
        compression_ratio: Option<i64>,
    },
    Merge {
        original_sizes: Vec<u64>,
        merged_size: u64,
    },
}

/// Opaque Jira session obtained from the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraSession {
    pub session_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Rejected before sending.
    Validation,
    /// DNS, connection or timeout failure.
    Transport,
    /// Non-2xx reply.
    Service { status: u16 },
    /// Unreadable reply payload.
    Parse,
}

/// A failed operation with the message to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    #[serde(flatten)]
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Fold an internal error into a displayable failure for `op`.
    ///
    /// Parse problems never surface their details; they become the
    /// operation's default message.
    pub fn from_error(err: Error, op: OperationKind) -> Self {
        Self::from_error_with_default(err, op.default_error_message())
    }

    pub(crate) fn from_error_with_default(err: Error, default_message: &str) -> Self {
        match err {
            Error::Validation { message, .. } | Error::Configuration { message, .. } => {
                Self::new(FailureKind::Validation, message)
            }
            Error::Transport(e) => Self::new(FailureKind::Transport, format!("Network error: {}", e)),
            Error::Service { status, message } => Self::new(FailureKind::Service { status }, message),
            Error::Parse { .. } | Error::Serialization(_) => {
                Self::new(FailureKind::Parse, default_message)
            }
            Error::Io(e) => Self::new(FailureKind::Validation, format!("Could not read input: {}", e)),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, FailureKind::Validation)
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FailureKind::Service { status } => Some(status),
            _ => None,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Failure {}
