//! Classified application errors produced from failed platform results.
//!
//! A `PlatformFailure` carries two texts. `explanation()` is safe to send
//! across the REST boundary. `detail()` holds everything the host reported
//! and is meant for the log only; it never appears in `Display`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::SecurityOperation;

/// How much of a failure's cause may be revealed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorClassification {
    /// Generic authentication/authorization failure; the precise reason stays hidden.
    Default,
    /// The security service itself malfunctioned; log in full, report opaquely.
    Internal,
    /// The precise explanation is safe and useful for the end user.
    UserExplained,
}

impl fmt::Display for ErrorClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "DEFAULT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::UserExplained => write!(f, "USER_EXPLAINED"),
        }
    }
}

/// The two error kinds that leave the security seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Authentication or authorization was denied.
    AuthFailure,
    /// The security service is unavailable or malfunctioned.
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthFailure => write!(f, "AUTH_FAILURE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// A classified security failure ready for REST error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {explanation}")]
pub struct PlatformFailure {
    kind: FailureKind,
    operation: SecurityOperation,
    classification: ErrorClassification,
    explanation: String,
    code: i32,
    reason_code: i32,
    detail: String,
}

impl PlatformFailure {
    /// Build a failure. `explanation` must already be the caller-safe text.
    pub fn new(
        kind: FailureKind,
        operation: SecurityOperation,
        classification: ErrorClassification,
        explanation: impl Into<String>,
        code: i32,
    ) -> Self {
        let explanation = explanation.into();
        Self {
            kind,
            operation,
            classification,
            detail: explanation.clone(),
            explanation,
            code,
            reason_code: 0,
        }
    }

    pub fn with_reason_code(mut self, reason_code: i32) -> Self {
        self.reason_code = reason_code;
        self
    }

    /// Replace the log-only detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn operation(&self) -> SecurityOperation {
        self.operation
    }

    pub fn classification(&self) -> ErrorClassification {
        self.classification
    }

    /// Text that may cross the REST boundary.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// The host return code that was classified (`-1` when the adapter never ran).
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn reason_code(&self) -> i32 {
        self.reason_code
    }

    /// Full diagnostic text. Log it; never return it to a client.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}
