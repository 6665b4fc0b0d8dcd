//! REST rendering of classified security failures.
//!
//! The transport is out of scope; this module only decides the HTTP status
//! and the message body. The body never carries the failure's log detail.
//! `DEFAULT` failures are rendered with the generic failure text, so a caller
//! cannot tell an unknown userid from a wrong password. Only
//! `USER_EXPLAINED` failures show their catalog explanation.

use serde::Serialize;
use tracing::{error, warn};

use zcommons_contracts::{
    failure::{ErrorClassification, FailureKind, PlatformFailure},
    message::{BasicMessage, MessageType},
};

use crate::mapper::GENERIC_FAILURE_EXPLANATION;

pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_FORBIDDEN: u16 = 403;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// Message number for refused authentication or password change.
pub const MSG_AUTHENTICATION_FAILED: &str = "ZCS0101";
/// Message number for a refused access check.
pub const MSG_AUTHORIZATION_FAILED: &str = "ZCS0102";
/// Message number for a broken or unreachable security service.
pub const MSG_SECURITY_SERVICE_ERROR: &str = "ZCS0500";

/// HTTP status plus message body for one failed security request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub body: BasicMessage,
}

impl ErrorResponse {
    /// Serialize the body for the wire.
    pub fn to_json(&self) -> serde_json::Result<String> {
        self.body.to_json()
    }

    /// Emit the structured log line for this response.
    pub fn log(&self) {
        if self.status >= 500 {
            error!(
                status = self.status,
                message = %self.body.to_readable_text(),
                instance_id = %self.body.message_instance_id(),
                "Server error response"
            );
        } else {
            warn!(
                status = self.status,
                message = %self.body.to_readable_text(),
                instance_id = %self.body.message_instance_id(),
                "Client error response"
            );
        }
    }
}

impl From<&PlatformFailure> for ErrorResponse {
    fn from(failure: &PlatformFailure) -> Self {
        let (status, number) = match failure.kind() {
            FailureKind::Internal => (STATUS_INTERNAL_SERVER_ERROR, MSG_SECURITY_SERVICE_ERROR),
            FailureKind::AuthFailure if failure.operation().is_authentication() => {
                (STATUS_UNAUTHORIZED, MSG_AUTHENTICATION_FAILED)
            }
            FailureKind::AuthFailure => (STATUS_FORBIDDEN, MSG_AUTHORIZATION_FAILED),
        };

        let content = match failure.classification() {
            ErrorClassification::Default => GENERIC_FAILURE_EXPLANATION,
            ErrorClassification::UserExplained | ErrorClassification::Internal => {
                failure.explanation()
            }
        };

        Self {
            status,
            body: BasicMessage::new(MessageType::Error, number, content),
        }
    }
}

impl From<PlatformFailure> for ErrorResponse {
    fn from(failure: PlatformFailure) -> Self {
        Self::from(&failure)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
