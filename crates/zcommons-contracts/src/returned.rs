//! The typed result of one call into the security platform.
//!
//! Both adapter variants produce `PlatformReturned` values so that the rest
//! of the crate never sees host-specific result layouts.

use serde::{Deserialize, Serialize};

/// Outcome of a single host security call.
///
/// Invariant: `success == true` implies `return_code == 0`. Values are only
/// built through [`PlatformReturned::ok`] and [`PlatformReturned::failure`],
/// and deserialization rejects documents that break the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPlatformReturned")]
pub struct PlatformReturned {
    success: bool,
    return_code: i32,
    reason_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason_text: Option<String>,
}

impl PlatformReturned {
    /// A successful call.
    pub fn ok() -> Self {
        Self {
            success: true,
            return_code: 0,
            reason_code: 0,
            reason_text: None,
        }
    }

    /// A failed call with the host's return code (errno) and reason code (errno2).
    pub fn failure(return_code: i32, reason_code: i32) -> Self {
        Self {
            success: false,
            return_code,
            reason_code,
            reason_text: None,
        }
    }

    /// Attach the host's textual reason.
    pub fn with_reason_text(mut self, text: impl Into<String>) -> Self {
        self.reason_text = Some(text.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn return_code(&self) -> i32 {
        self.return_code
    }

    pub fn reason_code(&self) -> i32 {
        self.reason_code
    }

    pub fn reason_text(&self) -> Option<&str> {
        self.reason_text.as_deref()
    }
}

/// Unchecked wire shape; converted through `TryFrom` so the invariant holds.
#[derive(Deserialize)]
struct RawPlatformReturned {
    success: bool,
    return_code: i32,
    #[serde(default)]
    reason_code: i32,
    #[serde(default)]
    reason_text: Option<String>,
}

impl TryFrom<RawPlatformReturned> for PlatformReturned {
    type Error = String;

    fn try_from(raw: RawPlatformReturned) -> Result<Self, Self::Error> {
        if raw.success && raw.return_code != 0 {
            return Err(format!(
                "successful platform result must have return_code 0, got {}",
                raw.return_code
            ));
        }
        Ok(Self {
            success: raw.success,
            return_code: raw.return_code,
            reason_code: raw.reason_code,
            reason_text: raw.reason_text,
        })
    }
}
