//! Raw host call results and their decomposition into `PlatformReturned`.
//!
//! Kept free of FFI so the decomposition rules are testable on any target.

use zcommons_contracts::returned::PlatformReturned;
use zcommons_core::errno::PlatformErrno;

/// What a z/OS UNIX security service left behind after one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCallResult {
    /// Function return value: `0` on success, `-1` on failure.
    pub rc: i32,
    /// `errno` after the call.
    pub errno: i32,
    /// `__errno2()` after the call: the reason code.
    pub errno2: i32,
    /// Host text for `errno`, when one was available.
    pub message: Option<String>,
}

impl HostCallResult {
    pub fn success() -> Self {
        Self {
            rc: 0,
            errno: 0,
            errno2: 0,
            message: None,
        }
    }

    /// A failure produced before reaching the host, e.g. input the service
    /// could never accept.
    pub fn rejected(errno: PlatformErrno, message: impl Into<String>) -> Self {
        Self {
            rc: -1,
            errno: errno.errno(),
            errno2: 0,
            message: Some(message.into()),
        }
    }

    /// `rc == 0` is success and everything else is ignored. Otherwise the
    /// errno is the return code and errno2 the reason code.
    pub fn decompose(&self) -> PlatformReturned {
        if self.rc == 0 {
            return PlatformReturned::ok();
        }
        let returned = PlatformReturned::failure(self.errno, self.errno2);
        match &self.message {
            Some(text) => returned.with_reason_text(text.clone()),
            None => returned,
        }
    }
}

impl From<&HostCallResult> for PlatformReturned {
    fn from(result: &HostCallResult) -> Self {
        result.decompose()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
