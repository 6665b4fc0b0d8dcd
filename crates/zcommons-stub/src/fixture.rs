//! Seed data for the stub platform.
//!
//! A `StubFixture` is deserialized from TOML, either on its own or as the
//! `[stub]` table of the platform configuration.
//!
//! Example:
//! ```toml
//! current_user = "IBMUSER"
//!
//! [[users]]
//! userid = "ZOWE"
//! password = "zowe"
//!
//! [[users]]
//! userid = "EXPIRED"
//! password = "expired"
//! expired = true
//!
//! [[grants]]
//! class = "FACILITY"
//! entity = "ZOWE.SAMPLE"
//! userid = "ZOWE"
//! access = "update"
//!
//! [[outcomes]]
//! userid = "BROKEN"
//! operation = "authenticate"
//! return_code = 157
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use zcommons_contracts::{
    error::{PlatformError, PlatformResult},
    platform::{AccessLevel, SecurityOperation},
    returned::PlatformReturned,
};

/// Identity the stub reports when no fixture names one.
pub const DEFAULT_CURRENT_USER: &str = "IBMUSER";

fn default_current_user() -> String {
    DEFAULT_CURRENT_USER.to_string()
}

/// A user profile known to the stub.
///
/// `Debug` output masks the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubUser {
    pub userid: String,
    pub password: String,
    /// Correct password still fails with EMVSEXPIRE.
    #[serde(default)]
    pub expired: bool,
    /// Every password check fails with EMVSSAFEXTRERR.
    #[serde(default)]
    pub revoked: bool,
}

impl fmt::Debug for StubUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubUser")
            .field("userid", &self.userid)
            .field("password", &"<redacted>")
            .field("expired", &self.expired)
            .field("revoked", &self.revoked)
            .finish()
    }
}

impl StubUser {
    pub fn new(userid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            userid: userid.into(),
            password: password.into(),
            expired: false,
            revoked: false,
        }
    }

    pub fn expired(mut self) -> Self {
        self.expired = true;
        self
    }

    pub fn revoked(mut self) -> Self {
        self.revoked = true;
        self
    }
}

/// Access granted to one user on one general-resource profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubGrant {
    pub class: String,
    pub entity: String,
    pub userid: String,
    pub access: AccessLevel,
}

/// A fixed answer for one (userid, operation) pair, overriding the tables.
///
/// Used to reproduce host results the tables cannot produce, such as
/// EMVSERR from a broken security product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedOutcome {
    pub userid: String,
    pub operation: SecurityOperation,
    pub return_code: i32,
    #[serde(default)]
    pub reason_code: i32,
    #[serde(default)]
    pub reason_text: Option<String>,
}

impl ScriptedOutcome {
    /// The platform result this script stands for. `return_code = 0` is success.
    pub fn to_returned(&self) -> PlatformReturned {
        if self.return_code == 0 {
            return PlatformReturned::ok();
        }
        let returned = PlatformReturned::failure(self.return_code, self.reason_code);
        match &self.reason_text {
            Some(text) => returned.with_reason_text(text.clone()),
            None => returned,
        }
    }
}

/// Complete seed for a `StubPlatform`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubFixture {
    #[serde(default = "default_current_user")]
    pub current_user: String,
    #[serde(default)]
    pub users: Vec<StubUser>,
    #[serde(default)]
    pub grants: Vec<StubGrant>,
    #[serde(default)]
    pub outcomes: Vec<ScriptedOutcome>,
}

impl Default for StubFixture {
    fn default() -> Self {
        Self {
            current_user: default_current_user(),
            users: Vec::new(),
            grants: Vec::new(),
            outcomes: Vec::new(),
        }
    }
}

impl StubFixture {
    /// Parse `s` as a TOML fixture.
    ///
    /// Returns `PlatformError::ConfigError` if the TOML is malformed or
    /// does not match the fixture schema.
    pub fn from_toml_str(s: &str) -> PlatformResult<Self> {
        toml::from_str(s).map_err(|e| PlatformError::ConfigError {
            reason: format!("failed to parse stub fixture TOML: {}", e),
        })
    }

    /// Read and parse the fixture file at `path`.
    pub fn from_file(path: &Path) -> PlatformResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PlatformError::ConfigError {
            reason: format!("failed to read stub fixture '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}
