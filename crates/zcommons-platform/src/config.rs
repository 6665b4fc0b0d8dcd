//! Platform configuration document.
//!
//! Example:
//! ```toml
//! [platform.security]
//! mode = "stub"          # "real" | "stub"
//!
//! [stub]
//! current_user = "IBMUSER"
//!
//! [[stub.users]]
//! userid = "ZOWE"
//! password = "zowe"
//! ```
//!
//! Every table is optional. Without `mode` the variant follows the build
//! target: `real` on z/OS, `stub` elsewhere.

use std::path::Path;

use serde::Deserialize;

use zcommons_contracts::{
    error::{PlatformError, PlatformResult},
    platform::PlatformVariant,
};
use zcommons_stub::StubFixture;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SecuritySection {
    #[serde(default)]
    pub mode: PlatformVariant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlatformSection {
    #[serde(default)]
    pub security: SecuritySection,
}

/// Top-level configuration: variant selection plus the stub's seed data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub platform: PlatformSection,
    /// Ignored unless the `stub` variant is selected.
    #[serde(default)]
    pub stub: StubFixture,
}

impl PlatformConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `PlatformError::ConfigError` if the TOML is malformed or does
    /// not match the configuration schema.
    pub fn from_toml_str(s: &str) -> PlatformResult<Self> {
        toml::from_str(s).map_err(|e| PlatformError::ConfigError {
            reason: format!("failed to parse platform configuration TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as TOML.
    pub fn from_file(path: &Path) -> PlatformResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PlatformError::ConfigError {
            reason: format!(
                "failed to read platform configuration '{}': {}",
                path.display(),
                e
            ),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn mode(&self) -> PlatformVariant {
        self.platform.security.mode
    }

    /// Override the configured variant, e.g. from a command-line flag.
    pub fn with_mode(mut self, mode: PlatformVariant) -> Self {
        self.platform.security.mode = mode;
        self
    }
}
