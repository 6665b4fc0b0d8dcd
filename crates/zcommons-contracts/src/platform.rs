//! Platform-facing request types: adapter variant, operations, resources
//! and access levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which adapter implementation backs the security seam.
///
/// Selected once per process from `platform.security.mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVariant {
    /// Bound to the z/OS host security services.
    Real,
    /// In-memory stand-in for development and unit tests off z/OS.
    Stub,
}

impl Default for PlatformVariant {
    /// The variant native to the build target.
    fn default() -> Self {
        if cfg!(target_os = "zos") {
            Self::Real
        } else {
            Self::Stub
        }
    }
}

impl fmt::Display for PlatformVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => write!(f, "real"),
            Self::Stub => write!(f, "stub"),
        }
    }
}

/// The security service an adapter call performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityOperation {
    /// Password verification (BPX4PWD).
    Authenticate,
    /// Password change (BPX4PWD with a new password).
    ChangePassword,
    /// Resource authorization check.
    CheckAccess,
    /// Lookup of the effective security principal.
    CurrentUser,
}

impl SecurityOperation {
    /// True for operations that establish identity rather than authorize it.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authenticate | Self::ChangePassword)
    }
}

impl fmt::Display for SecurityOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticate => write!(f, "authentication"),
            Self::ChangePassword => write!(f, "password change"),
            Self::CheckAccess => write!(f, "access check"),
            Self::CurrentUser => write!(f, "current user lookup"),
        }
    }
}

/// RACF access levels, ordered by privilege.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    None,
    Read,
    Update,
    Control,
    Alter,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Read => write!(f, "READ"),
            Self::Update => write!(f, "UPDATE"),
            Self::Control => write!(f, "CONTROL"),
            Self::Alter => write!(f, "ALTER"),
        }
    }
}

impl std::str::FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "control" => Ok(Self::Control),
            "alter" => Ok(Self::Alter),
            other => Err(format!("unknown access level '{other}'")),
        }
    }
}

/// A SAF general-resource profile: class plus entity name.
///
/// Both parts are stored upper case, matching how RACF records profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Resource {
    class: String,
    entity: String,
}

impl Resource {
    pub fn new(class: impl AsRef<str>, entity: impl AsRef<str>) -> Self {
        Self {
            class: class.as_ref().trim().to_uppercase(),
            entity: entity.as_ref().trim().to_uppercase(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.class, self.entity)
    }
}
