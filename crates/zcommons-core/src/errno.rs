//! Error numbers returned by the z/OS password service.
//!
//! Codes and texts follow the BPX4PWD (`__passwd`) documentation:
//! <https://www.ibm.com/support/knowledgecenter/SSLTBW_2.4.0/com.ibm.zos.v2r4.bpxb100/pwd.htm>
//!
//! The catalog is closed. New codes are added by extending the enum and
//! [`PlatformErrno::ALL`]; there is no runtime registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use zcommons_contracts::failure::ErrorClassification;

/// One entry of the password-service errno catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "ErrnoEntry")]
pub enum PlatformErrno {
    Eacces,
    Einval,
    Emvserr,
    Emvsexpire,
    Emvspassword,
    Emvssaf2err,
    Emvssafextrerr,
    Enosys,
    Eperm,
    Esrch,
}

static BY_ERRNO: LazyLock<HashMap<i32, PlatformErrno>> = LazyLock::new(|| {
    PlatformErrno::ALL
        .iter()
        .map(|entry| (entry.errno(), *entry))
        .collect()
});

impl PlatformErrno {
    /// Every catalog entry, in declaration order.
    pub const ALL: [PlatformErrno; 10] = [
        Self::Eacces,
        Self::Einval,
        Self::Emvserr,
        Self::Emvsexpire,
        Self::Emvspassword,
        Self::Emvssaf2err,
        Self::Emvssafextrerr,
        Self::Enosys,
        Self::Eperm,
        Self::Esrch,
    ];

    /// Find the entry for a host errno. Unknown codes yield `None`.
    pub fn lookup(errno: i32) -> Option<Self> {
        BY_ERRNO.get(&errno).copied()
    }

    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::Eacces => "EACCES",
            Self::Einval => "EINVAL",
            Self::Emvserr => "EMVSERR",
            Self::Emvsexpire => "EMVSEXPIRE",
            Self::Emvspassword => "EMVSPASSWORD",
            Self::Emvssaf2err => "EMVSSAF2ERR",
            Self::Emvssafextrerr => "EMVSSAFEXTRERR",
            Self::Enosys => "ENOSYS",
            Self::Eperm => "EPERM",
            Self::Esrch => "ESRCH",
        }
    }

    pub const fn errno(&self) -> i32 {
        match self {
            Self::Eacces => 111,
            Self::Einval => 121,
            Self::Emvserr => 157,
            Self::Emvsexpire => 168,
            Self::Emvspassword => 169,
            Self::Emvssaf2err => 164,
            Self::Emvssafextrerr => 163,
            Self::Enosys => 134,
            Self::Eperm => 139,
            Self::Esrch => 143,
        }
    }

    pub const fn explanation(&self) -> &'static str {
        match self {
            Self::Eacces => "Permission is denied; the specified password is incorrect",
            Self::Einval => "Invalid input parameters",
            Self::Emvserr => "An MVS environmental error has been detected",
            Self::Emvsexpire => "The password for the specified identity has expired",
            Self::Emvspassword => "The new password is not valid",
            Self::Emvssaf2err => "An error occurred in the security product",
            Self::Emvssafextrerr => "A SAF authorization error has occurred",
            Self::Enosys => "The function is not supported on this system",
            Self::Eperm => {
                "The calling address space is not authorized to use this service or a load \
                 from a not program-controlled library was done in the address space"
            }
            Self::Esrch => "The identity that was specified is not defined to the security product",
        }
    }

    pub const fn classification(&self) -> ErrorClassification {
        match self {
            Self::Emvserr | Self::Emvssaf2err | Self::Enosys | Self::Eperm => {
                ErrorClassification::Internal
            }
            Self::Emvsexpire | Self::Emvspassword => ErrorClassification::UserExplained,
            Self::Eacces | Self::Einval | Self::Emvssafextrerr | Self::Esrch => {
                ErrorClassification::Default
            }
        }
    }
}

impl fmt::Display for PlatformErrno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.short_name(), self.errno())
    }
}

/// Flat view of a catalog entry, used when the catalog is serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrnoEntry {
    pub short_name: &'static str,
    pub errno: i32,
    pub explanation: &'static str,
    pub classification: ErrorClassification,
}

impl From<PlatformErrno> for ErrnoEntry {
    fn from(entry: PlatformErrno) -> Self {
        Self {
            short_name: entry.short_name(),
            errno: entry.errno(),
            explanation: entry.explanation(),
            classification: entry.classification(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
