//! Adapter-level error types.
//!
//! A `PlatformError` means the security platform could not be consulted at
//! all. A *denied* request is not an error at this level: it comes back as a
//! failed `PlatformReturned` and is classified later by the result mapper.

use thiserror::Error;

/// Errors raised by platform adapters, fixtures, and configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The selected adapter cannot service calls in this process.
    ///
    /// Raised by the host variant off z/OS and by the stub when its
    /// decision tables are unusable.
    #[error("security platform unavailable: {reason}")]
    Unavailable { reason: String },

    /// A configuration or fixture document is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used by every adapter operation.
pub type PlatformResult<T> = Result<T, PlatformError>;
