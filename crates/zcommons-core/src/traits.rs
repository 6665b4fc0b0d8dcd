//! The platform security seam.
//!
//! `SecurityPlatform` is the one trait both adapter variants implement:
//!
//! - `HostPlatform` (zcommons-host) calls the z/OS UNIX security services
//! - `StubPlatform` (zcommons-stub) answers from seeded in-memory tables
//!
//! Adapters report what the platform said, nothing more. A refused password
//! is `Ok` with a failed `PlatformReturned`; `Err` is reserved for the case
//! where the platform could not be asked at all. Classification happens in
//! the result mapper, so both variants are judged by the same rules.

use zcommons_contracts::{
    error::PlatformResult,
    platform::{AccessLevel, PlatformVariant, Resource},
    returned::PlatformReturned,
};

/// Host security services as seen by the REST layer.
///
/// Implementations must be safe to call from many threads at once. Calls
/// block the invoking thread for the duration of the host call and cannot
/// be cancelled.
pub trait SecurityPlatform: Send + Sync {
    /// Which adapter variant this is.
    fn variant(&self) -> PlatformVariant;

    /// Verify `password` for `userid`.
    fn authenticate(&self, userid: &str, password: &str) -> PlatformResult<PlatformReturned>;

    /// Replace the password of `userid`, verifying `old_password` first.
    fn change_password(
        &self,
        userid: &str,
        old_password: &str,
        new_password: &str,
    ) -> PlatformResult<PlatformReturned>;

    /// Check whether the current principal holds `level` access to `resource`.
    fn check_access(&self, resource: &Resource, level: AccessLevel) -> PlatformResult<PlatformReturned>;

    /// Check whether `userid` holds `level` access to `resource`.
    fn check_user_access(
        &self,
        userid: &str,
        resource: &Resource,
        level: AccessLevel,
    ) -> PlatformResult<PlatformReturned>;

    /// Identifier of the currently effective security principal.
    fn current_user(&self) -> PlatformResult<String>;
}
