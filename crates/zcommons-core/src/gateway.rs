//! The security gateway: one adapter plus the result mapper.
//!
//! REST handlers talk to a `SecurityGateway`, never to an adapter directly.
//! Every call follows the same path:
//!
//!   adapter call → `PlatformReturned` / `PlatformError` → mapper → `PlatformFailure`
//!
//! so the classification a caller sees depends only on the catalog, never
//! on which adapter variant is plugged in.

use tracing::debug;

use zcommons_contracts::{
    failure::PlatformFailure,
    platform::{AccessLevel, PlatformVariant, Resource, SecurityOperation},
};

use crate::mapper::{map_outcome, map_unavailable};
use crate::traits::SecurityPlatform;

/// Front door to the platform security services.
///
/// Construct once at startup with the selected adapter and share it
/// (it is `Send + Sync` because every adapter is).
pub struct SecurityGateway {
    platform: Box<dyn SecurityPlatform>,
}

impl SecurityGateway {
    pub fn new(platform: Box<dyn SecurityPlatform>) -> Self {
        Self { platform }
    }

    pub fn variant(&self) -> PlatformVariant {
        self.platform.variant()
    }

    /// Verify a user's password.
    ///
    /// # Errors
    ///
    /// `AUTH_FAILURE` for any refusal, `INTERNAL` when the security service
    /// is broken or unreachable. Never retried.
    pub fn authenticate(&self, userid: &str, password: &str) -> Result<(), PlatformFailure> {
        debug!(variant = %self.variant(), userid = %userid, "authenticating");
        map_outcome(
            SecurityOperation::Authenticate,
            self.platform.authenticate(userid, password),
        )
    }

    /// Change a user's password.
    pub fn change_password(
        &self,
        userid: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), PlatformFailure> {
        debug!(variant = %self.variant(), userid = %userid, "changing password");
        map_outcome(
            SecurityOperation::ChangePassword,
            self.platform.change_password(userid, old_password, new_password),
        )
    }

    /// Check access for the current principal.
    pub fn check_access(&self, resource: &Resource, level: AccessLevel) -> Result<(), PlatformFailure> {
        debug!(variant = %self.variant(), resource = %resource, level = %level, "checking access");
        map_outcome(
            SecurityOperation::CheckAccess,
            self.platform.check_access(resource, level),
        )
    }

    /// Check access for a named user.
    pub fn check_user_access(
        &self,
        userid: &str,
        resource: &Resource,
        level: AccessLevel,
    ) -> Result<(), PlatformFailure> {
        debug!(
            variant = %self.variant(),
            userid = %userid,
            resource = %resource,
            level = %level,
            "checking user access"
        );
        map_outcome(
            SecurityOperation::CheckAccess,
            self.platform.check_user_access(userid, resource, level),
        )
    }

    /// The currently effective security principal.
    pub fn current_user(&self) -> Result<String, PlatformFailure> {
        self.platform
            .current_user()
            .map_err(|err| map_unavailable(SecurityOperation::CurrentUser, &err))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
