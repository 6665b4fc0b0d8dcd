//! `HostPlatform`: the `real` variant of the security seam.

use tracing::{debug, info};
use zeroize::Zeroizing;

use zcommons_contracts::{
    error::PlatformResult,
    platform::{AccessLevel, PlatformVariant, Resource, SecurityOperation},
    returned::PlatformReturned,
};
use zcommons_core::{errno::PlatformErrno, traits::SecurityPlatform};

use crate::decompose::HostCallResult;
use crate::sys;

/// NUL-terminated copy of one call argument. Wiped on drop.
type CBuffer = Zeroizing<Vec<u8>>;

/// Copy `value` into a NUL-terminated buffer. Embedded NULs would silently
/// truncate the argument, so they are refused as EINVAL.
pub(crate) fn encode(field: &str, value: &str) -> Result<CBuffer, HostCallResult> {
    if value.as_bytes().contains(&0) {
        return Err(HostCallResult::rejected(
            PlatformErrno::Einval,
            format!("{field} contains a NUL byte"),
        ));
    }
    let mut buffer = Zeroizing::new(Vec::with_capacity(value.len() + 1));
    buffer.extend_from_slice(value.as_bytes());
    buffer.push(0);
    Ok(buffer)
}

/// Access attribute for a requested level. `None` needs no host call.
pub(crate) fn access_attribute(level: AccessLevel) -> Option<u32> {
    match level {
        AccessLevel::None => None,
        AccessLevel::Read => Some(sys::ACCESS_READ),
        AccessLevel::Update => Some(sys::ACCESS_UPDATE),
        AccessLevel::Control => Some(sys::ACCESS_CONTROL),
        AccessLevel::Alter => Some(sys::ACCESS_ALTER),
    }
}

fn normalize(userid: &str) -> String {
    userid.trim().to_uppercase()
}

fn passwd_args(
    userid: &str,
    password: &str,
    new_password: Option<&str>,
) -> Result<(CBuffer, CBuffer, Option<CBuffer>), HostCallResult> {
    let userid = encode("userid", &normalize(userid))?;
    let password = encode("password", password)?;
    let new_password = new_password
        .map(|p| encode("new password", p))
        .transpose()?;
    Ok((userid, password, new_password))
}

fn resource_args(
    userid: Option<&str>,
    resource: &Resource,
) -> Result<(Option<CBuffer>, CBuffer, CBuffer), HostCallResult> {
    let userid = userid
        .map(|u| encode("userid", &normalize(u)))
        .transpose()?;
    let class = encode("resource class", resource.class())?;
    let entity = encode("resource entity", resource.entity())?;
    Ok((userid, class, entity))
}

fn finish(operation: SecurityOperation, result: HostCallResult) -> PlatformReturned {
    debug!(
        operation = %operation,
        rc = result.rc,
        errno = result.errno,
        errno2 = result.errno2,
        "host security call returned"
    );
    result.decompose()
}

/// Security platform bound to z/OS UNIX System Services.
///
/// Only constructible where the services exist; see [`HostPlatform::new`].
#[derive(Debug)]
pub struct HostPlatform {
    _bound: (),
}

impl HostPlatform {
    /// Bind to the host services. Fails with `PlatformError::Unavailable`
    /// on any target other than z/OS.
    pub fn new() -> PlatformResult<Self> {
        sys::ensure_available()?;
        info!("bound to z/OS security services");
        Ok(Self { _bound: () })
    }

    fn passwd(
        &self,
        operation: SecurityOperation,
        userid: &str,
        password: &str,
        new_password: Option<&str>,
    ) -> PlatformResult<PlatformReturned> {
        let result = match passwd_args(userid, password, new_password) {
            Ok((userid, password, new_password)) => {
                sys::passwd(&userid, &password, new_password.as_deref().map(Vec::as_slice))?
            }
            Err(rejected) => rejected,
        };
        Ok(finish(operation, result))
    }

    fn resource_auth(
        &self,
        userid: Option<&str>,
        resource: &Resource,
        level: AccessLevel,
    ) -> PlatformResult<PlatformReturned> {
        let Some(access) = access_attribute(level) else {
            return Ok(PlatformReturned::ok());
        };

        let result = match resource_args(userid, resource) {
            Ok((userid, class, entity)) => {
                sys::check_resource_auth(userid.as_deref().map(Vec::as_slice), &class, &entity, access)?
            }
            Err(rejected) => rejected,
        };
        Ok(finish(SecurityOperation::CheckAccess, result))
    }
}

impl SecurityPlatform for HostPlatform {
    fn variant(&self) -> PlatformVariant {
        PlatformVariant::Real
    }

    fn authenticate(&self, userid: &str, password: &str) -> PlatformResult<PlatformReturned> {
        self.passwd(SecurityOperation::Authenticate, userid, password, None)
    }

    fn change_password(
        &self,
        userid: &str,
        old_password: &str,
        new_password: &str,
    ) -> PlatformResult<PlatformReturned> {
        self.passwd(
            SecurityOperation::ChangePassword,
            userid,
            old_password,
            Some(new_password),
        )
    }

    fn check_access(&self, resource: &Resource, level: AccessLevel) -> PlatformResult<PlatformReturned> {
        self.resource_auth(None, resource, level)
    }

    fn check_user_access(
        &self,
        userid: &str,
        resource: &Resource,
        level: AccessLevel,
    ) -> PlatformResult<PlatformReturned> {
        self.resource_auth(Some(userid), resource, level)
    }

    fn current_user(&self) -> PlatformResult<String> {
        sys::login_name()
    }
}
