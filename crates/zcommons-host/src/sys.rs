//! Thin bindings to the z/OS UNIX security services.
//!
//! Every function takes NUL-terminated byte buffers and returns the raw
//! `HostCallResult`; interpretation happens in `decompose`. On any target
//! other than z/OS the same functions exist and report the services as
//! unavailable.

use zcommons_contracts::error::{PlatformError, PlatformResult};

use crate::decompose::HostCallResult;

/// `__check_resource_auth_np` access attribute bytes.
pub const ACCESS_READ: u32 = 0x02;
pub const ACCESS_UPDATE: u32 = 0x04;
pub const ACCESS_CONTROL: u32 = 0x08;
pub const ACCESS_ALTER: u32 = 0x80;

#[cfg(target_os = "zos")]
mod ffi {
    use std::os::raw::{c_char, c_int, c_uint, c_void};

    extern "C" {
        pub fn __passwd(
            username: *const c_char,
            oldpass: *const c_char,
            newpass: *const c_char,
        ) -> c_int;

        pub fn __check_resource_auth_np(
            reserved1: *const c_void,
            reserved2: *const c_void,
            username: *const c_char,
            class_name: *const c_char,
            entity_name: *const c_char,
            access_type: c_uint,
        ) -> c_int;

        pub fn __errno2() -> c_int;

        pub fn getlogin() -> *mut c_char;
    }
}

#[cfg(target_os = "zos")]
fn capture(rc: i32) -> HostCallResult {
    if rc == 0 {
        return HostCallResult::success();
    }
    let last = std::io::Error::last_os_error();
    // SAFETY: __errno2 only reads thread-local state.
    let errno2 = unsafe { ffi::__errno2() };
    HostCallResult {
        rc,
        errno: last.raw_os_error().unwrap_or(0),
        errno2,
        message: Some(last.to_string()),
    }
}

#[cfg(target_os = "zos")]
pub fn ensure_available() -> PlatformResult<()> {
    Ok(())
}

/// Verify `password` for `userid`, or change it when `new_password` is set.
#[cfg(target_os = "zos")]
pub fn passwd(
    userid: &[u8],
    password: &[u8],
    new_password: Option<&[u8]>,
) -> PlatformResult<HostCallResult> {
    let new_ptr = new_password.map_or(std::ptr::null(), |p| p.as_ptr().cast());
    // SAFETY: callers pass NUL-terminated buffers that outlive the call.
    let rc = unsafe { ffi::__passwd(userid.as_ptr().cast(), password.as_ptr().cast(), new_ptr) };
    Ok(capture(rc))
}

/// Check `userid` (or the caller, when `None`) for `access` on the profile
/// protecting `entity` in `class`.
#[cfg(target_os = "zos")]
pub fn check_resource_auth(
    userid: Option<&[u8]>,
    class: &[u8],
    entity: &[u8],
    access: u32,
) -> PlatformResult<HostCallResult> {
    let user_ptr = userid.map_or(std::ptr::null(), |u| u.as_ptr().cast());
    // SAFETY: callers pass NUL-terminated buffers that outlive the call.
    let rc = unsafe {
        ffi::__check_resource_auth_np(
            std::ptr::null(),
            std::ptr::null(),
            user_ptr,
            class.as_ptr().cast(),
            entity.as_ptr().cast(),
            access,
        )
    };
    Ok(capture(rc))
}

#[cfg(target_os = "zos")]
pub fn login_name() -> PlatformResult<String> {
    // SAFETY: getlogin returns a pointer to static storage or NULL.
    let name = unsafe { ffi::getlogin() };
    if name.is_null() {
        return Err(PlatformError::Unavailable {
            reason: format!("getlogin failed: {}", std::io::Error::last_os_error()),
        });
    }
    // SAFETY: non-NULL getlogin results are NUL-terminated.
    let name = unsafe { std::ffi::CStr::from_ptr(name) };
    Ok(name.to_string_lossy().trim().to_uppercase())
}

#[cfg(not(target_os = "zos"))]
fn unavailable() -> PlatformError {
    PlatformError::Unavailable {
        reason: format!(
            "z/OS security services are not available on {}",
            std::env::consts::OS
        ),
    }
}

#[cfg(not(target_os = "zos"))]
pub fn ensure_available() -> PlatformResult<()> {
    Err(unavailable())
}

#[cfg(not(target_os = "zos"))]
pub fn passwd(
    _userid: &[u8],
    _password: &[u8],
    _new_password: Option<&[u8]>,
) -> PlatformResult<HostCallResult> {
    Err(unavailable())
}

#[cfg(not(target_os = "zos"))]
pub fn check_resource_auth(
    _userid: Option<&[u8]>,
    _class: &[u8],
    _entity: &[u8],
    _access: u32,
) -> PlatformResult<HostCallResult> {
    Err(unavailable())
}

#[cfg(not(target_os = "zos"))]
pub fn login_name() -> PlatformResult<String> {
    Err(unavailable())
}
