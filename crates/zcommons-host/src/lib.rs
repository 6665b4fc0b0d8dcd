//! # zcommons-host
//!
//! The `real` security platform: password verification and change through
//! `__passwd`, resource checks through `__check_resource_auth_np`, and the
//! caller's identity from `getlogin`.
//!
//! Only z/OS provides these services. Elsewhere the crate still builds, but
//! [`HostPlatform::new`] returns `PlatformError::Unavailable`.
//!
//! Raw results are captured as [`HostCallResult`] and decomposed into
//! `PlatformReturned` by pure code, so the mapping is tested on every target.

pub mod decompose;
pub mod platform;
mod sys;

pub use decompose::HostCallResult;
pub use platform::HostPlatform;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use zcommons_contracts::platform::{AccessLevel, Resource};

    use crate::platform::{access_attribute, encode};

    #[test]
    fn encode_appends_nul() {
        let buffer = encode("userid", "ZOWE").unwrap();
        assert_eq!(buffer.as_slice(), b"ZOWE\0");
    }

    #[test]
    fn embedded_nul_is_einval() {
        match encode("password", "ab\0cd") {
            Err(rejected) => {
                let returned = rejected.decompose();
                assert_eq!(returned.return_code(), 121);
                assert_eq!(returned.reason_text(), Some("password contains a NUL byte"));
            }
            Ok(_) => panic!("expected NUL byte to be rejected"),
        }
    }

    #[test]
    fn access_attributes_match_saf_bytes() {
        assert_eq!(access_attribute(AccessLevel::None), None);
        assert_eq!(access_attribute(AccessLevel::Read), Some(0x02));
        assert_eq!(access_attribute(AccessLevel::Update), Some(0x04));
        assert_eq!(access_attribute(AccessLevel::Control), Some(0x08));
        assert_eq!(access_attribute(AccessLevel::Alter), Some(0x80));
    }

    #[test]
    fn resource_parts_encode_normalized() {
        let resource = Resource::new("facility", "zowe.sample");
        assert_eq!(encode("class", resource.class()).unwrap().as_slice(), b"FACILITY\0");
        assert_eq!(encode("entity", resource.entity()).unwrap().as_slice(), b"ZOWE.SAMPLE\0");
    }

    #[cfg(not(target_os = "zos"))]
    #[test]
    fn host_platform_is_unavailable_off_zos() {
        use zcommons_contracts::error::PlatformError;

        match crate::HostPlatform::new() {
            Err(PlatformError::Unavailable { reason }) => {
                assert!(reason.contains("not available"), "unexpected reason: {reason}");
            }
            Err(other) => panic!("expected Unavailable, got {:?}", other),
            Ok(_) => panic!("expected Unavailable off z/OS"),
        }
    }
}
