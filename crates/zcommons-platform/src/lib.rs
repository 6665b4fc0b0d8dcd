//! # zcommons-platform
//!
//! Loads the platform configuration and selects the security adapter once
//! at startup.
//!
//! ```rust,ignore
//! use zcommons_platform::{build_gateway, PlatformConfig};
//!
//! let config = PlatformConfig::from_file(Path::new("config/platform.toml"))?;
//! let gateway = build_gateway(&config)?;
//! ```

pub mod config;
pub mod factory;

pub use config::PlatformConfig;
pub use factory::{build_gateway, build_platform};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use zcommons_contracts::{
        error::PlatformError,
        failure::{ErrorClassification, FailureKind},
        platform::{AccessLevel, PlatformVariant, Resource, SecurityOperation},
        returned::PlatformReturned,
    };
    use zcommons_core::{
        errno::PlatformErrno,
        mapper::{map_returned, GENERIC_FAILURE_EXPLANATION, GENERIC_INTERNAL_EXPLANATION},
        traits::SecurityPlatform,
        ErrorResponse,
    };
    use zcommons_host::HostCallResult;
    use zcommons_stub::StubPlatform;

    use crate::{build_gateway, build_platform, PlatformConfig};

    const BUNDLED: &str = include_str!("../../../config/platform.toml");

    fn bundled() -> PlatformConfig {
        PlatformConfig::from_toml_str(BUNDLED).unwrap()
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    #[test]
    fn bundled_config_parses() {
        let config = bundled();
        assert_eq!(config.mode(), PlatformVariant::Stub);
        assert_eq!(config.stub.current_user, "ZOWE");
        assert_eq!(config.stub.users.len(), 4);
        assert_eq!(config.stub.grants.len(), 2);
        assert_eq!(config.stub.outcomes[0].return_code, 157);
    }

    #[test]
    fn empty_config_follows_build_target() {
        let config = PlatformConfig::from_toml_str("").unwrap();
        assert_eq!(config.mode(), PlatformVariant::default());
        assert!(config.stub.users.is_empty());
    }

    #[test]
    fn mode_override() {
        let config = bundled().with_mode(PlatformVariant::Real);
        assert_eq!(config.mode(), PlatformVariant::Real);
    }

    #[test]
    fn unknown_mode_is_config_error() {
        let toml = "[platform.security]\nmode = \"mock\"\n";
        match PlatformConfig::from_toml_str(toml) {
            Err(PlatformError::ConfigError { reason }) => {
                assert!(reason.contains("platform configuration"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn debug_output_hides_stub_passwords() {
        let printed = format!("{:?}", bundled());
        assert!(printed.contains("IBMUSER"));
        assert!(!printed.contains("sys1"), "password leaked: {printed}");
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let result = PlatformConfig::from_file(std::path::Path::new("/nonexistent/platform.toml"));
        assert!(matches!(result, Err(PlatformError::ConfigError { .. })));
    }

    // ── Factory ───────────────────────────────────────────────────────────────

    #[test]
    fn stub_mode_builds_seeded_stub() {
        let platform = build_platform(&bundled()).unwrap();
        assert_eq!(platform.variant(), PlatformVariant::Stub);
        assert_eq!(platform.current_user().unwrap(), "ZOWE");
        assert!(platform.authenticate("zowe", "zowe").unwrap().is_success());
    }

    #[cfg(not(target_os = "zos"))]
    #[test]
    fn real_mode_off_zos_is_unavailable() {
        let config = bundled().with_mode(PlatformVariant::Real);
        match build_gateway(&config) {
            Err(PlatformError::Unavailable { .. }) => {}
            Err(other) => panic!("expected Unavailable, got {:?}", other),
            Ok(_) => panic!("real variant must not build off z/OS"),
        }
    }

    // ── End-to-end scenarios ──────────────────────────────────────────────────

    #[test]
    fn valid_credentials_pass_the_gateway() {
        let gateway = build_gateway(&bundled()).unwrap();
        assert!(gateway.authenticate("ZOWE", "zowe").is_ok());
        assert!(gateway
            .check_access(&Resource::new("FACILITY", "ZOWE.SAMPLE"), AccessLevel::Read)
            .is_ok());
        assert_eq!(gateway.current_user().unwrap(), "ZOWE");
    }

    #[test]
    fn wrong_password_is_401_with_generic_body() {
        let gateway = build_gateway(&bundled()).unwrap();
        let failure = gateway.authenticate("ZOWE", "wrong").unwrap_err();
        assert_eq!(failure.kind(), FailureKind::AuthFailure);
        assert_eq!(failure.classification(), ErrorClassification::Default);
        assert_eq!(failure.code(), 111);
        assert_eq!(
            failure.explanation(),
            "Permission is denied; the specified password is incorrect"
        );

        let response = ErrorResponse::from(&failure);
        assert_eq!(response.status, 401);
        assert_eq!(response.body.message_content(), GENERIC_FAILURE_EXPLANATION);
    }

    #[test]
    fn unknown_user_and_wrong_password_look_the_same() {
        let gateway = build_gateway(&bundled()).unwrap();
        let unknown = ErrorResponse::from(gateway.authenticate("NOSUCHUSER", "x").unwrap_err());
        let wrong = ErrorResponse::from(gateway.authenticate("ZOWE", "x").unwrap_err());

        assert_eq!(unknown.status, wrong.status);
        let unknown: serde_json::Value = serde_json::from_str(&unknown.to_json().unwrap()).unwrap();
        let wrong: serde_json::Value = serde_json::from_str(&wrong.to_json().unwrap()).unwrap();
        assert_eq!(unknown["messageContent"], wrong["messageContent"]);
        assert_eq!(unknown["messageNumber"], wrong["messageNumber"]);
    }

    #[test]
    fn expired_password_is_user_explained() {
        let gateway = build_gateway(&bundled()).unwrap();
        let failure = gateway.authenticate("EXPIRED", "expired").unwrap_err();
        assert_eq!(failure.classification(), ErrorClassification::UserExplained);
        assert_eq!(failure.explanation(), "The password for the specified identity has expired");
    }

    #[test]
    fn broken_security_product_is_500_with_generic_text() {
        let gateway = build_gateway(&bundled()).unwrap();
        let failure = gateway.authenticate("BROKEN", "anything").unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Internal);
        assert_eq!(failure.code(), 157);
        assert!(failure.detail().contains("EDC5157I"));

        let response = ErrorResponse::from(failure);
        assert_eq!(response.status, 500);
        assert_eq!(response.body.message_content(), GENERIC_INTERNAL_EXPLANATION);
    }

    #[test]
    fn insufficient_access_is_403() {
        let gateway = build_gateway(&bundled()).unwrap();
        let failure = gateway
            .check_access(&Resource::new("FACILITY", "ZOWE.SAMPLE"), AccessLevel::Update)
            .unwrap_err();
        assert_eq!(failure.operation(), SecurityOperation::CheckAccess);
        assert_eq!(ErrorResponse::from(&failure).status, 403);
    }

    // ── Variant parity ────────────────────────────────────────────────────────

    #[test]
    fn stub_and_host_results_classify_identically() {
        let stub = StubPlatform::new();
        let codes = PlatformErrno::ALL
            .iter()
            .map(|entry| entry.errno())
            .chain([0, 1, 112, 999]);

        for code in codes {
            let host = HostCallResult {
                rc: -1,
                errno: code,
                errno2: 0x0B0C_0001,
                message: None,
            }
            .decompose();

            stub.script(
                "PARITY",
                SecurityOperation::Authenticate,
                PlatformReturned::failure(code, 0x0B0C_0001),
            )
            .unwrap();
            let stubbed = stub.authenticate("parity", "x").unwrap();

            let from_host = map_returned(SecurityOperation::Authenticate, &host).unwrap_err();
            let from_stub = map_returned(SecurityOperation::Authenticate, &stubbed).unwrap_err();
            assert_eq!(from_host.kind(), from_stub.kind(), "code {code}");
            assert_eq!(from_host.classification(), from_stub.classification(), "code {code}");
            assert_eq!(from_host.explanation(), from_stub.explanation(), "code {code}");
            assert_eq!(from_host.code(), code);
        }
    }

    #[test]
    fn unknown_code_is_default_on_both_variants() {
        let host = HostCallResult {
            rc: -1,
            errno: 4242,
            errno2: 0,
            message: Some("unexpected".into()),
        };
        let failure = map_returned(SecurityOperation::Authenticate, &host.decompose()).unwrap_err();
        assert_eq!(failure.classification(), ErrorClassification::Default);
        assert_eq!(failure.explanation(), GENERIC_FAILURE_EXPLANATION);
    }

    #[test]
    fn classification_is_stable_across_threads() {
        let gateway = Arc::new(build_gateway(&bundled()).unwrap());

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let gateway = Arc::clone(&gateway);
                std::thread::spawn(move || {
                    let failure = gateway.authenticate("BROKEN", "x").unwrap_err();
                    (failure.kind(), failure.classification(), failure.code())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                (FailureKind::Internal, ErrorClassification::Internal, 157)
            );
        }
    }
}
