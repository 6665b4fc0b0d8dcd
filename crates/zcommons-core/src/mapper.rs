//! Classification of platform results into application errors.
//!
//! Mapping algorithm for a failed `PlatformReturned`:
//!
//! 1. Look up `return_code` in the [`PlatformErrno`] catalog. `reason_code`
//!    never influences classification.
//! 2. Unknown code → `DEFAULT` with [`GENERIC_FAILURE_EXPLANATION`].
//! 3. `INTERNAL` entry → [`GENERIC_INTERNAL_EXPLANATION`] externally; the
//!    catalog text goes to the log detail only.
//! 4. Any other entry → the entry's classification and explanation.
//!
//! Every failure is logged with full detail before it is returned. Nothing
//! here retries.

use tracing::{error, warn};

use zcommons_contracts::{
    error::{PlatformError, PlatformResult},
    failure::{ErrorClassification, FailureKind, PlatformFailure},
    platform::SecurityOperation,
    returned::PlatformReturned,
};

use crate::errno::PlatformErrno;

/// Caller-facing text for codes the catalog does not know.
pub const GENERIC_FAILURE_EXPLANATION: &str = "authentication or authorization failed";

/// Caller-facing text for any `INTERNAL` failure.
pub const GENERIC_INTERNAL_EXPLANATION: &str =
    "An internal error occurred while contacting the security service";

/// Code reported when the adapter could not be called at all.
pub const UNAVAILABLE_CODE: i32 = -1;

/// Classify one platform result. Success maps to `Ok(())`.
pub fn map_returned(
    operation: SecurityOperation,
    returned: &PlatformReturned,
) -> Result<(), PlatformFailure> {
    if returned.is_success() {
        return Ok(());
    }

    let code = returned.return_code();
    let entry = PlatformErrno::lookup(code);
    let detail = describe(entry, returned);

    let failure = match entry {
        None => PlatformFailure::new(
            FailureKind::AuthFailure,
            operation,
            ErrorClassification::Default,
            GENERIC_FAILURE_EXPLANATION,
            code,
        ),
        Some(entry) => match entry.classification() {
            ErrorClassification::Internal => PlatformFailure::new(
                FailureKind::Internal,
                operation,
                ErrorClassification::Internal,
                GENERIC_INTERNAL_EXPLANATION,
                code,
            ),
            classification => PlatformFailure::new(
                FailureKind::AuthFailure,
                operation,
                classification,
                entry.explanation(),
                code,
            ),
        },
    }
    .with_reason_code(returned.reason_code())
    .with_detail(detail);

    log_failure(&failure);
    Err(failure)
}

/// Classify an adapter outcome, folding adapter errors into `INTERNAL`.
pub fn map_outcome(
    operation: SecurityOperation,
    outcome: PlatformResult<PlatformReturned>,
) -> Result<(), PlatformFailure> {
    match outcome {
        Ok(returned) => map_returned(operation, &returned),
        Err(err) => Err(map_unavailable(operation, &err)),
    }
}

/// Turn an adapter error into a logged `INTERNAL` failure.
pub fn map_unavailable(operation: SecurityOperation, err: &PlatformError) -> PlatformFailure {
    let failure = PlatformFailure::new(
        FailureKind::Internal,
        operation,
        ErrorClassification::Internal,
        GENERIC_INTERNAL_EXPLANATION,
        UNAVAILABLE_CODE,
    )
    .with_detail(err.to_string());

    log_failure(&failure);
    failure
}

fn describe(entry: Option<PlatformErrno>, returned: &PlatformReturned) -> String {
    let mut detail = match entry {
        Some(entry) => format!("{}: {}", entry, entry.explanation()),
        None => format!("unrecognized return code {}", returned.return_code()),
    };
    detail.push_str(&format!("; reason code 0x{:08X}", returned.reason_code()));
    if let Some(text) = returned.reason_text() {
        detail.push_str("; host text: ");
        detail.push_str(text);
    }
    detail
}

fn log_failure(failure: &PlatformFailure) {
    match failure.kind() {
        FailureKind::Internal => error!(
            operation = %failure.operation(),
            code = failure.code(),
            reason_code = failure.reason_code(),
            detail = %failure.detail(),
            "security service failure"
        ),
        FailureKind::AuthFailure => warn!(
            operation = %failure.operation(),
            classification = %failure.classification(),
            code = failure.code(),
            reason_code = failure.reason_code(),
            detail = %failure.detail(),
            "security request denied"
        ),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use zcommons_contracts::{
        error::PlatformError,
        failure::{ErrorClassification, FailureKind},
        platform::SecurityOperation,
        returned::PlatformReturned,
    };

    use super::*;

    // ── Log capture ──────────────────────────────────────────────────────────

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a subscriber that writes plain text into a buffer.
    fn capture_logs<F: FnOnce()>(f: F) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn auth_failure(rc: i32) -> PlatformFailure {
        map_returned(SecurityOperation::Authenticate, &PlatformReturned::failure(rc, 0))
            .expect_err("failure result must map to an error")
    }

    // ── Scenarios ────────────────────────────────────────────────────────────

    #[test]
    fn wrong_password() {
        let failure = auth_failure(111);
        assert_eq!(failure.kind(), FailureKind::AuthFailure);
        assert_eq!(failure.classification(), ErrorClassification::Default);
        assert_eq!(
            failure.explanation(),
            "Permission is denied; the specified password is incorrect"
        );
        assert_eq!(failure.code(), 111);
    }

    #[test]
    fn expired_password() {
        let failure = auth_failure(168);
        assert_eq!(failure.classification(), ErrorClassification::UserExplained);
        assert_eq!(
            failure.explanation(),
            "The password for the specified identity has expired"
        );
        assert_eq!(failure.code(), 168);
    }

    #[test]
    fn unknown_identity() {
        let failure = auth_failure(143);
        assert_eq!(failure.classification(), ErrorClassification::Default);
        assert_eq!(
            failure.explanation(),
            "The identity that was specified is not defined to the security product"
        );
        assert_eq!(failure.code(), 143);
    }

    #[test]
    fn internal_host_error_hides_detail_but_logs_it() {
        let mut result = None;
        let logs = capture_logs(|| {
            result = Some(map_returned(
                SecurityOperation::Authenticate,
                &PlatformReturned::failure(157, 0x0BE8_0C0A),
            ));
        });

        let failure = result.unwrap().unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Internal);
        assert_eq!(failure.classification(), ErrorClassification::Internal);
        assert_eq!(failure.explanation(), GENERIC_INTERNAL_EXPLANATION);
        assert_eq!(failure.code(), 157);
        assert!(!failure.to_string().contains("MVS environmental"));

        assert!(
            logs.contains("An MVS environmental error has been detected"),
            "log must carry the catalog text: {logs}"
        );
        assert!(logs.contains("0x0BE80C0A"), "log must carry the reason code: {logs}");
        assert!(logs.contains("ERROR"), "internal failures log at error level: {logs}");
    }

    #[test]
    fn unknown_code_is_default_with_generic_text() {
        let failure = auth_failure(9999);
        assert_eq!(failure.kind(), FailureKind::AuthFailure);
        assert_eq!(failure.classification(), ErrorClassification::Default);
        assert_eq!(failure.explanation(), GENERIC_FAILURE_EXPLANATION);
        assert_eq!(failure.code(), 9999);
    }

    #[test]
    fn success_maps_to_ok() {
        let logs = capture_logs(|| {
            assert!(map_returned(SecurityOperation::Authenticate, &PlatformReturned::ok()).is_ok());
        });
        assert!(logs.is_empty(), "success must not log a failure: {logs}");
    }

    // ── Laws ─────────────────────────────────────────────────────────────────

    #[test]
    fn every_unknown_code_maps_to_default() {
        for code in (-50..400).filter(|c| PlatformErrno::lookup(*c).is_none()) {
            let failure = auth_failure(code);
            assert_eq!(failure.classification(), ErrorClassification::Default, "code {code}");
            assert_eq!(failure.explanation(), GENERIC_FAILURE_EXPLANATION);
            assert_eq!(failure.code(), code);
        }
    }

    #[test]
    fn internal_explanations_never_reveal_catalog_text() {
        for entry in PlatformErrno::ALL
            .iter()
            .filter(|e| e.classification() == ErrorClassification::Internal)
        {
            let failure = auth_failure(entry.errno());
            assert_eq!(failure.kind(), FailureKind::Internal);
            assert!(!failure.explanation().contains(entry.explanation()), "{entry}");
            assert!(!failure.to_string().contains(entry.explanation()), "{entry}");
            assert!(failure.detail().contains(entry.explanation()), "{entry}");
        }
    }

    #[test]
    fn reason_code_does_not_affect_classification() {
        for entry in PlatformErrno::ALL {
            let plain = auth_failure(entry.errno());
            let with_reason = map_returned(
                SecurityOperation::Authenticate,
                &PlatformReturned::failure(entry.errno(), 0x7FFF_0001).with_reason_text("EDC"),
            )
            .unwrap_err();

            assert_eq!(plain.classification(), with_reason.classification());
            assert_eq!(plain.explanation(), with_reason.explanation());
            assert_eq!(with_reason.reason_code(), 0x7FFF_0001);
            assert!(with_reason.detail().contains("host text: EDC"));
        }
    }

    #[test]
    fn operation_is_carried_through() {
        let failure = map_returned(
            SecurityOperation::CheckAccess,
            &PlatformReturned::failure(111, 0),
        )
        .unwrap_err();
        assert_eq!(failure.operation(), SecurityOperation::CheckAccess);
    }

    // ── Adapter errors ───────────────────────────────────────────────────────

    #[test]
    fn adapter_error_folds_into_internal() {
        let err = PlatformError::Unavailable {
            reason: "host security services require z/OS".to_string(),
        };

        let mut result = None;
        let logs = capture_logs(|| {
            result = Some(map_outcome(SecurityOperation::Authenticate, Err(err)));
        });

        let failure = result.unwrap().unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Internal);
        assert_eq!(failure.code(), UNAVAILABLE_CODE);
        assert_eq!(failure.explanation(), GENERIC_INTERNAL_EXPLANATION);
        assert!(!failure.explanation().contains("z/OS"));
        assert!(logs.contains("host security services require z/OS"), "{logs}");
    }

    #[test]
    fn outcome_success_maps_to_ok() {
        assert!(map_outcome(SecurityOperation::CheckAccess, Ok(PlatformReturned::ok())).is_ok());
    }
}
