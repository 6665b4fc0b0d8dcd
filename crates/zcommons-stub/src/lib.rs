//! # zcommons-stub
//!
//! An in-memory implementation of the platform security seam for running
//! off z/OS, in development and in unit tests.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use zcommons_stub::{StubPlatform, StubUser};
//!
//! let stub = StubPlatform::new();
//! stub.add_user(StubUser::new("ZOWE", "zowe"))?;
//! // Pass `Box::new(stub)` to `zcommons_core::SecurityGateway::new(...)`.
//! ```
//!
//! Refusals carry the same errno values the host would return, so the
//! result mapper classifies them identically.

pub mod fixture;
pub mod platform;

pub use fixture::{ScriptedOutcome, StubFixture, StubGrant, StubUser};
pub use platform::{StubCall, StubPlatform};

// ── Tests ─────────────────────────────────────────────────────────────────────
