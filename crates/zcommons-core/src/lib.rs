//! # zcommons-core
//!
//! The platform security seam for the z/OS REST-API commons.
//!
//! This crate provides:
//! - The `SecurityPlatform` trait both adapter variants implement
//! - The `PlatformErrno` catalog of password-service error numbers
//! - The result mapper that classifies failed platform calls
//! - The `SecurityGateway` that wires an adapter to the mapper
//! - `ErrorResponse`, the REST rendering of a classified failure
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zcommons_core::{SecurityGateway, ErrorResponse};
//!
//! let gateway = SecurityGateway::new(Box::new(platform));
//! if let Err(failure) = gateway.authenticate("ZOWE", password) {
//!     let response = ErrorResponse::from(&failure);
//!     // response.status, response.to_json()
//! }
//! ```

pub mod errno;
pub mod gateway;
pub mod mapper;
pub mod response;
pub mod traits;

pub use errno::PlatformErrno;
pub use gateway::SecurityGateway;
pub use mapper::{map_outcome, map_returned};
pub use response::ErrorResponse;
pub use traits::SecurityPlatform;
