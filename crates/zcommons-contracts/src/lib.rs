//! # zcommons-contracts
//!
//! Shared types, messages, and error contracts for the z/OS security
//! platform seam.
//!
//! Every crate in the workspace imports from here. No business logic lives
//! in this crate, only data definitions and error types.

pub mod error;
pub mod failure;
pub mod message;
pub mod platform;
pub mod returned;
