//! Common utilities for the FFS registrar
//!
//! This crate provides functionality shared across the workspace: error
//! handling, logging setup, the lock-free readiness cell read by the vendor
//! reply path, and a sliding-window attempt limiter.

pub mod error;
pub mod limiter;
pub mod logging;
pub mod readiness;

pub use error::{Error, Result};
pub use limiter::AttemptLimiter;
pub use logging::setup_logging;
pub use readiness::Readiness;
