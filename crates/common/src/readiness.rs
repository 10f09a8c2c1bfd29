//! Shared readiness cell
//!
//! The gadget's liveness watcher writes a single readiness byte; the ep0
//! event loop reads it on every vendor "ready" request and reports it to the
//! host verbatim. One writer, any number of readers, no locking: the value is
//! a single byte with no composite invariant, so an atomic cell is all the
//! synchronization this needs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Cloneable handle to the process-wide readiness byte
///
/// 0 means not ready; any nonzero value means ready. Constructed once during
/// bootstrap and passed explicitly to both the liveness watcher and the event
/// loop.
#[derive(Debug, Clone, Default)]
pub struct Readiness {
    cell: Arc<AtomicU8>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new readiness value
    pub fn store(&self, value: u8) {
        self.cell.store(value, Ordering::Release);
    }

    /// Read the most recently published value
    pub fn load(&self) -> u8 {
        self.cell.load(Ordering::Acquire)
    }

    pub fn is_ready(&self) -> bool {
        self.load() != 0
    }
}
