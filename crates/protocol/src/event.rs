//! FunctionFS ep0 event records
//!
//! Reading the `ep0` file of a bound FunctionFS function yields fixed-size
//! event records (`usb_functionfs_event` in the kernel UAPI):
//!
//! ```text
//! [setup: 8 bytes][type: 1 byte][pad: 3 bytes]
//! ```
//!
//! The embedded setup bytes are only meaningful for `SETUP` events; lifecycle
//! events (bind/unbind, enable/disable, suspend/resume) carry none.

use crate::error::{ProtocolError, Result};
use crate::setup::SETUP_SIZE;

/// Size of one ep0 event record in bytes
pub const EVENT_SIZE: usize = 12;

/// Byte offset of the event-type discriminator within a record
const TYPE_OFFSET: usize = 8;

mod event_type {
    pub const BIND: u8 = 0;
    pub const UNBIND: u8 = 1;
    pub const ENABLE: u8 = 2;
    pub const DISABLE: u8 = 3;
    pub const SETUP: u8 = 4;
    pub const SUSPEND: u8 = 5;
    pub const RESUME: u8 = 6;
}

/// One decoded ep0 event
///
/// Only `Setup` demands a response; everything else is informational and an
/// unknown discriminator is preserved rather than rejected, so newer kernels
/// cannot break the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ep0Event {
    Bind,
    Unbind,
    Enable,
    Disable,
    /// Host-initiated control transfer; payload is the raw SETUP packet
    Setup([u8; SETUP_SIZE]),
    Suspend,
    Resume,
    Unknown(u8),
}

impl Ep0Event {
    /// Decode one event record from a buffer of at least [`EVENT_SIZE`] bytes
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < EVENT_SIZE {
            return Err(ProtocolError::ShortEvent {
                expected: EVENT_SIZE,
                actual: buf.len(),
            });
        }

        Ok(match buf[TYPE_OFFSET] {
            event_type::BIND => Self::Bind,
            event_type::UNBIND => Self::Unbind,
            event_type::ENABLE => Self::Enable,
            event_type::DISABLE => Self::Disable,
            event_type::SETUP => {
                let mut setup = [0u8; SETUP_SIZE];
                setup.copy_from_slice(&buf[..SETUP_SIZE]);
                Self::Setup(setup)
            }
            event_type::SUSPEND => Self::Suspend,
            event_type::RESUME => Self::Resume,
            other => Self::Unknown(other),
        })
    }
}
