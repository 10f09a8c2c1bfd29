//! Wire formats for the FFS registrar
//!
//! This crate defines the fixed-layout binary formats exchanged with the
//! kernel over the FunctionFS `ep0` control endpoint: the 8-byte USB SETUP
//! packet, the fixed-size ep0 event record that embeds it, and the vendor
//! "ready" reply the registrar answers with.
//!
//! All layouts are decoded explicitly by byte offset and endianness; nothing
//! here relies on in-memory struct representation.
//!
//! # Example
//!
//! ```
//! use protocol::{Ep0Event, SetupPacket, ReadyReply, EVENT_SIZE};
//!
//! // A SETUP event frame as read from ep0: vendor-IN "ready" request, wLength 8.
//! let mut frame = [0u8; EVENT_SIZE];
//! frame[0..8].copy_from_slice(&[0xC0, 0x01, 0, 0, 0, 0, 0x08, 0x00]);
//! frame[8] = 4; // SETUP discriminator
//!
//! let Ep0Event::Setup(raw) = Ep0Event::parse(&frame).unwrap() else {
//!     unreachable!();
//! };
//! let setup = SetupPacket::parse(&raw);
//! assert!(setup.is_vendor_ready());
//!
//! let reply = ReadyReply { ready: 1 }.encode(setup.length);
//! assert_eq!(&reply[..4], b"TZSG");
//! ```

pub mod error;
pub mod event;
pub mod reply;
pub mod setup;

pub use error::{ProtocolError, Result};
pub use event::{EVENT_SIZE, Ep0Event};
pub use reply::{PROTOCOL_VERSION, READY_REPLY_SIZE, REPLY_MAGIC, ReadyReply};
pub use setup::{
    DIR_IN, REQUEST_TYPE_VENDOR_IN, SETUP_SIZE, SetupPacket, TYPE_VENDOR, VENDOR_REQUEST_READY,
};
