//! USB SETUP packet decoding
//!
//! Every USB control transfer begins with an 8-byte SETUP packet:
//!
//! ```text
//! [bmRequestType:1][bRequest:1][wValue:2 LE][wIndex:2 LE][wLength:2 LE]
//! ```
//!
//! Multi-byte fields are little-endian per the USB specification, regardless
//! of host byte order.

/// Size of a USB SETUP packet in bytes
pub const SETUP_SIZE: usize = 8;

/// bmRequestType bit: data stage flows device-to-host
pub const DIR_IN: u8 = 0x80;

/// bmRequestType bits: vendor-defined request
pub const TYPE_VENDOR: u8 = 0x40;

/// Vendor request with IN direction, device recipient
pub const REQUEST_TYPE_VENDOR_IN: u8 = DIR_IN | TYPE_VENDOR;

/// bRequest code of the registrar's "ready" query
pub const VENDOR_REQUEST_READY: u8 = 0x01;

/// Decoded USB SETUP packet
///
/// Constructed per control transfer and discarded after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupPacket {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl SetupPacket {
    /// Decode a SETUP packet from its 8-byte wire form
    pub fn parse(raw: &[u8; SETUP_SIZE]) -> Self {
        Self {
            request_type: raw[0],
            request: raw[1],
            value: u16::from_le_bytes([raw[2], raw[3]]),
            index: u16::from_le_bytes([raw[4], raw[5]]),
            length: u16::from_le_bytes([raw[6], raw[7]]),
        }
    }

    /// Data stage flows device-to-host
    pub fn is_in(&self) -> bool {
        self.request_type & DIR_IN != 0
    }

    /// Request is vendor-defined
    pub fn is_vendor(&self) -> bool {
        self.request_type & TYPE_VENDOR != 0
    }

    /// The one request this registrar answers: vendor-IN "ready"
    pub fn is_vendor_ready(&self) -> bool {
        self.request_type == REQUEST_TYPE_VENDOR_IN && self.request == VENDOR_REQUEST_READY
    }
}
