//! Vendor "ready" reply
//!
//! The registrar answers its one recognized vendor request with a fixed
//! 8-byte payload, truncated to the host's `wLength`:
//!
//! ```text
//! ["TZSG"][protocol version: u16 LE][readiness: 1 byte][pad: 1 byte]
//! ```
//!
//! The host is always allowed to read less than the full reply; the device
//! must never write more than requested.

/// ASCII tag identifying the reply
pub const REPLY_MAGIC: &[u8; 4] = b"TZSG";

/// Version of the vendor reply format, little-endian on the wire
pub const PROTOCOL_VERSION: u16 = 1;

/// Full reply size in bytes
pub const READY_REPLY_SIZE: usize = 8;

/// Builder for the vendor "ready" reply
///
/// A pure function of the readiness byte and the requested length; building
/// the same reply twice yields byte-identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyReply {
    /// Current readiness byte: 0 = not ready, nonzero = ready
    pub ready: u8,
}

impl ReadyReply {
    /// Encode the reply, clamped to the host-requested length
    ///
    /// Returns exactly `min(requested, 8)` bytes.
    pub fn encode(&self, requested: u16) -> Vec<u8> {
        let mut reply = [0u8; READY_REPLY_SIZE];
        reply[..4].copy_from_slice(REPLY_MAGIC);
        reply[4..6].copy_from_slice(&PROTOCOL_VERSION.to_le_bytes());
        reply[6] = self.ready;

        let len = READY_REPLY_SIZE.min(requested as usize);
        reply[..len].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reply_layout() {
        let reply = ReadyReply { ready: 1 }.encode(8);
        assert_eq!(reply.len(), READY_REPLY_SIZE);
        assert_eq!(&reply[..4], REPLY_MAGIC);
        assert_eq!(u16::from_le_bytes([reply[4], reply[5]]), PROTOCOL_VERSION);
        assert_eq!(reply[6], 1);
        assert_eq!(reply[7], 0);
    }

    #[test]
    fn test_truncated_to_requested_length() {
        for requested in 0u16..=8 {
            let reply = ReadyReply { ready: 0 }.encode(requested);
            assert_eq!(reply.len(), requested as usize);
        }
    }

    #[test]
    fn test_oversized_request_clamped() {
        let reply = ReadyReply { ready: 1 }.encode(u16::MAX);
        assert_eq!(reply.len(), READY_REPLY_SIZE);
    }

    #[test]
    fn test_three_byte_read_is_tag_prefix() {
        let reply = ReadyReply { ready: 1 }.encode(3);
        assert_eq!(reply, b"TZS");
    }

    #[test]
    fn test_idempotent() {
        let a = ReadyReply { ready: 1 }.encode(8);
        let b = ReadyReply { ready: 1 }.encode(8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_readiness_byte_reported_verbatim() {
        for ready in [0u8, 1, 0x7F, 0xFF] {
            let reply = ReadyReply { ready }.encode(8);
            assert_eq!(reply[6], ready);
        }
    }
}
