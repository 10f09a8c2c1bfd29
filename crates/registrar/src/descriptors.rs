//! FunctionFS descriptor and string blobs
//!
//! Written once to `ep0` right after it is opened; the kernel refuses any
//! event reads until both blobs have been accepted. The function is
//! control-only: a single vendor-class interface with no endpoints, so the
//! host talks to it exclusively through EP0 vendor requests.
//!
//! Layouts follow the kernel UAPI (`usb_functionfs_descs_head_v2`,
//! `usb_functionfs_strings_head`); all integers little-endian.

/// FUNCTIONFS_DESCRIPTORS_MAGIC_V2
const DESCRIPTORS_MAGIC_V2: u32 = 3;
/// FUNCTIONFS_STRINGS_MAGIC
const STRINGS_MAGIC: u32 = 2;

/// FUNCTIONFS_HAS_FS_DESC | FUNCTIONFS_HAS_HS_DESC
const FLAGS: u32 = 0x01 | 0x02;

/// en-US; the only string table the function carries
const LANG_EN_US: u16 = 0x0409;

/// Name the host sees on the function's interface (string index 1)
pub const INTERFACE_NAME: &str = "TZSG registrar";

/// Single interface descriptor shared by the FS and HS configurations
///
/// ```text
/// [bLength:9][INTERFACE:4][ifnum:0][alt:0][endpoints:0][class:0xFF][sub:0][proto:0][iInterface:1]
/// ```
const INTERFACE_DESC: [u8; 9] = [9, 0x04, 0, 0, 0, 0xFF, 0, 0, 1];

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Finalize a blob by patching its declared total length (offset 4)
fn patch_length(mut buf: Vec<u8>) -> Vec<u8> {
    let total = buf.len() as u32;
    buf[4..8].copy_from_slice(&total.to_le_bytes());
    buf
}

/// The device descriptor blob, first write into ep0
pub fn device_descriptors() -> Vec<u8> {
    let mut buf = Vec::new();
    put_u32(&mut buf, DESCRIPTORS_MAGIC_V2);
    put_u32(&mut buf, 0); // length, patched below
    put_u32(&mut buf, FLAGS);
    put_u32(&mut buf, 1); // full-speed descriptor count
    put_u32(&mut buf, 1); // high-speed descriptor count
    buf.extend_from_slice(&INTERFACE_DESC); // full speed
    buf.extend_from_slice(&INTERFACE_DESC); // high speed
    patch_length(buf)
}

/// The string table blob, second write into ep0
pub fn device_strings() -> Vec<u8> {
    let mut buf = Vec::new();
    put_u32(&mut buf, STRINGS_MAGIC);
    put_u32(&mut buf, 0); // length, patched below
    put_u32(&mut buf, 1); // string count
    put_u32(&mut buf, 1); // language count
    buf.extend_from_slice(&LANG_EN_US.to_le_bytes());
    buf.extend_from_slice(INTERFACE_NAME.as_bytes());
    buf.push(0);
    patch_length(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_descriptors_header() {
        let blob = device_descriptors();
        assert_eq!(read_u32(&blob, 0), DESCRIPTORS_MAGIC_V2);
        assert_eq!(read_u32(&blob, 4) as usize, blob.len());
        assert_eq!(read_u32(&blob, 8), FLAGS);
        assert_eq!(read_u32(&blob, 12), 1);
        assert_eq!(read_u32(&blob, 16), 1);
        // header + two copies of the interface descriptor
        assert_eq!(blob.len(), 20 + 2 * INTERFACE_DESC.len());
    }

    #[test]
    fn test_interface_is_control_only_vendor_class() {
        assert_eq!(INTERFACE_DESC[1], 0x04); // INTERFACE
        assert_eq!(INTERFACE_DESC[4], 0); // bNumEndpoints
        assert_eq!(INTERFACE_DESC[5], 0xFF); // vendor class
    }

    #[test]
    fn test_strings_header() {
        let blob = device_strings();
        assert_eq!(read_u32(&blob, 0), STRINGS_MAGIC);
        assert_eq!(read_u32(&blob, 4) as usize, blob.len());
        assert_eq!(read_u32(&blob, 8), 1);
        assert_eq!(read_u32(&blob, 12), 1);
        assert_eq!(u16::from_le_bytes([blob[16], blob[17]]), LANG_EN_US);
        // NUL-terminated interface name follows the language code
        assert_eq!(&blob[18..blob.len() - 1], INTERFACE_NAME.as_bytes());
        assert_eq!(*blob.last().unwrap(), 0);
    }
}
