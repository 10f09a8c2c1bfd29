//! End-to-end wire format tests: kernel event frame in, vendor reply out

use protocol::{
    EVENT_SIZE, Ep0Event, REQUEST_TYPE_VENDOR_IN, ReadyReply, SetupPacket, VENDOR_REQUEST_READY,
};

fn setup_frame(setup: [u8; 8]) -> [u8; EVENT_SIZE] {
    let mut frame = [0u8; EVENT_SIZE];
    frame[..8].copy_from_slice(&setup);
    frame[8] = 4; // SETUP
    frame
}

#[test]
fn test_ready_request_pipeline() {
    // Host polls readiness with wLength = 8
    let frame = setup_frame([
        REQUEST_TYPE_VENDOR_IN,
        VENDOR_REQUEST_READY,
        0,
        0,
        0,
        0,
        0x08,
        0x00,
    ]);

    let Ep0Event::Setup(raw) = Ep0Event::parse(&frame).unwrap() else {
        panic!("expected setup event");
    };
    let setup = SetupPacket::parse(&raw);
    assert!(setup.is_vendor_ready());

    let reply = ReadyReply { ready: 1 }.encode(setup.length);
    assert_eq!(reply.len(), 8);
    assert_eq!(&reply[..4], b"TZSG");
    assert_eq!(reply[6], 1);
}

#[test]
fn test_short_ready_poll_honors_wlength() {
    // The host may read only the tag prefix
    let frame = setup_frame([
        REQUEST_TYPE_VENDOR_IN,
        VENDOR_REQUEST_READY,
        0,
        0,
        0,
        0,
        0x03,
        0x00,
    ]);

    let Ep0Event::Setup(raw) = Ep0Event::parse(&frame).unwrap() else {
        panic!("expected setup event");
    };
    let setup = SetupPacket::parse(&raw);
    assert_eq!(setup.length, 3);

    let reply = ReadyReply { ready: 0 }.encode(setup.length);
    assert_eq!(reply, b"TZS");
}

#[test]
fn test_standard_request_is_not_recognized() {
    // GET_DESCRIPTOR(DEVICE) as seen during enumeration; the registrar must
    // not treat it as the vendor ready request.
    let frame = setup_frame([0x80, 0x06, 0x00, 0x01, 0x00, 0x00, 0x12, 0x00]);

    let Ep0Event::Setup(raw) = Ep0Event::parse(&frame).unwrap() else {
        panic!("expected setup event");
    };
    let setup = SetupPacket::parse(&raw);
    assert!(!setup.is_vendor_ready());
    assert_eq!(setup.length, 18);
}

#[test]
fn test_lifecycle_frame_has_no_setup() {
    let mut frame = [0u8; EVENT_SIZE];
    frame[8] = 2; // ENABLE
    assert_eq!(Ep0Event::parse(&frame).unwrap(), Ep0Event::Enable);
}
