//! EP0 event loop
//!
//! The heart of the registrar: a sequential loop over the FunctionFS `ep0`
//! file that reads event records, answers the one recognized vendor control
//! request with the readiness reply, and STALLs everything else. USB control
//! transfers are strictly ordered per endpoint, so each response is written
//! before the next read; the loop has no internal parallelism.
//!
//! The loop is generic over the device handle so tests can drive it with a
//! scripted fake instead of a kernel file.

use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use common::Readiness;
use protocol::{EVENT_SIZE, Ep0Event, ReadyReply, SetupPacket};
use tracing::{debug, error, info, warn};

/// Delay before retrying after a transient ep0 read failure
pub const EP0_READ_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Sequential driver for the ep0 control endpoint
///
/// Owns the device handle for its lifetime; the handle is released when the
/// driver is dropped, on every exit path.
pub struct Ep0Driver<D> {
    dev: D,
    ready: Readiness,
    retry_delay: Duration,
}

impl<D: Read + Write> Ep0Driver<D> {
    pub fn new(dev: D, ready: Readiness) -> Self {
        Self::with_retry_delay(dev, ready, EP0_READ_RETRY_DELAY)
    }

    /// Like [`Ep0Driver::new`] with an explicit retry delay (shortened in tests)
    pub fn with_retry_delay(dev: D, ready: Readiness, retry_delay: Duration) -> Self {
        Self {
            dev,
            ready,
            retry_delay,
        }
    }

    /// Drain ep0 events until end-of-stream
    ///
    /// End-of-stream means the function was unbound or the process is
    /// shutting down; it is the loop's only exit and not an error. Transient
    /// read failures are retried forever after a fixed delay, and short reads
    /// are discarded, so the loop never gives up on its own.
    pub fn run(mut self) -> std::io::Result<()> {
        let mut buf = [0u8; EVENT_SIZE];

        loop {
            let n = match self.dev.read(&mut buf) {
                Ok(0) => {
                    info!("ep0 end of stream; stopping event loop");
                    return Ok(());
                }
                Ok(n) => n,
                Err(e) => {
                    warn!(err = %e, delay = ?self.retry_delay, "ep0 read events failed; retrying");
                    thread::sleep(self.retry_delay);
                    continue;
                }
            };

            if n < EVENT_SIZE {
                warn!(n, "ep0 read event too short; discarding");
                continue;
            }

            match Ep0Event::parse(&buf) {
                Ok(Ep0Event::Setup(raw)) => self.dispatch_setup(raw),
                Ok(event) => debug!(?event, "ep0 lifecycle event"),
                Err(e) => warn!(err = %e, "undecodable ep0 event; discarding"),
            }
        }
    }

    /// Answer one SETUP transfer before returning to the read loop
    ///
    /// Every SETUP gets exactly one write: the data-stage reply for the
    /// recognized vendor request, or a zero-length write, which is how
    /// userspace signals STALL to the kernel. Leaving a control transfer
    /// unanswered would hang the host, so write failures are logged and the
    /// loop keeps serving.
    fn dispatch_setup(&mut self, raw: [u8; 8]) {
        let setup = SetupPacket::parse(&raw);
        info!(
            request_type = setup.request_type,
            request = setup.request,
            length = setup.length,
            "setup received"
        );

        if setup.is_vendor_ready() {
            let reply = ReadyReply {
                ready: self.ready.load(),
            }
            .encode(setup.length);
            if let Err(e) = self.dev.write(&reply) {
                error!(err = %e, "ep0 write vendor reply failed");
            }
            return;
        }

        warn!(
            request_type = setup.request_type,
            request = setup.request,
            "unhandled setup request, stalling"
        );
        if let Err(e) = self.dev.write(&[]) {
            error!(err = %e, "ep0 stall write failed");
        }
    }
}

/// Spawn the ep0 driver on a dedicated OS thread
///
/// The ep0 read blocks indefinitely between host requests, so the loop gets
/// its own thread rather than a task on the async runtime.
pub fn spawn_ep0_driver<D>(driver: Ep0Driver<D>) -> thread::JoinHandle<std::io::Result<()>>
where
    D: Read + Write + Send + 'static,
{
    thread::Builder::new()
        .name("ep0-driver".to_string())
        .spawn(move || driver.run())
        .expect("Failed to spawn ep0 driver thread")
}
