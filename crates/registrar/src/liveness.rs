//! Gadget liveness watcher
//!
//! Hardware supervision lives outside this process; it reports whether the
//! underlying function is operational by sending datagrams to a Unix socket
//! owned by the registrar. The first byte of each datagram is the readiness
//! value (0 = not ready, nonzero = ready) and is stored verbatim into the
//! shared [`Readiness`] cell, where the ep0 loop picks it up on the next
//! vendor "ready" request.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use common::Readiness;
use tokio::net::UnixDatagram;
use tracing::{info, warn};

/// Delay before retrying after a socket receive failure
const RECV_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Bind the liveness socket, replacing a stale one left by a previous run
pub fn bind_socket(path: &Path) -> Result<UnixDatagram> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove stale socket: {}", path.display()))?;
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create socket directory: {}", parent.display())
            })?;
        }
    }

    UnixDatagram::bind(path)
        .with_context(|| format!("Failed to bind liveness socket: {}", path.display()))
}

/// Consume liveness datagrams forever, updating the shared readiness cell
///
/// Receive failures are logged and retried; the watcher never gives up while
/// the process lives. Only transitions are logged so a chatty supervisor
/// cannot flood the log.
pub async fn watch_liveness(socket: UnixDatagram, ready: Readiness) {
    info!("liveness watcher online");
    let mut buf = [0u8; 16];

    loop {
        match socket.recv(&mut buf).await {
            Ok(n) => {
                // An empty datagram counts as "not ready"
                let value = if n > 0 { buf[0] } else { 0 };
                let previous = ready.load();
                ready.store(value);
                if (previous != 0) != (value != 0) {
                    info!(value, "gadget readiness changed");
                }
            }
            Err(e) => {
                warn!(err = %e, delay = ?RECV_RETRY_DELAY, "liveness recv failed; retrying");
                tokio::time::sleep(RECV_RETRY_DELAY).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn wait_for(ready: &Readiness, expected: u8) {
        timeout(Duration::from_secs(5), async {
            while ready.load() != expected {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("readiness never reached expected value");
    }

    #[tokio::test]
    async fn test_datagram_updates_readiness() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ready.sock");

        let socket = bind_socket(&path).unwrap();
        let ready = Readiness::new();
        let watcher = tokio::spawn(watch_liveness(socket, ready.clone()));

        let sender = UnixDatagram::unbound().unwrap();
        sender.send_to(&[1], &path).await.unwrap();
        wait_for(&ready, 1).await;

        sender.send_to(&[0], &path).await.unwrap();
        wait_for(&ready, 0).await;

        watcher.abort();
    }

    #[tokio::test]
    async fn test_stale_socket_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ready.sock");

        // First bind leaves a socket file behind
        drop(bind_socket(&path).unwrap());
        assert!(path.exists());

        // Second bind must succeed over the stale file
        let _socket = bind_socket(&path).unwrap();
    }
}
