//! Systemd service integration
//!
//! Minimal sd-notify support so the unit can use `Type=notify`: readiness is
//! announced only after the descriptor blobs have been accepted by the
//! kernel. All calls are no-ops outside systemd.

use anyhow::{Context, Result};
use std::env;
use std::os::unix::net::UnixDatagram;
use tracing::debug;

fn sd_notify(state: &str) -> Result<()> {
    let Ok(socket_path) = env::var("NOTIFY_SOCKET") else {
        debug!("NOTIFY_SOCKET not set, skipping systemd notification");
        return Ok(());
    };

    let socket = UnixDatagram::unbound().context("Failed to create notify socket")?;
    socket
        .send_to(state.as_bytes(), &socket_path)
        .with_context(|| format!("Failed to send {state} to systemd"))?;
    Ok(())
}

/// Notify systemd that the function is bound and the event loop is starting
pub fn notify_ready() -> Result<()> {
    sd_notify("READY=1")
}

/// Notify systemd that the registrar is shutting down
pub fn notify_stopping() -> Result<()> {
    sd_notify("STOPPING=1")
}

/// Check if running under systemd
pub fn is_systemd() -> bool {
    env::var("NOTIFY_SOCKET").is_ok()
}
