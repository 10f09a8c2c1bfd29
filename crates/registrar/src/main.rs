//! FFS registrar
//!
//! Userspace driver for a control-only FunctionFS gadget function. Binds the
//! function by writing its descriptor blobs into `ep0`, then answers host
//! vendor "ready" polls with the gadget's current liveness, fed in over a
//! Unix socket by an external supervisor.

mod config;
mod descriptors;
mod ep0;
mod liveness;
mod service;

use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use common::{Readiness, setup_logging};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "ffs-registrar")]
#[command(
    author,
    version,
    about = "FFS registrar - answer USB vendor readiness polls for a FunctionFS gadget"
)]
#[command(long_about = "
Userspace side of a FunctionFS gadget function. Writes the function's
descriptors into ep0, then serves host-initiated vendor control requests:
the readiness poll gets an 8-byte reply carrying the gadget's liveness,
anything else is STALLed.

EXAMPLES:
    # Run with default config
    ffs-registrar

    # Run with custom config
    ffs-registrar --config /path/to/registrar.toml

    # Point at a different FunctionFS mount
    ffs-registrar --ffs-dir /dev/ffs-test

CONFIGURATION:
    The registrar looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/ffs-registrar/registrar.toml
    3. /etc/ffs-registrar/registrar.toml
    4. Built-in defaults
")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Save default configuration to default location and exit
    #[arg(long)]
    save_config: bool,

    /// FunctionFS mount directory (overrides config)
    #[arg(long, value_name = "DIR")]
    ffs_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.save_config {
        let config = config::RegistrarConfig::default();
        let path = config::RegistrarConfig::default_path();
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    let mut config = if let Some(ref path) = args.config {
        config::RegistrarConfig::load(Some(config::expand_path(path)))
            .context("Failed to load configuration")?
    } else {
        config::RegistrarConfig::load_or_default()
    };

    if let Some(ffs_dir) = args.ffs_dir {
        config.ffs.mount_dir = ffs_dir;
    }

    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.registrar.log_level);
    let log_file = config.log_file();
    setup_logging(log_level, Some(&log_file)).context("Failed to setup logging")?;

    info!("ffs-registrar v{}", env!("CARGO_PKG_VERSION"));
    info!("Logging to file: {}", log_file.display());
    if service::is_systemd() {
        info!("Running under systemd");
    }

    // Opening ep0 and writing the two blobs binds the function; nothing works
    // without them, so any failure here is fatal.
    let ep0_path = config.ep0_path();
    let mut ep0_file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&ep0_path)
        .with_context(|| format!("Failed to open ep0: {}", ep0_path.display()))?;

    ep0_file
        .write_all(&descriptors::device_descriptors())
        .context("Failed to write device descriptors")?;
    ep0_file
        .write_all(&descriptors::device_strings())
        .context("Failed to write device strings")?;
    info!(ep0 = %ep0_path.display(), "function descriptors written");

    // Start watching gadget liveness
    let ready = Readiness::new();
    let socket = liveness::bind_socket(&config.liveness.socket)?;
    let watcher = tokio::spawn(liveness::watch_liveness(socket, ready.clone()));

    service::notify_ready().context("Failed to notify systemd ready")?;
    info!("FFS registrar online; handling EP0 control & events");

    // The ep0 read blocks between host requests; give the loop its own
    // thread and wait for it to finish. End-of-stream means the function was
    // unbound, which is the normal way out.
    let driver = ep0::Ep0Driver::new(ep0_file, ready);
    let handle = ep0::spawn_ep0_driver(driver);
    let result = tokio::task::spawn_blocking(move || handle.join())
        .await
        .context("Failed to join ep0 driver thread")?;

    watcher.abort();
    if let Err(e) = service::notify_stopping() {
        error!("Failed to notify systemd stopping: {:#}", e);
    }

    match result {
        Ok(Ok(())) => {
            info!("Registrar shutdown complete");
            Ok(())
        }
        Ok(Err(e)) => Err(e).context("ep0 driver failed"),
        Err(panic) => {
            error!("ep0 driver thread panicked: {:?}", panic);
            Err(anyhow::anyhow!("ep0 driver thread panicked"))
        }
    }
}
