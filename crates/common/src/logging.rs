//! Logging setup and configuration

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Setup the tracing subscriber for the application
///
/// Logs go to stderr; when `file` is given, a second non-ANSI layer appends
/// to it (the parent directory is created if needed). `RUST_LOG` overrides
/// `default_level`.
pub fn setup_logging(default_level: &str, file: Option<&Path>) -> crate::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| crate::Error::Config(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));

    match file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
                .init();
        }
        None => registry.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_parent_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("registrar.log");

        // setup_logging can only install a global subscriber once per process,
        // so only the filesystem side is asserted here.
        let _ = setup_logging("info", Some(&path));
        assert!(path.parent().unwrap().exists());
    }
}
