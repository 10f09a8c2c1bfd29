//! Registrar configuration management

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarConfig {
    pub registrar: RegistrarSettings,
    pub ffs: FfsSettings,
    pub liveness: LivenessSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarSettings {
    pub log_level: String,
    /// Log file path; None picks a default next to the data store
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfsSettings {
    /// Mount point of the FunctionFS instance
    pub mount_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessSettings {
    /// Unix datagram socket the gadget supervisor reports readiness to
    pub socket: PathBuf,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            registrar: RegistrarSettings {
                log_level: "info".to_string(),
                log_file: None,
            },
            ffs: FfsSettings {
                mount_dir: PathBuf::from("/dev/ffs-registrar"),
            },
            liveness: LivenessSettings {
                socket: PathBuf::from("/run/registrar/ready.sock"),
            },
        }
    }
}

impl RegistrarConfig {
    /// Load configuration from the specified path
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p
        } else {
            let candidates = vec![
                Self::default_path(),
                PathBuf::from("/etc/ffs-registrar/registrar.toml"),
            ];

            candidates
                .into_iter()
                .find(|p| p.exists())
                .ok_or_else(|| anyhow!("No configuration file found, using defaults"))?
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: RegistrarConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config.validate()?;

        tracing::info!("Loaded configuration from: {}", config_path.display());
        Ok(config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default() -> Self {
        match Self::load(None) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the specified path
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("ffs-registrar").join("registrar.toml")
        } else {
            PathBuf::from(".config/ffs-registrar/registrar.toml")
        }
    }

    /// Path of the ep0 control-endpoint file inside the FunctionFS mount
    pub fn ep0_path(&self) -> PathBuf {
        self.ffs.mount_dir.join("ep0")
    }

    /// Resolve the log file: configured path, `DATA_STORE` env directory, or
    /// a file next to the executable, in that order
    pub fn log_file(&self) -> PathBuf {
        if let Some(path) = &self.registrar.log_file {
            return path.clone();
        }

        if let Ok(data_store) = std::env::var("DATA_STORE") {
            let data_store = data_store.trim();
            if !data_store.is_empty() {
                return PathBuf::from(data_store).join("registrar.log");
            }
        }

        default_file_in_exec_dir("registrar.log")
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.registrar.log_level.as_str()) {
            return Err(anyhow!(
                "Invalid log level '{}', must be one of: {}",
                self.registrar.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.ffs.mount_dir.as_os_str().is_empty() {
            return Err(anyhow!("ffs.mount_dir must not be empty"));
        }
        if self.liveness.socket.as_os_str().is_empty() {
            return Err(anyhow!("liveness.socket must not be empty"));
        }

        Ok(())
    }
}

/// `<exec-dir>/<name>`, falling back to `./<name>` when the executable path
/// cannot be resolved
fn default_file_in_exec_dir(name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(name)))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Expand `~` in a user-supplied config path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
