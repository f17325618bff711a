//! Client configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! [backend]
//! base_url = "http://localhost:8000"   # or "env:CONTRACT_BACKEND_URL"
//! timeout_secs = 60
//!
//! [explain]
//! payload_key = "input_text"           # optional, must be a known field
//! ```

use crate::assistant::mode::{Mode, ModeRegistry};
use crate::assistant::transport_reqwest::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default backend location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "contract-assistant.toml";
/// Env var naming a config file
pub const CONFIG_ENV: &str = "CONTRACT_ASSISTANT_CONFIG";
/// Env var overriding the backend URL
pub const BASE_URL_ENV: &str = "CONTRACT_ASSISTANT_BASE_URL";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid base_url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("timeout_secs must be greater than zero")]
    InvalidTimeout,

    #[error("Payload key {key:?} is not accepted by the {mode} endpoint (expected one of: {expected})")]
    UnknownPayloadKey {
        mode: Mode,
        key: String,
        expected: String,
    },

    #[error("Environment variable {0} is not set")]
    MissingEnv(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Per-mode settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Outgoing field name, when the deployment expects a non-canonical one
    pub payload_key: Option<String>,
}

/// Full client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub backend: BackendConfig,
    pub explain: ModeConfig,
    pub generate: ModeConfig,
}

impl AssistantConfig {
    /// Parse config from a TOML string (not yet validated)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read config from `path` (not yet validated)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load config following the resolution order
    ///
    /// `explicit` (from `--config`) → `$CONTRACT_ASSISTANT_CONFIG` →
    /// `./contract-assistant.toml` if present → defaults; then
    /// `$CONTRACT_ASSISTANT_BASE_URL` overrides the backend URL.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with(explicit, |name| std::env::var(name).ok())
    }

    /// `load` with an injectable environment lookup
    pub fn load_with<F>(explicit: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = env(CONFIG_ENV).map(PathBuf::from);
        let path = match (explicit, from_env) {
            (Some(path), _) => Some(path.to_path_buf()),
            (None, Some(path)) => Some(path),
            (None, None) => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.is_file().then_some(local)
            }
        };

        let mut config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        if let Some(url) = env(BASE_URL_ENV) {
            config.backend.base_url = url;
        }
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = base_url {
            self.backend.base_url = url;
        }
        if let Some(timeout) = timeout_secs {
            self.backend.timeout_secs = timeout;
        }
        self
    }

    /// Resolve `env:` references and check every field
    pub fn validate(self) -> Result<Self> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    /// `validate` with an injectable environment lookup
    pub fn validate_with<F>(mut self, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = resolve_env_var(&self.backend.base_url, &env)?;
        self.backend.base_url = validate_base_url(&base_url)?;

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        for mode in Mode::ALL {
            if let Some(key) = self.mode(mode).payload_key.as_deref() {
                let descriptor = ModeRegistry::describe(mode);
                if !descriptor.accepts(key) {
                    return Err(ConfigError::UnknownPayloadKey {
                        mode,
                        key: key.to_string(),
                        expected: descriptor.payload_keys.join(", "),
                    });
                }
            }
        }
        Ok(self)
    }

    /// Settings for `mode`
    pub fn mode(&self, mode: Mode) -> &ModeConfig {
        match mode {
            Mode::Explain => &self.explain,
            Mode::Generate => &self.generate,
        }
    }
}

/// Resolve environment variable reference
///
/// If value starts with "env:", read from environment.
/// Otherwise return value as-is.
fn resolve_env_var<F>(value: &str, env: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match value.strip_prefix("env:") {
        Some(name) => env(name).ok_or_else(|| ConfigError::MissingEnv(name.to_string())),
        None => Ok(value.to_string()),
    }
}

/// Check scheme and host, strip trailing slashes
fn validate_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
