//! Configuration for transfers.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $PORTAGE_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/portage/config.toml
//!   3. ~/.config/portage/config.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Bytes per chunk when the caller does not choose a size.
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Produced-but-unconsumed chunks that may queue before the producer blocks.
pub const DEFAULT_BUFFER_DEPTH: usize = 1024;

/// Pipeline parameters for one transfer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Bytes per chunk. 0 = default (4096).
    pub chunk_size: usize,
    /// Chunk queue depth. 0 = default (1024).
    pub buffer_depth: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            buffer_depth: DEFAULT_BUFFER_DEPTH,
        }
    }
}

impl TransferConfig {
    /// Replace zero fields with the defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.chunk_size == 0 {
            self.chunk_size = DEFAULT_CHUNK_SIZE;
        }
        if self.buffer_depth == 0 {
            self.buffer_depth = DEFAULT_BUFFER_DEPTH;
        }
        self
    }

    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path, e))?
        } else {
            TransferConfig::default()
        };
        config.apply_env_overrides();
        Ok(config.with_defaults())
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("PORTAGE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&TransferConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text).map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply PORTAGE_* env var overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PORTAGE_CHUNK_SIZE") {
            if let Ok(n) = v.parse() {
                self.chunk_size = n;
            }
        }
        if let Ok(v) = std::env::var("PORTAGE_BUFFER_DEPTH") {
            if let Ok(n) = v.parse() {
                self.buffer_depth = n;
            }
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_or_tmp().join(".config"))
        .join("portage")
}

fn home_or_tmp() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}
