//! Path management for SleekFinance
//!
//! ## Path Resolution Order
//!
//! 1. `SLEEK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `sleekfinance`
//!    (e.g. `~/.config/sleekfinance` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SleekError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SLEEK_DATA_DIR";

/// Manages all paths used by SleekFinance
#[derive(Debug, Clone)]
pub struct SleekPaths {
    base_dir: PathBuf,
}

impl SleekPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SleekError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "sleekfinance")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SleekError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create SleekPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Path to config.json
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the ledger snapshot exported by the store
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join("snapshot.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SleekError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SleekError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SleekError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
