//! User configuration read from `config.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hashtag::TagLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_PLACEHOLDER: &str = "type tags, space to add";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub limits: TagLimits,
    /// Shown in the entry while it is empty.
    pub placeholder: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            limits: TagLimits::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("[config] {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
