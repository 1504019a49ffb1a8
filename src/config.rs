// src/config.rs
// =============================================================================
// Configuration for an analysis run.
//
// Every option has a documented default, so a missing config file is fine.
// When a file IS given it is parsed strictly:
// - unknown keys are rejected (a typo must not be silently ignored)
// - values are validated before any analysis starts (never clamped)
//
// Config file format (JSON, every key optional):
//   {
//     "timeout": 5,
//     "max_redirects": 5,
//     "validate_images": false,
//     "concurrency": 8,
//     "exclude_extensions": [".pdf"],
//     "github_token": null
//   }
// =============================================================================

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Per-link probe deadline in seconds.
    pub timeout: f64,
    /// Maximum number of redirects a probe follows.
    pub max_redirects: usize,
    /// Run image URLs through the same reachability classification as links.
    pub validate_images: bool,
    /// How many probes may be in flight at once (1 = sequential).
    pub concurrency: usize,
    /// URL path suffixes that are never probed (e.g. ".pdf").
    pub exclude_extensions: Vec<String>,
    /// Token sent to the GitHub API when fetching repository files.
    pub github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: 5.0,
            max_redirects: 5,
            validate_images: false,
            concurrency: 8,
            exclude_extensions: Vec::new(),
            github_token: None,
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// - `Some(path)`: the file must exist and parse
    /// - `None`: `config.json` in the working directory is used if present,
    ///   defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(&fallback)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file without validating it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Checks every value, failing on the first bad one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        seconds_to_duration("timeout", self.timeout)?;

        if self.concurrency == 0 {
            return Err(ConfigError::Invalid {
                field: "concurrency",
                reason: "must be at least 1".to_string(),
            });
        }

        if let Some(ext) = self.exclude_extensions.iter().find(|e| e.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "exclude_extensions",
                reason: format!("empty extension {:?} would exclude every link", ext),
            });
        }

        Ok(())
    }

    /// The per-link deadline as a Duration.
    ///
    /// Only meaningful on a validated config; an out-of-range timeout maps
    /// to Duration::MAX instead of panicking.
    pub fn probe_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout).unwrap_or(Duration::MAX)
    }
}

/// Converts a user-supplied number of seconds into a Duration.
///
/// Rejects zero, negative, NaN/infinite and values too large for a Duration.
pub fn seconds_to_duration(field: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number of seconds, got {}", secs),
        });
    }

    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::Invalid {
        field,
        reason: format!("{} seconds is too large", secs),
    })
}
