//! Simulator configuration
//!
//! The default `robot.toml` is compiled in; `--config <path>` replaces it.
//! Unknown sections are rejected, missing keys take the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use kairos_core::config::{SelectorConfig, SupervisorConfig};
use kairos_drivers::SimGeometry;
use serde::Deserialize;
use thiserror::Error;

/// Embedded default configuration
const EMBEDDED_CONFIG: &str = include_str!("../robot.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Simulated hub settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// How long a console press holds an input
    pub press_ms: u32,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { press_ms: 150 }
    }
}

/// Complete simulator configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub geometry: SimGeometry,
    pub selector: SelectorConfig,
    pub supervisor: SupervisorConfig,
    pub hub: HubConfig,
}

impl SimConfig {
    /// Load from `path`, or the embedded defaults when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::parse(&text)
            }
            None => Self::parse(EMBEDDED_CONFIG),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.geometry.speedup == 0 {
            return Err(ConfigError::Invalid {
                field: "geometry.speedup",
                reason: "must be at least 1",
            });
        }
        if self.geometry.wheel_diameter_mm == 0 || self.geometry.axle_track_mm == 0 {
            return Err(ConfigError::Invalid {
                field: "geometry",
                reason: "wheel diameter and axle track must be non-zero",
            });
        }

        let threshold = self.selector.trigger_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "selector.trigger_threshold",
                reason: "must be in (0, 1]",
            });
        }
        if self.selector.poll_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "selector.poll_ms",
                reason: "must be non-zero",
            });
        }
        if self.supervisor.telemetry.interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "supervisor.telemetry.interval_ms",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }
}
