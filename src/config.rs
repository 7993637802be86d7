//! Referee configuration.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! replacement = true
//!
//! [pool]
//! max_idle = 64
//! max_retained = 4096
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for a [`Referee`](crate::referee::Referee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefereeConfig {
    /// Run the replacement pass when phase 1 leaves unused supply.
    pub replacement: bool,

    pub pool: PoolConfig,
}

/// Limits for the scratch buffer pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Idle buffers kept per pool; extra returns are dropped.
    pub max_idle: usize,

    /// Buffers whose capacity grew beyond this are dropped instead of kept.
    pub max_retained: usize,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            replacement: true,
            pool: PoolConfig::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle: 64,
            max_retained: 4096,
        }
    }
}

impl RefereeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RefereeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Invalid(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.max_idle == 0 {
            return Err(ConfigError::Invalid("pool.max_idle must be at least 1".into()));
        }
        if self.pool.max_retained == 0 {
            return Err(ConfigError::Invalid("pool.max_retained must be at least 1".into()));
        }
        Ok(())
    }
}
