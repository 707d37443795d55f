//! TOML configuration.
//!
//! ```toml
//! log_level = "debug"
//!
//! [import]
//! use_file_normals = true
//! unitize = false
//!
//! [subdivide]
//! level = 2
//! normal_rule = "renormalized"
//! parallel = true
//! max_faces = 1000000
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use quadmesh_obj::ImportOptions;
use quadmesh_subdiv::{NormalRule, SubdivideParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything.
    Trace,
    /// Per-pass counts and import summaries.
    Debug,
    /// Progress messages.
    Info,
    /// Ignored input and recoverable problems.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `env_logger` filter.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

/// Subdivision settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubdivideConfig {
    /// Number of Catmull-Clark passes.
    pub level: u32,
    /// Rule for new point normals.
    pub normal_rule: NormalRule,
    /// Compute new points on the rayon thread pool.
    pub parallel: bool,
    /// Refuse a level that would produce more faces than this.
    pub max_faces: usize,
}

impl Default for SubdivideConfig {
    fn default() -> Self {
        let params = SubdivideParams::default();
        Self {
            level: 1,
            normal_rule: params.normal_rule,
            parallel: params.parallel,
            max_faces: params.max_faces,
        }
    }
}

impl SubdivideConfig {
    /// Engine parameters for these settings.
    pub fn params(&self) -> SubdivideParams {
        SubdivideParams::default()
            .with_normal_rule(self.normal_rule)
            .with_parallel(self.parallel)
            .with_max_faces(self.max_faces)
    }
}

/// quadmesh configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Log verbosity; `None` defers to the environment.
    pub log_level: Option<LogLevel>,
    /// OBJ import options.
    pub import: ImportOptions,
    /// Subdivision settings.
    pub subdivide: SubdivideConfig,
}

impl Config {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
