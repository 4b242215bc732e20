//! Error types for chipflow.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use chipflow_core::ObjectError;
use chipflow_render::RenderError;

/// Errors from loading a [`ChipsLayoutConfig`](crate::ChipsLayoutConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Density must be finite and positive.
    #[error("invalid density {0}: must be finite and greater than zero")]
    InvalidDensity(f32),

    /// A color string is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color {0:?}: expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    /// The badge edge length must be non-zero.
    #[error("invalid badge size: must be greater than zero")]
    InvalidBadgeSize,
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Object(#[from] ObjectError),
}

/// Result type for chipflow operations.
pub type Result<T> = std::result::Result<T, Error>;
