//! Error types for the layered configuration tree.

use std::path::PathBuf;
use thiserror::Error;

/// Value coercion errors, raised by the accessor layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("bad value: {0:?}")]
    BadValue(String),

    #[error("bad duration: {0:?}")]
    BadDuration(String),

    #[error("bad time format: {0:?}")]
    BadTime(String),

    #[error("bad integer {value:?}: {source}")]
    Int {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("bad float {value:?}: {source}")]
    Float {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("unknown value type: {0:?}")]
    UnknownType(String),
}

/// Tree, lookup and loading errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("node not found: {key}")]
    NotFound { key: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("unknown node")]
    UnknownNode,

    #[error("cannot adopt a node under itself or one of its descendants")]
    InvalidAdoption,

    #[error("{}:{line}: {message}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{}:{line}: including {:?}: {source}", file.display(), include.display())]
    Include {
        file: PathBuf,
        line: usize,
        include: PathBuf,
        #[source]
        source: Box<TreeError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for TreeError {
    fn from(err: config::ConfigError) -> Self {
        TreeError::Config(err.to_string())
    }
}

impl TreeError {
    /// Whether this is the expected "nothing matched" outcome of a lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TreeError::NotFound { .. })
    }
}
