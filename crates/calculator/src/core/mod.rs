//! Calculator core: operators, the display precision policy, and the
//! keypad state machine.
//!
//! Nothing in here performs I/O. The engine itself never fails; `CalcError`
//! covers the fallible edges around it (configuration, key mapping, assets).

mod engine;
pub mod format;
mod operations;

pub use engine::{CalculatorEngine, CalculatorSnapshot, EnginePhase, PendingOperation};
pub use format::DisplayFormat;
pub use operations::{perform_calculation, Operator};

use thiserror::Error;

/// Result type for fallible calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised around the engine
#[derive(Debug, Error)]
pub enum CalcError {
    /// Display precision outside the supported range
    #[error("Invalid precision: {precision} (expected 0..={max})")]
    InvalidPrecision {
        /// Requested precision
        precision: u32,
        /// Largest supported precision
        max: u32,
    },

    /// Separator that cannot be told apart from a numeral
    #[error("Invalid separator: {0:?}")]
    InvalidSeparator(char),

    /// Key token with no keypad action
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    /// Button id that is not part of the keypad
    #[error("Unknown button: {0:?}")]
    UnknownButton(String),

    /// Asset missing from both cache and network
    #[error("Asset not found: {path}")]
    AssetNotFound {
        /// Requested asset path
        path: String,
    },

    /// Network fetch failed
    #[error("Fetch of {path} failed: {message}")]
    Fetch {
        /// Requested asset path
        path: String,
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a fetch error
    #[must_use]
    pub fn fetch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            path: path.into(),
            message: message.into(),
        }
    }
}
