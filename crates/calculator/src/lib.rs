//! Keypad Calculator
//!
//! A four-function calculator driven one key at a time, the way a pocket
//! calculator or a web keypad is. Operations evaluate strictly left to right
//! as operators are pressed; there is no precedence.
//!
//! # Layers
//!
//! - [`core`]: operators, display precision, and the keypad state machine
//! - [`wasm`]: keypad layout, a mock DOM UI, and browser bindings
//! - [`offline`]: versioned asset precache for running without a network
//! - [`config`]: YAML/JSON settings for precision and separators
//! - [`driver`]: one set of behavioral specifications run against every frontend
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.input_digit("1");
//! engine.input_digit("2");
//! engine.handle_operator("+");
//! engine.input_digit("3");
//! engine.handle_operator("×");
//! assert_eq!(engine.display_value(), "15");
//!
//! engine.input_digit("2");
//! let history = engine.calculate();
//! assert_eq!(history.as_deref(), Some("15 × 2 ="));
//! assert_eq!(engine.display_value(), "30");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod offline;

/// Browser frontend - the mock DOM is always available for testing
pub mod wasm;

pub use crate::config::CalcConfig;
pub use crate::core::{CalcError, CalcResult, CalculatorEngine};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalcConfig, DisplayConfig, EngineConfig};
    pub use crate::core::{
        CalcError, CalcResult, CalculatorEngine, CalculatorSnapshot, DisplayFormat, EnginePhase,
        Operator,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::offline::{AssetFetcher, CacheStorage, OfflineCache};
    pub use crate::wasm::{CalculatorUi, Keypad, KeypadAction};

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserCalculator;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut engine = CalculatorEngine::new();
        engine.press_all(&["6", "*", "7", "="]).unwrap();
        assert_eq!(engine.display_value(), "42");
    }

    #[test]
    fn test_engine_and_ui_agree() {
        let keys = ["1", "2", ".", "5", "-", "2", ".", "5", "="];
        let mut engine = CalculatorEngine::new();
        let mut ui = CalculatorUi::new();
        engine.press_all(&keys).unwrap();
        ui.press_all(&keys).unwrap();
        assert_eq!(engine.display_value(), "10");
        assert_eq!(ui.result_text(), engine.display_value());
    }

    #[test]
    fn test_config_drives_engine() {
        let engine = CalcConfig::new().with_precision(2).build_engine().unwrap();
        assert_eq!(engine.format().precision(), 2);
        assert_eq!(engine.phase(), EnginePhase::Idle);
    }
}
