//! Browser bindings
//!
//! The page's click and keydown listeners forward button ids and keys here
//! and re-render from the `display` and `expression` getters.

use wasm_bindgen::prelude::*;
use web_sys::console;

use super::grouping::group_digits;
use super::keypad::{Keypad, KeypadAction};
use crate::config::DisplayConfig;
use crate::core::CalculatorEngine;

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    engine: CalculatorEngine,
    keypad: Keypad,
    display: DisplayConfig,
    last_history: Option<String>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a new browser calculator
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();

        Self {
            engine: CalculatorEngine::new(),
            keypad: Keypad::new(),
            display: DisplayConfig::default(),
            last_history: None,
        }
    }

    /// Display text with digit grouping
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        let raw = self.engine.display_value();
        if self.display.grouping {
            group_digits(
                raw,
                self.display.grouping_separator,
                self.engine.format().separator(),
            )
        } else {
            raw.to_string()
        }
    }

    /// Expression line: pending operation, or the last history line
    #[wasm_bindgen(getter)]
    pub fn expression(&self) -> String {
        if self.engine.pending().is_some() {
            self.engine.current_expression()
        } else {
            self.last_history.clone().unwrap_or_default()
        }
    }

    /// Handle a keypad button click by element ID
    pub fn handle_button(&mut self, button_id: &str) -> Option<String> {
        let action = self.keypad.handle_click(button_id)?;
        self.handle_action(&action)
    }

    /// Handle a keyboard key press
    pub fn handle_key(&mut self, key: &str) -> Option<String> {
        let action = KeypadAction::from_key(key)?;
        self.handle_action(&action)
    }

    /// Reset the calculator
    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_history = None;
    }

    /// Observable state as JSON
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.engine.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    fn handle_action(&mut self, action: &KeypadAction) -> Option<String> {
        let history = action.apply(&mut self.engine);
        self.last_history.clone_from(&history);
        history
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Calculator WASM initialized".into());
}
