//! Keypad UI binding
//!
//! Dispatches clicks on keypad buttons to the engine by css class and button
//! text, then re-renders `#result` and `#expression`. The rendered display is
//! grouped in thousands; grouping never feeds back into the engine.

use super::dom::{DomElement, DomEvent, MockDom};
use super::grouping::group_digits;
use super::keypad::{
    Keypad, MockDomKeypadExt, ALL_CLEAR_LABEL, CLASS_EQUAL, CLASS_FUNC, CLASS_NUM, CLASS_OP,
};
use crate::config::{CalcConfig, DisplayConfig};
use crate::core::{CalcError, CalcResult, CalculatorEngine};
use tracing::{debug, warn};

/// Element id of the main display
pub const RESULT_ID: &str = "result";
/// Element id of the expression line
pub const EXPRESSION_ID: &str = "expression";

/// Calculator UI over a DOM
#[derive(Debug)]
pub struct CalculatorUi {
    engine: CalculatorEngine,
    keypad: Keypad,
    dom: MockDom,
    display: DisplayConfig,
    /// History line of the last `=`, shown until the next input
    last_history: Option<String>,
}

impl Default for CalculatorUi {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorUi {
    /// Creates a UI with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(CalculatorEngine::new(), DisplayConfig::default())
    }

    /// Creates a UI from a configuration
    pub fn with_config(config: &CalcConfig) -> CalcResult<Self> {
        Ok(Self::from_parts(
            config.build_engine()?,
            config.display.clone(),
        ))
    }

    fn from_parts(engine: CalculatorEngine, display: DisplayConfig) -> Self {
        let keypad = Keypad::new().with_decimal_separator(engine.format().separator());
        let mut dom = MockDom::new();
        dom.register_element(DomElement::new("div").with_id(EXPRESSION_ID));
        dom.register_element(DomElement::new("div").with_id(RESULT_ID));
        dom.add_keypad(&keypad);

        let mut ui = Self {
            engine,
            keypad,
            dom,
            display,
            last_history: None,
        };
        ui.render();
        ui
    }

    /// The underlying engine
    #[must_use]
    pub const fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// The keypad layout
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The document
    #[must_use]
    pub const fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Rendered text of `#result`
    #[must_use]
    pub fn result_text(&self) -> &str {
        self.dom.get_element_text(RESULT_ID).unwrap_or_default()
    }

    /// Rendered text of `#expression`
    #[must_use]
    pub fn expression_text(&self) -> &str {
        self.dom.get_element_text(EXPRESSION_ID).unwrap_or_default()
    }

    /// Handles a click on a keypad button. Returns the history line on `=`.
    pub fn click(&mut self, button_id: &str) -> CalcResult<Option<String>> {
        self.dom.dispatch_event(DomEvent::click(button_id));

        let Some(button) = self.dom.get_element(button_id) else {
            warn!(button_id, "click on unknown button");
            return Err(CalcError::UnknownButton(button_id.to_string()));
        };
        let value = button.trimmed_text().to_string();
        debug!(button_id, value = %value, "button clicked");

        let history = if button.has_class(CLASS_NUM) {
            if self.is_decimal_label(&value) {
                self.engine.input_default_decimal();
            } else {
                self.engine.input_digit(&value);
            }
            None
        } else if button.has_class(CLASS_OP) {
            self.engine.handle_operator(&value);
            None
        } else if button.has_class(CLASS_EQUAL) {
            self.engine.calculate()
        } else if button.has_class(CLASS_FUNC) {
            if value == ALL_CLEAR_LABEL {
                self.engine.reset();
            }
            None
        } else {
            return Err(CalcError::UnknownButton(button_id.to_string()));
        };

        self.last_history.clone_from(&history);
        self.render();
        Ok(history)
    }

    /// Handles a keyboard key by pressing the matching button
    pub fn press_key(&mut self, key: &str) -> CalcResult<Option<String>> {
        self.dom.dispatch_event(DomEvent::key_press(key));
        let button_id = self
            .keypad
            .button_id_for_key(key)
            .ok_or_else(|| CalcError::UnknownKey(key.to_string()))?
            .to_string();
        self.click(&button_id)
    }

    /// Resets engine and display
    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_history = None;
        self.render();
    }

    fn is_decimal_label(&self, value: &str) -> bool {
        value == "." || value.chars().eq([self.engine.format().separator()])
    }

    fn render(&mut self) {
        let raw = self.engine.display_value();
        let shown = if self.display.grouping {
            group_digits(
                raw,
                self.display.grouping_separator,
                self.engine.format().separator(),
            )
        } else {
            raw.to_string()
        };

        let expression = if self.engine.pending().is_some() {
            self.engine.current_expression()
        } else {
            self.last_history.clone().unwrap_or_default()
        };

        self.dom.set_element_text(RESULT_ID, &shown);
        self.dom.set_element_text(EXPRESSION_ID, &expression);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_all(ui: &mut CalculatorUi, ids: &[&str]) {
        for id in ids {
            ui.click(id).unwrap();
        }
    }

    #[test]
    fn test_initial_render() {
        let ui = CalculatorUi::new();
        assert_eq!(ui.result_text(), "0");
        assert_eq!(ui.expression_text(), "");
    }

    #[test]
    fn test_digit_clicks_render_grouped() {
        let mut ui = CalculatorUi::new();
        click_all(&mut ui, &["btn-1", "btn-2", "btn-3", "btn-4"]);
        assert_eq!(ui.result_text(), "1,234");
        assert_eq!(ui.engine().display_value(), "1234");
    }

    #[test]
    fn test_operator_click_shows_expression() {
        let mut ui = CalculatorUi::new();
        click_all(&mut ui, &["btn-9", "btn-times"]);
        assert_eq!(ui.expression_text(), "9 ×");
    }

    #[test]
    fn test_equals_shows_history_line() {
        let mut ui = CalculatorUi::new();
        click_all(&mut ui, &["btn-8", "btn-minus", "btn-3"]);
        let history = ui.click("btn-equals").unwrap();
        assert_eq!(history.as_deref(), Some("8 - 3 ="));
        assert_eq!(ui.expression_text(), "8 - 3 =");
        assert_eq!(ui.result_text(), "5");
    }

    #[test]
    fn test_history_line_cleared_by_next_input() {
        let mut ui = CalculatorUi::new();
        click_all(&mut ui, &["btn-2", "btn-plus", "btn-2", "btn-equals", "btn-1"]);
        assert_eq!(ui.expression_text(), "");
        assert_eq!(ui.result_text(), "41");
    }

    #[test]
    fn test_all_clear() {
        let mut ui = CalculatorUi::new();
        click_all(&mut ui, &["btn-5", "btn-plus", "btn-5", "btn-equals", "btn-ac"]);
        assert_eq!(ui.result_text(), "0");
        assert_eq!(ui.expression_text(), "");
    }

    #[test]
    fn test_decimal_button() {
        let mut ui = CalculatorUi::new();
        click_all(&mut ui, &["btn-decimal", "btn-5", "btn-decimal"]);
        assert_eq!(ui.result_text(), "0.5");
    }

    #[test]
    fn test_nan_rendered_verbatim() {
        let mut ui = CalculatorUi::new();
        click_all(&mut ui, &["btn-8", "btn-divide", "btn-0", "btn-equals"]);
        assert_eq!(ui.result_text(), "NaN");
    }

    #[test]
    fn test_unknown_button() {
        let mut ui = CalculatorUi::new();
        assert!(matches!(
            ui.click("btn-sqrt"),
            Err(CalcError::UnknownButton(_))
        ));
        assert!(matches!(ui.click(RESULT_ID), Err(CalcError::UnknownButton(_))));
    }

    #[test]
    fn test_press_key() {
        let mut ui = CalculatorUi::new();
        for key in ["7", "*", "6"] {
            ui.press_key(key).unwrap();
        }
        assert_eq!(ui.press_key("Enter").unwrap().as_deref(), Some("7 × 6 ="));
        assert_eq!(ui.result_text(), "42");
    }

    #[test]
    fn test_press_unknown_key() {
        let mut ui = CalculatorUi::new();
        assert!(matches!(ui.press_key("F1"), Err(CalcError::UnknownKey(_))));
    }

    #[test]
    fn test_events_recorded() {
        let mut ui = CalculatorUi::new();
        ui.press_key("1").unwrap();
        assert_eq!(
            ui.dom().event_history(),
            &[DomEvent::key_press("1"), DomEvent::click("btn-1")]
        );
    }

    #[test]
    fn test_grouping_disabled() {
        let config = CalcConfig::new().with_grouping(false);
        let mut ui = CalculatorUi::with_config(&config).unwrap();
        click_all(&mut ui, &["btn-1", "btn-0", "btn-0", "btn-0"]);
        assert_eq!(ui.result_text(), "1000");
    }

    #[test]
    fn test_comma_decimal_config() {
        let config = CalcConfig::new()
            .with_decimal_separator(',')
            .with_grouping_separator('.');
        let mut ui = CalculatorUi::with_config(&config).unwrap();
        click_all(&mut ui, &["btn-1", "btn-2", "btn-3", "btn-4", "btn-decimal", "btn-5"]);
        assert_eq!(ui.engine().display_value(), "1234,5");
        assert_eq!(ui.result_text(), "1.234,5");
    }

    #[test]
    fn test_comma_config_renders_comma_button() {
        let config = CalcConfig::new()
            .with_decimal_separator(',')
            .with_grouping_separator('.');
        let mut ui = CalculatorUi::with_config(&config).unwrap();
        assert_eq!(ui.dom().get_element_text("btn-decimal"), Some(","));
        ui.press_key("7").unwrap();
        ui.press_key(",").unwrap();
        ui.press_key("5").unwrap();
        assert_eq!(ui.engine().display_value(), "7,5");
    }

    #[test]
    fn test_reset() {
        let mut ui = CalculatorUi::new();
        click_all(&mut ui, &["btn-3", "btn-plus"]);
        ui.reset();
        assert_eq!(ui.result_text(), "0");
        assert_eq!(ui.expression_text(), "");
    }
}
