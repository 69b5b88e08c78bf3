//! Keypad layout and key mapping
//!
//! Layout:
//! ```text
//! [ AC ]             [ ÷ ]
//! [ 7  ] [ 8 ] [ 9 ] [ × ]
//! [ 4  ] [ 5 ] [ 6 ] [ - ]
//! [ 1  ] [ 2 ] [ 3 ] [ + ]
//! [ 0  ] [ . ] [ = ]
//! ```
//!
//! Buttons carry the css classes the UI dispatches on: `btn-num` for digits
//! and the decimal point, `btn-op`, `btn-equal` and `btn-func`.

use super::dom::{DomElement, MockDom};
use crate::core::{CalculatorEngine, Operator};

/// Class for digit and decimal buttons
pub const CLASS_NUM: &str = "btn-num";
/// Class for operator buttons
pub const CLASS_OP: &str = "btn-op";
/// Class for the equals button
pub const CLASS_EQUAL: &str = "btn-equal";
/// Class for function buttons (AC)
pub const CLASS_FUNC: &str = "btn-func";

/// Label of the all-clear button
pub const ALL_CLEAR_LABEL: &str = "AC";

/// Actions that keypad buttons can perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypadAction {
    /// Enter a digit (0-9)
    Digit(u8),
    /// Enter the decimal separator
    Decimal,
    /// Choose an operator
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Reset the calculator
    AllClear,
}

impl KeypadAction {
    /// Maps a keyboard key (or CLI token) to an action
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
                key.parse().ok().map(Self::Digit)
            }
            "." | "," => Some(Self::Decimal),
            "+" | "-" | "*" | "/" | "×" | "÷" => Some(Self::Operator(Operator::from_token(key))),
            "=" | "Enter" => Some(Self::Equals),
            "AC" | "Escape" | "c" | "C" => Some(Self::AllClear),
            _ => None,
        }
    }

    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::AllClear => ALL_CLEAR_LABEL.to_string(),
        }
    }

    /// CSS class of the button carrying this action
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Digit(_) | Self::Decimal => CLASS_NUM,
            Self::Operator(_) => CLASS_OP,
            Self::Equals => CLASS_EQUAL,
            Self::AllClear => CLASS_FUNC,
        }
    }

    /// Applies the action to an engine. Returns the history line on `=`.
    pub fn apply(&self, engine: &mut CalculatorEngine) -> Option<String> {
        match self {
            Self::Digit(d) => {
                engine.input_digit(&d.to_string());
                None
            }
            Self::Decimal => {
                engine.input_default_decimal();
                None
            }
            Self::Operator(op) => {
                engine.handle_operator(op.symbol());
                None
            }
            Self::Equals => engine.calculate(),
            Self::AllClear => {
                engine.reset();
                None
            }
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        let id = match &action {
            KeypadAction::Digit(d) => format!("btn-{d}"),
            KeypadAction::Decimal => "btn-decimal".to_string(),
            KeypadAction::Operator(op) => format!("btn-{}", op_name(op)),
            KeypadAction::Equals => "btn-equals".to_string(),
            KeypadAction::AllClear => "btn-ac".to_string(),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }
}

/// Element id fragment for an operator
fn op_name(op: &Operator) -> &'static str {
    match op {
        Operator::Add => "plus",
        Operator::Subtract => "minus",
        Operator::Multiply => "times",
        Operator::Divide => "divide",
        Operator::Unrecognized(_) => "op",
    }
}

/// Calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
    decimal_label: char,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Element id of the keypad container
    pub const CONTAINER_ID: &'static str = "keypad-container";

    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let digit = |d: u8, row, col| KeypadButtonDef::new(KeypadAction::Digit(d), row, col);
        let op = |op: Operator, row, col| KeypadButtonDef::new(KeypadAction::Operator(op), row, col);

        let buttons = vec![
            KeypadButtonDef::new(KeypadAction::AllClear, 0, 0),
            op(Operator::Divide, 0, 3),
            digit(7, 1, 0),
            digit(8, 1, 1),
            digit(9, 1, 2),
            op(Operator::Multiply, 1, 3),
            digit(4, 2, 0),
            digit(5, 2, 1),
            digit(6, 2, 2),
            op(Operator::Subtract, 2, 3),
            digit(1, 3, 0),
            digit(2, 3, 1),
            digit(3, 3, 2),
            op(Operator::Add, 3, 3),
            digit(0, 4, 0),
            KeypadButtonDef::new(KeypadAction::Decimal, 4, 1),
            KeypadButtonDef::new(KeypadAction::Equals, 4, 2),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
            decimal_label: '.',
        }
    }

    /// Renders the decimal button with `separator` instead of `.`
    #[must_use]
    pub const fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_label = separator;
        self
    }

    /// Label rendered on the button carrying `action`
    #[must_use]
    pub fn button_label(&self, action: &KeypadAction) -> String {
        match action {
            KeypadAction::Decimal => self.decimal_label.to_string(),
            other => other.label(),
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button at a grid position; gaps in the grid return `None`
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button performing an action
    #[must_use]
    pub fn find_button_for(&self, action: &KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| &b.action == action)
    }

    /// Button id a keyboard key would press
    #[must_use]
    pub fn button_id_for_key(&self, key: &str) -> Option<&str> {
        let action = KeypadAction::from_key(key)?;
        self.find_button_for(&action).map(|b| b.id.as_str())
    }

    /// Processes a button click and returns its action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action.clone())
    }

    /// Creates DOM elements for all keypad buttons
    #[must_use]
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&self.button_label(&btn.action))
                    .with_class("btn")
                    .with_class(btn.action.css_class())
                    .with_attr("data-row", &btn.row.to_string())
                    .with_attr("data-col", &btn.col.to_string())
            })
            .collect()
    }

    /// Creates the keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.create_dom_elements().into_iter().fold(
            DomElement::new("div")
                .with_id(Self::CONTAINER_ID)
                .with_class("keypad"),
            DomElement::with_child,
        )
    }
}

/// Extension trait for MockDom to add keypad
pub trait MockDomKeypadExt {
    /// Registers the keypad container and every button
    fn add_keypad(&mut self, keypad: &Keypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &Keypad) {
        self.register_element(keypad.create_keypad_element());
        for btn_elem in keypad.create_dom_elements() {
            self.register_element(btn_elem);
        }
    }
}
