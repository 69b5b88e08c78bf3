//! Browser frontend
//!
//! A mock document and keypad UI that run natively for tests and the CLI,
//! plus `wasm-bindgen` bindings behind the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod grouping;
mod keypad;
mod ui;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{DomElement, DomEvent, MockDom};
pub use grouping::group_digits;
pub use keypad::{
    Keypad, KeypadAction, KeypadButtonDef, MockDomKeypadExt, ALL_CLEAR_LABEL, CLASS_EQUAL,
    CLASS_FUNC, CLASS_NUM, CLASS_OP,
};
pub use ui::{CalculatorUi, EXPRESSION_ID, RESULT_ID};
