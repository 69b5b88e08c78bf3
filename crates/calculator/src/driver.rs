//! Unified Calculator Driver
//!
//! Specification functions are written once against [`CalculatorDriver`] and
//! run against every frontend: the bare engine and the keypad UI.
//!
//! The UI groups the display in thousands, so the specifications keep every
//! number below 1000 to compare the same text on every driver.

use crate::core::{CalcError, CalcResult, CalculatorEngine};
use crate::wasm::{CalculatorUi, KeypadAction};

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust
/// use keypad_calc::driver::{verify_arithmetic, CalculatorDriver};
/// use keypad_calc::CalculatorEngine;
///
/// let mut engine = CalculatorEngine::new();
/// verify_arithmetic(&mut engine).unwrap();
/// assert_eq!(engine.display(), "0");
/// ```
pub trait CalculatorDriver {
    /// Presses a key (`"0"`-`"9"`, `"."`, `"+"`, `"-"`, `"*"`, `"/"`, `"="`,
    /// `"AC"`). Returns the history line when the key was `=`.
    fn press(&mut self, key: &str) -> CalcResult<Option<String>>;

    /// Main display text
    fn display(&self) -> String;

    /// Expression line text
    fn expression(&self) -> String;

    /// Restores the initial state
    fn reset(&mut self);

    /// Presses each key in turn, returning the last history line produced
    fn press_all(&mut self, keys: &[&str]) -> CalcResult<Option<String>> {
        let mut last = None;
        for key in keys {
            if let Some(line) = self.press(key)? {
                last = Some(line);
            }
        }
        Ok(last)
    }
}

impl CalculatorDriver for CalculatorEngine {
    fn press(&mut self, key: &str) -> CalcResult<Option<String>> {
        let action =
            KeypadAction::from_key(key).ok_or_else(|| CalcError::UnknownKey(key.to_string()))?;
        Ok(action.apply(self))
    }

    fn display(&self) -> String {
        self.display_value().to_string()
    }

    fn expression(&self) -> String {
        self.current_expression()
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}

impl CalculatorDriver for CalculatorUi {
    fn press(&mut self, key: &str) -> CalcResult<Option<String>> {
        self.press_key(key)
    }

    fn display(&self) -> String {
        self.result_text().to_string()
    }

    fn expression(&self) -> String {
        self.expression_text().to_string()
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}

// ===== Unified Specifications =====

/// Verifies digit entry replaces the initial zero and then appends
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    assert_eq!(driver.display(), "0");
    driver.press_all(&["0", "0"])?;
    assert_eq!(driver.display(), "0");
    driver.press_all(&["4", "0", "7"])?;
    assert_eq!(driver.display(), "407");
    driver.reset();
    Ok(())
}

/// Verifies the decimal point is entered at most once per number
pub fn verify_decimal_entry<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.press_all(&["1", ".", ".", "5", "."])?;
    assert_eq!(driver.display(), "1.5");

    driver.press("+")?;
    driver.press(".")?;
    assert_eq!(driver.display(), "0.");
    driver.reset();
    Ok(())
}

/// Verifies the four operators and the history line
pub fn verify_arithmetic<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    let cases: [(&[&str], &str, &str); 5] = [
        (&["2", "+", "3", "="], "5", "2 + 3 ="),
        (&["7", "-", "9", "="], "-2", "7 - 9 ="),
        (&["6", "*", "7", "="], "42", "6 × 7 ="),
        (&["1", "0", "/", "4", "="], "2.5", "10 ÷ 4 ="),
        (&[".", "1", "+", ".", "2", "="], "0.3", "0.1 + 0.2 ="),
    ];
    for (keys, display, history) in cases {
        let line = driver.press_all(keys)?;
        assert_eq!(driver.display(), display);
        assert_eq!(line.as_deref(), Some(history));
        driver.reset();
    }
    Ok(())
}

/// Verifies a zero first operand is a real operand
pub fn verify_zero_operand<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.press_all(&["0", "+", "5", "="])?;
    assert_eq!(driver.display(), "5");
    driver.reset();

    driver.press_all(&["0", "-", "5", "="])?;
    assert_eq!(driver.display(), "-5");
    driver.reset();
    Ok(())
}

/// Verifies division by zero shows the invalid marker
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.press_all(&["8", "/", "0", "="])?;
    assert_eq!(driver.display(), "NaN");
    driver.reset();

    driver.press_all(&["0", "/", "0", "="])?;
    assert_eq!(driver.display(), "NaN");
    driver.reset();
    Ok(())
}

/// Verifies a second operator before any digit replaces the first
pub fn verify_operator_substitution<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.press_all(&["5", "+", "-"])?;
    assert_eq!(driver.expression(), "5 -");
    driver.press_all(&["3", "="])?;
    assert_eq!(driver.display(), "2");
    driver.reset();
    Ok(())
}

/// Verifies an operator after a second operand evaluates left to right
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.press_all(&["2", "+", "3", "*"])?;
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.expression(), "5 ×");
    driver.press_all(&["4", "="])?;
    assert_eq!(driver.display(), "20");
    driver.reset();
    Ok(())
}

/// Verifies reset from every phase
pub fn verify_reset<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    for keys in [&["9"][..], &["9", "+"], &["9", "+", "1"], &["9", "+", "1", "="]] {
        driver.press_all(keys)?;
        driver.press("AC")?;
        assert_eq!(driver.display(), "0");
        assert_eq!(driver.expression(), "");
    }
    Ok(())
}

/// Verifies input after an invalid result starts fresh and NaN propagates
pub fn verify_nan_recovery<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.press_all(&["5", "/", "0", "=", "3"])?;
    assert_eq!(driver.display(), "3");
    driver.reset();

    driver.press_all(&["5", "/", "0", "=", "+", "2", "="])?;
    assert_eq!(driver.display(), "NaN");
    driver.reset();
    Ok(())
}

/// Runs every specification against a driver
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    verify_digit_entry(driver)?;
    verify_decimal_entry(driver)?;
    verify_arithmetic(driver)?;
    verify_zero_operand(driver)?;
    verify_division_by_zero(driver)?;
    verify_operator_substitution(driver)?;
    verify_chaining(driver)?;
    verify_reset(driver)?;
    verify_nan_recovery(driver)?;
    Ok(())
}
