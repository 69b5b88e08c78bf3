//! Binary operators and the stateless evaluator
//!
//! Tokens are normalized on entry; anything unrecognized is kept as
//! `Operator::Unrecognized` and evaluates to its second operand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator chosen on the keypad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (× or *)
    Multiply,
    /// Division (÷ or /)
    Divide,
    /// Any other token, kept verbatim for display
    Unrecognized(String),
}

impl Operator {
    /// Normalizes a keypad token, accepting the ASCII aliases for × and ÷
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "×" | "*" => Self::Multiply,
            "÷" | "/" => Self::Divide,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns the operator symbol for display
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Unrecognized(token) => token,
        }
    }

    /// Returns true for the four arithmetic operators
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Applies the operator to two operands
    #[must_use]
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => divide(a, b),
            Self::Unrecognized(_) => b,
        }
    }
}

impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        Self::from_token(token)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Division yielding NaN for a zero divisor
fn divide(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        f64::NAN
    } else {
        a / b
    }
}

/// Evaluates `a <operator> b` without touching any calculator state
#[must_use]
pub fn perform_calculation(operator: &Operator, a: f64, b: f64) -> f64 {
    operator.apply(a, b)
}
