//! Keypad state machine
//!
//! ```text
//!            digit/.              operator               digit/.
//!   Idle ──────────────► Idle ─────────────► OperatorChosen ─────► EnteringSecond
//!    ▲                                          │    ▲  operator       │
//!    │                 calculate / reset        │    └─────────────────┘
//!    └──────────────────────────────────────────┴──────────────────────┘
//! ```
//!
//! The left operand and the operator are stored together as one
//! [`PendingOperation`], so an operator can never be pending without an
//! operand.

use super::format::DisplayFormat;
use super::operations::Operator;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

const INITIAL_DISPLAY: &str = "0";

/// Left operand and the operator waiting for its right operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    /// Left-hand operand (unrounded)
    pub operand: f64,
    /// Operator to apply once the second operand is known
    pub operator: Operator,
}

/// Coarse position in the input cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// No operation pending
    Idle,
    /// Operator just chosen; the next digit starts a new number
    OperatorChosen,
    /// Typing the second operand
    EnteringSecond,
}

/// Observable engine state, as handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSnapshot {
    /// Current display text
    pub display_value: String,
    /// Left operand of the pending operation
    pub first_operand: Option<f64>,
    /// Operator symbol of the pending operation
    pub pending_operator: Option<String>,
    /// Whether the next digit replaces the display
    pub awaiting_second_operand: bool,
    /// `"<operand> <operator>"` while an operation is pending, else empty
    pub expression: String,
}

/// Single-pending-operation calculator
#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    format: DisplayFormat,
    display_value: String,
    pending: Option<PendingOperation>,
    awaiting_second_operand: bool,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    /// Creates an engine with the default display format
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(DisplayFormat::default())
    }

    /// Creates an engine with a custom display format
    #[must_use]
    pub fn with_format(format: DisplayFormat) -> Self {
        Self {
            format,
            display_value: INITIAL_DISPLAY.to_string(),
            pending: None,
            awaiting_second_operand: false,
        }
    }

    /// Display format in use
    #[must_use]
    pub const fn format(&self) -> &DisplayFormat {
        &self.format
    }

    /// Current display text
    #[must_use]
    pub fn display_value(&self) -> &str {
        &self.display_value
    }

    /// Left operand of the pending operation
    #[must_use]
    pub fn first_operand(&self) -> Option<f64> {
        self.pending.as_ref().map(|p| p.operand)
    }

    /// Operator waiting for its second operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<&Operator> {
        self.pending.as_ref().map(|p| &p.operator)
    }

    /// The pending operation, if any
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    /// True right after an operator was chosen and before any digit
    #[must_use]
    pub const fn is_awaiting_second_operand(&self) -> bool {
        self.awaiting_second_operand
    }

    /// Where the engine is in the input cycle
    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        match (&self.pending, self.awaiting_second_operand) {
            (None, _) => EnginePhase::Idle,
            (Some(_), true) => EnginePhase::OperatorChosen,
            (Some(_), false) => EnginePhase::EnteringSecond,
        }
    }

    /// Advisory `"<operand> <operator>"` line; empty when idle
    #[must_use]
    pub fn current_expression(&self) -> String {
        self.pending.as_ref().map_or_else(String::new, |p| {
            format!("{} {}", self.format.format_operand(p.operand), p.operator)
        })
    }

    /// Captures the observable state
    #[must_use]
    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot {
            display_value: self.display_value.clone(),
            first_operand: self.first_operand(),
            pending_operator: self.pending_operator().map(|op| op.symbol().to_string()),
            awaiting_second_operand: self.awaiting_second_operand,
            expression: self.current_expression(),
        }
    }

    /// Enters a digit. The digit is taken verbatim.
    pub fn input_digit(&mut self, digit: &str) {
        if self.awaiting_second_operand {
            self.display_value = digit.to_string();
            self.awaiting_second_operand = false;
        } else if self.display_value == INITIAL_DISPLAY
            || self.format.is_invalid_marker(&self.display_value)
        {
            self.display_value = digit.to_string();
        } else {
            self.display_value.push_str(digit);
        }
        trace!(digit, display = %self.display_value, "digit entered");
    }

    /// Enters the decimal separator, at most once per number
    pub fn input_decimal(&mut self, separator: &str) {
        if self.awaiting_second_operand || self.format.is_invalid_marker(&self.display_value) {
            self.display_value = format!("{INITIAL_DISPLAY}{separator}");
            self.awaiting_second_operand = false;
        } else if !self.display_value.contains(separator) {
            self.display_value.push_str(separator);
        }
        trace!(display = %self.display_value, "decimal entered");
    }

    /// Enters the decimal separator configured in the display format
    pub fn input_default_decimal(&mut self) {
        let separator = self.format.separator().to_string();
        self.input_decimal(&separator);
    }

    /// Chooses an operator, evaluating the pending operation first when a
    /// second operand has been entered.
    pub fn handle_operator(&mut self, token: &str) {
        let next = Operator::from_token(token);
        if !next.is_recognized() {
            warn!(token, "unrecognized operator, evaluates to the second operand");
        }
        let input_value = self.format.parse(&self.display_value);

        if self.awaiting_second_operand {
            if let Some(pending) = self.pending.as_mut() {
                trace!(from = %pending.operator, to = %next, "operator substituted");
                pending.operator = next;
                return;
            }
        }

        let operand = match self.pending.take() {
            None => input_value,
            Some(PendingOperation { operand, operator }) => {
                let result = operator.apply(operand, input_value);
                debug!(%operator, lhs = operand, rhs = input_value, result, "chained evaluation");
                self.display_value = self.format.format_result(result);
                result
            }
        };

        self.pending = Some(PendingOperation {
            operand,
            operator: next,
        });
        self.awaiting_second_operand = true;
        trace!(expression = %self.current_expression(), "operator chosen");
    }

    /// Evaluates the pending operation. Returns the history line
    /// `"<a> <op> <b> ="`, or `None` when nothing is pending.
    pub fn calculate(&mut self) -> Option<String> {
        let PendingOperation { operand, operator } = self.pending.take()?;
        let input_value = self.format.parse(&self.display_value);
        let result = operator.apply(operand, input_value);

        let history = format!(
            "{} {} {} =",
            self.format.format_operand(operand),
            operator,
            self.format.format_operand(input_value)
        );

        if result.is_nan() {
            debug!(%operator, lhs = operand, rhs = input_value, "evaluation produced NaN");
        } else {
            debug!(%operator, lhs = operand, rhs = input_value, result, "evaluated");
        }

        self.display_value = self.format.format_result(result);
        self.awaiting_second_operand = false;
        Some(history)
    }

    /// Restores the initial state
    pub fn reset(&mut self) {
        self.display_value = INITIAL_DISPLAY.to_string();
        self.pending = None;
        self.awaiting_second_operand = false;
        trace!("reset");
    }
}
