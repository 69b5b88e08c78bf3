//! Display precision policy
//!
//! Results are rounded to a fixed number of fractional digits and then
//! re-rendered in their shortest decimal form, so `0.1 + 0.2` shows `0.3`.
//! Everything that turns numbers into display text (or back) goes through
//! [`DisplayFormat`], which keeps the policy out of the state machine.

use super::{CalcError, CalcResult};
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept in a displayed result
pub const DEFAULT_PRECISION: u32 = 7;

/// Largest precision that still survives a round trip through f64
pub const MAX_PRECISION: u32 = 15;

/// Display text for a not-a-number result
pub const NAN_MARKER: &str = "NaN";

/// Numeric display rules shared by the engine and its renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormat {
    precision: u32,
    separator: char,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            separator: '.',
        }
    }
}

impl DisplayFormat {
    /// Creates the default format (7 digits, `.` separator)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of fractional digits kept in results
    pub fn with_precision(mut self, precision: u32) -> CalcResult<Self> {
        if precision > MAX_PRECISION {
            return Err(CalcError::InvalidPrecision {
                precision,
                max: MAX_PRECISION,
            });
        }
        self.precision = precision;
        Ok(self)
    }

    /// Sets the decimal separator
    pub fn with_separator(mut self, separator: char) -> CalcResult<Self> {
        validate_separator(separator)?;
        self.separator = separator;
        Ok(self)
    }

    /// Fractional digits kept in results
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Decimal separator
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Rounds a computed result and renders it for the display
    #[must_use]
    pub fn format_result(&self, value: f64) -> String {
        self.localize(format_number(round_to_precision(value, self.precision)))
    }

    /// Renders an operand as-is, without rounding
    #[must_use]
    pub fn format_operand(&self, value: f64) -> String {
        self.localize(format_number(value))
    }

    /// Parses display text; anything unparseable is NaN
    #[must_use]
    pub fn parse(&self, display: &str) -> f64 {
        let parsed = if self.separator == '.' {
            display.parse::<f64>()
        } else {
            display.replace(self.separator, ".").parse::<f64>()
        };
        parsed.unwrap_or(f64::NAN)
    }

    /// Returns true when the display holds NaN or an infinity
    #[must_use]
    pub fn is_invalid_marker(&self, display: &str) -> bool {
        !self.parse(display).is_finite()
    }

    fn localize(&self, text: String) -> String {
        if self.separator == '.' {
            text
        } else {
            text.replace('.', &self.separator.to_string())
        }
    }
}

/// Rejects separators that could be read as part of a numeral
pub fn validate_separator(separator: char) -> CalcResult<()> {
    if separator.is_ascii_digit()
        || separator.is_alphabetic()
        || separator.is_whitespace()
        || matches!(separator, '-' | '+')
    {
        return Err(CalcError::InvalidSeparator(separator));
    }
    Ok(())
}

/// Rounds to `precision` fractional digits, ties away from zero.
///
/// The tie is decided on the decimal expansion of the binary value, so
/// `1 / 256 = 0.00390625` rounds up to `0.0039063`. Non-finite values and
/// magnitudes too large for a `Decimal` pass through unchanged.
#[must_use]
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_f64_retain(value)
        .map(|exact| {
            exact.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
        })
        .and_then(|rounded| rounded.to_string().parse::<f64>().ok())
        .unwrap_or(value)
}

/// Shortest decimal rendering, never in exponent form
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        NAN_MARKER.to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // -0 renders as 0
        "0".to_string()
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== round_to_precision =====

    #[test]
    fn test_round_drops_float_noise() {
        assert_eq!(round_to_precision(0.1 + 0.2, 7), 0.3);
    }

    #[test]
    fn test_round_repeating_fraction() {
        assert_eq!(round_to_precision(1.0 / 3.0, 7), 0.3333333);
        assert_eq!(round_to_precision(2.0 / 3.0, 7), 0.6666667);
    }

    #[test]
    fn test_round_ties_away_from_zero() {
        assert_eq!(round_to_precision(1.0 / 256.0, 7), 0.0039063);
        assert_eq!(round_to_precision(5.0 / 256.0, 7), 0.0195313);
        assert_eq!(round_to_precision(-1.0 / 256.0, 7), -0.0039063);
        assert_eq!(round_to_precision(0.125, 2), 0.13);
        assert_eq!(round_to_precision(2.5, 0), 3.0);
    }

    #[test]
    fn test_round_zero_precision() {
        assert_eq!(round_to_precision(2.4, 0), 2.0);
    }

    #[test]
    fn test_round_non_finite_passthrough() {
        assert!(round_to_precision(f64::NAN, 7).is_nan());
        assert_eq!(round_to_precision(f64::INFINITY, 7), f64::INFINITY);
    }

    // ===== format_number =====

    #[test]
    fn test_format_integer() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-5.0), "-5");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.125), "0.125");
    }

    #[test]
    fn test_format_no_exponent() {
        assert_eq!(format_number(1e-7), "0.0000001");
        assert_eq!(format_number(1e21), "1000000000000000000000");
    }

    #[test]
    fn test_format_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    // ===== DisplayFormat =====

    #[test]
    fn test_default_format() {
        let fmt = DisplayFormat::default();
        assert_eq!(fmt.precision(), DEFAULT_PRECISION);
        assert_eq!(fmt.separator(), '.');
    }

    #[test]
    fn test_format_result_rounds() {
        let fmt = DisplayFormat::new();
        assert_eq!(fmt.format_result(0.1 + 0.2), "0.3");
        assert_eq!(fmt.format_result(10.0 / 3.0), "3.3333333");
    }

    #[test]
    fn test_format_result_ties() {
        let fmt = DisplayFormat::new();
        assert_eq!(fmt.format_result(1.0 / 256.0), "0.0039063");
        assert_eq!(fmt.format_result(5.0 / 256.0), "0.0195313");
        assert_eq!(fmt.format_result(-1.0 / 256.0), "-0.0039063");
        assert_eq!(fmt.format_result(1.0 / 7.0), "0.1428571");
    }

    #[test]
    fn test_format_operand_keeps_full_value() {
        let fmt = DisplayFormat::new();
        assert_eq!(fmt.format_operand(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_custom_precision() {
        let fmt = DisplayFormat::new().with_precision(2).unwrap();
        assert_eq!(fmt.format_result(10.0 / 3.0), "3.33");
    }

    #[test]
    fn test_precision_out_of_range() {
        let err = DisplayFormat::new().with_precision(16).unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidPrecision {
                precision: 16,
                max: 15
            }
        ));
    }

    #[test]
    fn test_comma_separator_round_trip() {
        let fmt = DisplayFormat::new().with_separator(',').unwrap();
        assert_eq!(fmt.format_result(2.5), "2,5");
        assert_eq!(fmt.parse("2,5"), 2.5);
    }

    #[test]
    fn test_invalid_separators() {
        for sep in ['5', 'e', ' ', '-', '+'] {
            assert!(DisplayFormat::new().with_separator(sep).is_err(), "{sep:?}");
        }
    }

    #[test]
    fn test_parse_trailing_point() {
        let fmt = DisplayFormat::new();
        assert_eq!(fmt.parse("12."), 12.0);
        assert_eq!(fmt.parse("0."), 0.0);
    }

    #[test]
    fn test_parse_markers() {
        let fmt = DisplayFormat::new();
        assert!(fmt.parse("NaN").is_nan());
        assert_eq!(fmt.parse("Infinity"), f64::INFINITY);
        assert_eq!(fmt.parse("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_garbage_is_nan() {
        let fmt = DisplayFormat::new();
        assert!(fmt.parse("").is_nan());
        assert!(fmt.parse("1.2.3").is_nan());
    }

    #[test]
    fn test_is_invalid_marker() {
        let fmt = DisplayFormat::new();
        assert!(fmt.is_invalid_marker("NaN"));
        assert!(fmt.is_invalid_marker("-Infinity"));
        assert!(!fmt.is_invalid_marker("0."));
        assert!(!fmt.is_invalid_marker("-12.5"));
    }

    proptest! {
        #[test]
        fn prop_format_result_reparses_to_rounded(v in -1e9f64..1e9f64) {
            let fmt = DisplayFormat::new();
            let shown = fmt.format_result(v);
            prop_assert_eq!(fmt.parse(&shown), round_to_precision(v, DEFAULT_PRECISION));
        }

        #[test]
        fn prop_format_result_has_bounded_fraction(v in -1e9f64..1e9f64) {
            let shown = DisplayFormat::new().format_result(v);
            let fraction = shown.split('.').nth(1).map_or(0, str::len);
            prop_assert!(fraction <= DEFAULT_PRECISION as usize);
        }
    }
}
