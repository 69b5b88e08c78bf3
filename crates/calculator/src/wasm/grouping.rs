//! Digit grouping for presentation
//!
//! Works on the display text rather than on a parsed number, so a trailing
//! decimal point or trailing zeros being typed stay visible. Output is for
//! rendering only and is never fed back into the engine.

/// Groups the integer digits of `display` in thousands.
///
/// Text that is not a plain numeral (`NaN`, `Infinity`) is returned as-is.
#[must_use]
pub fn group_digits(display: &str, grouping_separator: char, decimal_separator: char) -> String {
    let (int_part, rest) = display
        .find(decimal_separator)
        .map_or((display, ""), |pos| display.split_at(pos));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |d| ("-", d));

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return display.to_string();
    }

    let mut grouped = String::with_capacity(display.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(grouping_separator);
        }
        grouped.push(ch);
    }
    grouped.push_str(rest);
    grouped
}
