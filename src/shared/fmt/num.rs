//! Number formatting utilities for human-readable display.
//!
//! Handles f64 values: magnitude-suffixed currency (`$1.23B`), percentages,
//! en-US digit grouping and fixed two-decimal USD prices.

const TRILLION: f64 = 1e12;
const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;

/// Trims trailing zeros, adds thousands separators.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };

    let parts = trimmed.split('.').collect::<Vec<_>>();
    let integer_part = group_thousands(parts[0]);

    if parts.len() > 1 {
        format!("{}.{}", integer_part, parts[1])
    } else {
        integer_part
    }
}

/// Insert `,` every three digits of an integer string (sign preserved).
fn group_thousands(integer: &str) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    format!("{}{}", sign, grouped)
}

/// Currency with a magnitude suffix: `$1.23T`, `$4.56B`, `$7.89M`, else `$12.34`.
///
/// Values below one million are not digit-grouped.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    let (scaled, suffix) = if abs >= TRILLION {
        (abs / TRILLION, "T")
    } else if abs >= BILLION {
        (abs / BILLION, "B")
    } else if abs >= MILLION {
        (abs / MILLION, "M")
    } else {
        (abs, "")
    };

    format!("{}${:.2}{}", sign, scaled, suffix)
}

/// Two-decimal percentage: `12.34%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Percentage with an explicit `+` for non-negative values: `+2.34%`, `-1.23%`.
pub fn format_signed_percentage(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format_percentage(value)
    }
}

/// Direction arrow followed by the absolute change: `↑ 2.34%`, `↓ 1.23%`.
pub fn format_change_arrow(value: f64) -> String {
    let arrow = if value >= 0.0 { "↑" } else { "↓" };
    format!("{} {}", arrow, format_percentage(value.abs()))
}

/// en-US grouped number with at most three fraction digits: `19,500,000.123`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    display_formatted_string(format!("{:.3}", value))
}

/// USD price with grouping and exactly two decimals: `$51,234.78`.
pub fn format_usd(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(integer), fraction)
}
