//! Margin percentage parsing

use crate::error::{Error, Result};

/// Parse a margin percentage string into a decimal fraction.
///
/// Accepts "45", "45%", "42.5", "42.5%". The percentage must be positive;
/// values of 100% or more parse but are rejected later by rate derivation,
/// which owns that domain rule.
///
/// # Examples
/// ```
/// use pricebook_core::margin::parse_margin;
///
/// assert_eq!(parse_margin("45%").unwrap(), 0.45);
/// assert_eq!(parse_margin("42.5").unwrap(), 0.425);
/// ```
pub fn parse_margin(input: &str) -> Result<f64> {
    let cleaned = input.trim();
    if cleaned.is_empty() {
        return Err(invalid(input, "input cannot be empty"));
    }

    let cleaned = cleaned.strip_suffix('%').unwrap_or(cleaned).trim();
    let percentage: f64 = cleaned
        .parse()
        .map_err(|_| invalid(input, "not a number"))?;

    if !percentage.is_finite() || percentage <= 0.0 {
        return Err(invalid(input, "margin must be a positive percentage"));
    }

    Ok(percentage / 100.0)
}

fn invalid(input: &str, reason: &str) -> Error {
    Error::InvalidMargin {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_formats() {
        assert_eq!(parse_margin("45").unwrap(), 0.45);
        assert_eq!(parse_margin("45%").unwrap(), 0.45);
        assert_eq!(parse_margin("42.5").unwrap(), 0.425);
        assert_eq!(parse_margin(" 42.5% ").unwrap(), 0.425);
    }

    #[test]
    fn test_rejected_inputs() {
        assert!(parse_margin("").is_err());
        assert!(parse_margin("   ").is_err());
        assert!(parse_margin("abc").is_err());
        assert!(parse_margin("-10").is_err());
        assert!(parse_margin("0").is_err());
        assert!(parse_margin("%").is_err());
    }
}
