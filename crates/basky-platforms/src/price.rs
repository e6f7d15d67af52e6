//! Parsing of currency-prefixed price strings such as `"₹35"`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// First number in the string: digits with optional thousands separators and
/// up to two decimal places.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*)(?:\.(\d{1,2}))?").expect("valid amount regex")
});

/// Extracts a rupee amount from display text and returns it in paise.
///
/// `"₹35"` → `3500`, `"₹1,299"` → `129_900`, `"Rs. 35.5"` → `3550`.
/// Returns `None` when no digits are present.
#[must_use]
pub fn parse_amount_paise(raw: &str) -> Option<u64> {
    let caps = AMOUNT_RE.captures(raw)?;
    let whole: String = caps
        .get(1)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let rupees = whole.parse::<u64>().ok()?;

    let paise = match caps.get(2).map(|m| m.as_str()) {
        Some(frac) if frac.len() == 1 => frac.parse::<u64>().ok()? * 10,
        Some(frac) => frac.parse::<u64>().ok()?,
        None => 0,
    };

    rupees.checked_mul(100)?.checked_add(paise)
}

/// A price field that arrives either as display text or as a bare number of
/// rupees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Rupees(f64),
    Text(String),
}

impl PriceField {
    /// The amount in paise, or `None` when it cannot be read.
    #[must_use]
    pub fn paise(&self) -> Option<u64> {
        match self {
            PriceField::Text(text) => parse_amount_paise(text),
            PriceField::Rupees(rupees) if rupees.is_finite() && *rupees >= 0.0 => {
                Some(crate::decode::round_non_negative(rupees * 100.0))
            }
            PriceField::Rupees(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rupee_prefixed_integer() {
        assert_eq!(parse_amount_paise("\u{20b9}35"), Some(3500));
    }

    #[test]
    fn parses_without_symbol() {
        assert_eq!(parse_amount_paise("50"), Some(5000));
    }

    #[test]
    fn parses_thousands_separator() {
        assert_eq!(parse_amount_paise("\u{20b9}1,299"), Some(129_900));
    }

    #[test]
    fn parses_decimals() {
        assert_eq!(parse_amount_paise("Rs. 35.5"), Some(3550));
        assert_eq!(parse_amount_paise("\u{20b9}35.05"), Some(3505));
    }

    #[test]
    fn returns_none_without_digits() {
        assert_eq!(parse_amount_paise("\u{20b9}"), None);
        assert_eq!(parse_amount_paise(""), None);
        assert_eq!(parse_amount_paise("free"), None);
    }

    #[test]
    fn price_field_number_is_rupees() {
        let field: PriceField = serde_json::from_str("35").unwrap();
        assert_eq!(field.paise(), Some(3500));
        let field: PriceField = serde_json::from_str("-1").unwrap();
        assert_eq!(field.paise(), None);
    }

    #[test]
    fn price_field_text_is_parsed() {
        let field: PriceField = serde_json::from_str("\"\u{20b9}50\"").unwrap();
        assert_eq!(field.paise(), Some(5000));
    }
}
