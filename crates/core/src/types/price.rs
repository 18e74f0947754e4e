//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error returned when parsing an unrecognized currency code.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown currency code '{0}'")]
pub struct UnknownCurrency(String);

/// ISO 4217 currency codes supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// The glyph prepended to formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "\u{20b9}",
            Self::USD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// Parse an ISO 4217 code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "INR" => Some(Self::INR),
            "USD" => Some(Self::USD),
            "EUR" => Some(Self::EUR),
            "GBP" => Some(Self::GBP),
            _ => None,
        }
    }

    /// Thousands-grouping sizes as (first group, subsequent groups),
    /// counted from the right.
    ///
    /// The Indian convention groups the last three digits and then pairs
    /// (`12,34,567`); the other supported currencies group by threes.
    const fn grouping(self) -> (usize, usize) {
        match self {
            Self::INR => (3, 2),
            Self::USD | Self::EUR | Self::GBP => (3, 3),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownCurrency(s.to_owned()))
    }
}

/// A price with currency information.
///
/// [`Price::display`] renders the storefront's fixed formatting contract:
/// the currency glyph immediately followed by the amount with thousands
/// grouping in the currency's locale convention. The same contract applies
/// to unit prices, line totals, subtotals, and grand totals.
///
/// ## Examples
///
/// ```
/// use copper_mango_core::{Currency, Price};
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::from(39_999), Currency::INR);
/// assert_eq!(price.display(), "\u{20b9}39,999");
///
/// let large = Price::new(Decimal::from(1_234_567), Currency::INR);
/// assert_eq!(large.display(), "\u{20b9}12,34,567");
///
/// let usd = Price::new(Decimal::from(1_234_567), Currency::USD);
/// assert_eq!(usd.display(), "$1,234,567");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// Currency determining glyph and grouping convention.
    pub currency: Currency,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Format for display (e.g., `₹39,999`).
    ///
    /// Trailing fractional zeros are dropped; a remaining fractional part
    /// is appended ungrouped after the decimal point.
    #[must_use]
    pub fn display(&self) -> String {
        let text = self.amount.normalize().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + 4);
        out.push_str(self.currency.symbol());
        out.push_str(&group_digits(int_part, self.currency));
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }

    /// Parse a display-formatted amount (e.g., `"₹39,999"`) by stripping
    /// the currency glyph and digit-group separators before conversion.
    ///
    /// Only the first whitespace-separated token is considered, so price
    /// strings carrying trailing annotations (`"₹799 incl. GST"`) parse to
    /// the leading amount. Returns `None` when no numeric amount remains.
    #[must_use]
    pub fn parse_display(raw: &str, currency: Currency) -> Option<Self> {
        let token = raw.split_whitespace().next()?;
        let cleaned: String = token
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        let amount = Decimal::from_str(&cleaned).ok()?;
        Some(Self::new(amount, currency))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Insert thousands separators into a bare integer digit string.
fn group_digits(digits: &str, currency: Currency) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let (first, rest) = currency.grouping();
    let mut reversed = Vec::with_capacity(digits.len() + digits.len() / 2);
    let mut seen = 0;
    let mut group = first;
    for c in digits.chars().rev() {
        if seen == group {
            reversed.push(',');
            seen = 0;
            group = rest;
        }
        reversed.push(c);
        seen += 1;
    }

    let grouped: String = reversed.into_iter().rev().collect();
    format!("{sign}{grouped}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn inr(amount: i64) -> Price {
        Price::new(Decimal::from(amount), Currency::INR)
    }

    #[test]
    fn test_display_small_amount_ungrouped() {
        assert_eq!(inr(799).display(), "\u{20b9}799");
        assert_eq!(inr(0).display(), "\u{20b9}0");
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(inr(1_000).display(), "\u{20b9}1,000");
        assert_eq!(inr(39_999).display(), "\u{20b9}39,999");
        assert_eq!(inr(123_456).display(), "\u{20b9}1,23,456");
        assert_eq!(inr(12_345_678).display(), "\u{20b9}1,23,45,678");
    }

    #[test]
    fn test_display_western_grouping() {
        let price = Price::new(Decimal::from(1_234_567), Currency::USD);
        assert_eq!(price.display(), "$1,234,567");

        let price = Price::new(Decimal::from(999), Currency::GBP);
        assert_eq!(price.display(), "\u{a3}999");
    }

    #[test]
    fn test_display_fractional_amount() {
        let price = Price::new(Decimal::new(129_950, 2), Currency::INR);
        assert_eq!(price.display(), "\u{20b9}1,299.5");
    }

    #[test]
    fn test_display_drops_trailing_zeros() {
        let price = Price::new(Decimal::new(79_900, 2), Currency::INR);
        assert_eq!(price.display(), "\u{20b9}799");
    }

    #[test]
    fn test_parse_display_strips_symbol_and_separators() {
        let price = Price::parse_display("\u{20b9}39,999", Currency::INR).unwrap();
        assert_eq!(price.amount, Decimal::from(39_999));

        let price = Price::parse_display("$1,234.50", Currency::USD).unwrap();
        assert_eq!(price.amount, Decimal::new(123_450, 2));
    }

    #[test]
    fn test_parse_display_takes_leading_token() {
        let price = Price::parse_display("\u{20b9}799 incl. GST", Currency::INR).unwrap();
        assert_eq!(price.amount, Decimal::from(799));
    }

    #[test]
    fn test_parse_display_rejects_non_numeric() {
        assert!(Price::parse_display("free", Currency::INR).is_none());
        assert!(Price::parse_display("", Currency::INR).is_none());
        assert!(Price::parse_display("\u{20b9}", Currency::INR).is_none());
    }

    #[test]
    fn test_parse_display_roundtrips_formatting() {
        let original = inr(123_456);
        let parsed = Price::parse_display(&original.display(), Currency::INR).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("INR"), Some(Currency::INR));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code(" eur "), Some(Currency::EUR));
        assert_eq!(Currency::from_code("YEN"), None);
    }

    #[test]
    fn test_currency_default_is_inr() {
        assert_eq!(Currency::default(), Currency::INR);
    }

    #[test]
    fn test_currency_from_str() {
        let currency: Currency = "gbp".parse().unwrap();
        assert_eq!(currency, Currency::GBP);

        let err = "YEN".parse::<Currency>().unwrap_err();
        assert_eq!(err.to_string(), "unknown currency code 'YEN'");
    }
}
