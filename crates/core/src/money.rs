use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A currency amount held at exactly two fraction digits.
///
/// Serializes as a decimal string (`"50.00"`), which is also its `Display` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: u32) -> Self {
        Money(Decimal::new(i64::from(cents), 2))
    }

    fn from_decimal(decimal: Decimal) -> Self {
        let mut d = decimal;
        d.rescale(2);
        Money(d)
    }

    /// Parse an amount as printed on a receipt: digits with a `.` or `,`
    /// decimal separator. Signs, currency symbols and thousands grouping
    /// are not accepted.
    pub fn parse_amount(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return None;
        }
        let normalized = s.replace(',', ".");
        let dec = Decimal::from_str(&normalized).ok()?;
        Some(Self::from_decimal(dec))
    }

    pub fn zero() -> Self {
        Money::from_cents(0)
    }
}

impl TryFrom<String> for Money {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Money::parse_amount(&s).ok_or_else(|| format!("not a receipt amount: {s:?}"))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
