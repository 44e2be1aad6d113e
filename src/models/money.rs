//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so sums and comparisons are exact.
//! Arithmetic saturates at the i64 bounds.
//! On disk an amount is a plain JSON decimal number such as `42.5`.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finman::models::Money;
    /// let amount = Money::from_cents(4250); // 42.50
    /// assert_eq!(amount.to_string(), "42.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Fractional part (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Convert from a decimal amount that is a whole number of cents.
    ///
    /// Returns `None` for amounts with more than two decimal places, and for
    /// values that are not finite or do not fit.
    pub fn from_f64(value: f64) -> Option<Self> {
        let scaled = value * 100.0;
        let cents = scaled.round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return None;
        }
        // float error grows with magnitude
        let tolerance = (scaled.abs() * f64::EPSILON * 4.0).max(1e-6);
        if (scaled - cents).abs() > tolerance {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "10", ".5". Digits past the second
    /// decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (negative, rest) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        if rest.is_empty() || rest == "." {
            return Err(invalid());
        }

        let (whole, frac) = match rest.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (rest, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };

        let total = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol, e.g. `$42.50` or `-$3.00`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.dollars().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.is_negative() {
            format!("-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.dollars(), self.cents_part())
        };
        f.pad(&text)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_f64(value).ok_or_else(|| {
            de::Error::custom(format!(
                "amount {} is not a whole number of cents",
                value
            ))
        })
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4250).to_string(), "42.50");
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::from_cents(30000).to_string(), "300.00");
        assert_eq!(format!("{:>8}", Money::from_cents(4250)), "   42.50");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(4250).format_with_symbol("$"), "$42.50");
        assert_eq!(Money::from_cents(-300).format_with_symbol("$"), "-$3.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("42.50").unwrap().cents(), 4250);
        assert_eq!(Money::parse("42.5").unwrap().cents(), 4250);
        assert_eq!(Money::parse("$10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("-1.25").unwrap().cents(), -125);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("1.999").unwrap().cents(), 199);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("--1").is_err());
        assert!(Money::parse(".").is_err());
    }

    #[test]
    fn test_serde_as_decimal() {
        let json = serde_json::to_string(&Money::from_cents(4250)).unwrap();
        assert_eq!(json, "42.5");

        let parsed: Money = serde_json::from_str("300").unwrap();
        assert_eq!(parsed.cents(), 30000);

        let parsed: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(parsed.cents(), 1999);

        let parsed: Money = serde_json::from_str("0.29").unwrap();
        assert_eq!(parsed.cents(), 29);
    }

    #[test]
    fn test_serde_rejects_fractional_cents() {
        let err = serde_json::from_str::<Money>("33.333").unwrap_err();
        assert!(err.to_string().contains("whole number of cents"));
        assert!(serde_json::from_str::<Money>("1e30").is_err());
        assert_eq!(Money::from_f64(-0.5), Some(Money::from_cents(-50)));
        assert_eq!(
            Money::from_f64(10_000_000_000.01),
            Some(Money::from_cents(1_000_000_000_001))
        );
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX - 10);
        assert_eq!((big + Money::from_cents(100)).cents(), i64::MAX);

        let mut acc = big;
        acc += big;
        assert_eq!(acc.cents(), i64::MAX);

        assert_eq!((-big - big).cents(), i64::MIN);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);

        let total: Money = [big, big, Money::from_cents(-5)].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX - 5);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, -50].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 300);
    }
}
