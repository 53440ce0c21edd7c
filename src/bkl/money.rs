use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use thiserror::Error;

/// Number of minor units in one major unit (two decimal places)
const SCALE: i64 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Overflow error while applying {0} operation on {1} and {2}")]
    Overflow(&'static str, Money, Money),

    #[error("Underflow error while applying {0} operation on {1} and {2}")]
    Underflow(&'static str, Money, Money),

    #[error("Money parse error: {0}, {1:?}")]
    Parse(&'static str, String),
}

/// Exact fixed-point amount, stored as a count of hundredths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i64::MAX);
    pub const MIN: Self = Self(i64::MIN);

    /// Smallest amount any money movement may carry (0.01)
    pub const MIN_AMOUNT: Self = Self(1);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a decimal string such as `"40"`, `"40.5"` or `"-12.34"`.
    ///
    /// More than two fractional digits is an error rather than a rounding.
    pub fn parse(string: &str) -> Result<Self, MoneyError> {
        let trimmed = string.trim();

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyError::Parse("Invalid whole part", string.to_string()));
        }

        let cents = match fraction {
            None => 0,
            Some(fraction) => {
                if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(MoneyError::Parse("Invalid fractional part", string.to_string()));
                }

                if fraction.len() > 2 {
                    return Err(MoneyError::Parse("Too many decimal places", string.to_string()));
                }

                // "5" means 50 hundredths
                let padded = format!("{:0<2}", fraction);
                padded
                    .parse::<i64>()
                    .map_err(|_| MoneyError::Parse("Invalid fractional part", string.to_string()))?
            }
        };

        let whole: i64 = whole
            .parse()
            .map_err(|_| MoneyError::Parse("Amount out of range", string.to_string()))?;

        let value = whole
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(|| MoneyError::Parse("Amount out of range", string.to_string()))?;

        if negative {
            return Ok(Money(-value));
        }

        Ok(Money(value))
    }

    /// Adds `other` in place. On error `self` is left untouched.
    pub fn add(&mut self, other: &Self) -> Result<(), MoneyError> {
        let a = self.0;
        let b = other.0;

        self.0 = match a.checked_add(b) {
            Some(sum) => sum,
            None if b > 0 => return Err(MoneyError::Overflow("add", *self, *other)),
            None => return Err(MoneyError::Underflow("add", *self, *other)),
        };

        Ok(())
    }

    /// Subtracts `other` in place. On error `self` is left untouched.
    pub fn sub(&mut self, other: &Self) -> Result<(), MoneyError> {
        let a = self.0;
        let b = other.0;

        self.0 = match a.checked_sub(b) {
            Some(diff) => diff,
            None if b < 0 => return Err(MoneyError::Overflow("sub", *self, *other)),
            None => return Err(MoneyError::Underflow("sub", *self, *other)),
        };

        Ok(())
    }

    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        let mut sum = self;
        sum.add(&other)?;
        Ok(sum)
    }

    pub fn checked_sub(self, other: Self) -> Result<Self, MoneyError> {
        let mut diff = self;
        diff.sub(&other)?;
        Ok(diff)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;

        write!(f, "{sign}{}.{:02}", abs / scale, abs % scale)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        Money::parse(&string).map_err(de::Error::custom)
    }
}
