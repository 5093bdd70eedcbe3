use serde::{Serialize, Serializer};
use std::fmt;

/// Exact monetary amount in cents, stored as an INTEGER column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, sqlx::Type)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_mul(self, factor: i64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Parse a decimal amount such as `49.99`, `10` or `0.5`.
    ///
    /// At most two fractional digits are accepted; signs, exponents and
    /// grouping separators are rejected.
    pub fn parse(input: &str) -> Result<Money, MoneyParseError> {
        let s = input.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(MoneyParseError::NotANumber);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyParseError::NotANumber);
        }
        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError::OutOfRange)?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| MoneyParseError::NotANumber)? * 10,
            _ => frac.parse().map_err(|_| MoneyParseError::NotANumber)?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Money)
            .ok_or(MoneyParseError::OutOfRange)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyParseError {
    NotANumber,
    TooPrecise,
    OutOfRange,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::NotANumber => f.write_str("not a number"),
            MoneyParseError::TooPrecise => f.write_str("at most two decimal places are allowed"),
            MoneyParseError::OutOfRange => f.write_str("amount is too large"),
        }
    }
}

/// Renders with thousands separators and two decimals, e.g. `1,234.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let digits = (abs / 100).to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}{grouped}.{:02}", abs % 100)
    }
}

/// Serialized as a plain decimal string, e.g. `"1234.50"`.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        serializer.collect_str(&format_args!("{sign}{}.{:02}", abs / 100, abs % 100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_price_shapes() {
        assert_eq!(Money::parse("49.99"), Ok(Money::from_cents(4999)));
        assert_eq!(Money::parse("10"), Ok(Money::from_cents(1000)));
        assert_eq!(Money::parse("0.5"), Ok(Money::from_cents(50)));
        assert_eq!(Money::parse(".25"), Ok(Money::from_cents(25)));
        assert_eq!(Money::parse(" 3. "), Ok(Money::from_cents(300)));
    }

    #[test]
    fn rejects_malformed_prices() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("."), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("-5"), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("1e3"), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("abc"), Err(MoneyParseError::NotANumber));
        assert_eq!(Money::parse("1.005"), Err(MoneyParseError::TooPrecise));
        assert_eq!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange)
        );
    }

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(11000).to_string(), "110.00");
        assert_eq!(Money::from_cents(123456789).to_string(), "1,234,567.89");
        assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_cents(123450)).unwrap();
        assert_eq!(json, r#""1234.50""#);
    }
}
