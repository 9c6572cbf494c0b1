//! Money Value Type
//!
//! All balances and movement amounts are carried as [`Money`]: a
//! non-negative integral amount in the smallest currency unit. Conversion
//! between the internal representation and client-facing strings goes
//! through [`parse_amount`] / [`format_amount`] - nowhere else.
//!
//! ## Internal Representation
//! - Amounts are stored as `i64` minor units with the invariant `amount >= 0`,
//!   matching the `BIGINT CHECK (balance >= 0)` column they round-trip to.
//! - The scale factor is `10^decimals`; decimals is a deployment parameter
//!   (see `AppConfig`), default 2.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Money errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount must not be negative")]
    InvalidAmount,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Amount too large, would overflow")]
    Overflow,

    #[error("Precision overflow: provided {provided} decimals, max allowed {max}")]
    PrecisionOverflow { provided: u32, max: u32 },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Immutable non-negative monetary amount in minor units.
///
/// Arithmetic produces new values; the wrapped amount is private so the
/// `>= 0` invariant can only be established through [`Money::of`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Construct from minor units; negative amounts are rejected.
    pub fn of(amount: i64) -> Result<Self, MoneyError> {
        if amount < 0 {
            return Err(MoneyError::InvalidAmount);
        }
        Ok(Money(amount))
    }

    /// Minor-unit amount, always `>= 0`.
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Sum of two non-negative amounts. Overflow of the `i64` carrier is
    /// a checked error, never silent wraparound.
    pub fn add(self, other: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Difference; fails with `InsufficientFunds` if the result would be
    /// negative.
    pub fn subtract(self, other: Money) -> Result<Money, MoneyError> {
        if self.0 < other.0 {
            return Err(MoneyError::InsufficientFunds);
        }
        Ok(Money(self.0 - other.0))
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Parse: Client -> Internal (String -> Money)
// ============================================================================

/// Convert a client amount string to [`Money`].
///
/// Strict format rules, no silent truncation:
/// - rejects empty strings, signs, `.5`, `5.`, multiple dots
/// - rejects more decimal places than `decimals` allows
/// - rejects zero (a zero-amount movement writes a misleading history row)
pub fn parse_amount(amount_str: &str, decimals: u32) -> Result<Money, MoneyError> {
    let amount_str = amount_str.trim();
    if amount_str.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    if amount_str.starts_with('-') || amount_str.starts_with('+') {
        return Err(MoneyError::InvalidAmount);
    }

    let parts: Vec<&str> = amount_str.split('.').collect();
    let (whole, frac) = match parts.len() {
        1 => (parts[0], ""),
        2 => {
            // Require both sides of the dot to be non-empty: ".5" and "5."
            // are ambiguous client input
            if parts[0].is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing leading zero (e.g., use 0.5 instead of .5)".into(),
                ));
            }
            if parts[1].is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
                ));
            }
            if decimals == 0 {
                return Err(MoneyError::InvalidFormat(
                    "decimals is 0, but dot provided".into(),
                ));
            }
            (parts[0], parts[1])
        }
        _ => return Err(MoneyError::InvalidFormat("multiple decimal points".into())),
    };

    if frac.len() > decimals as usize {
        return Err(MoneyError::PrecisionOverflow {
            provided: frac.len() as u32,
            max: decimals,
        });
    }

    let whole_num: i64 = whole.parse::<i64>().map_err(|e| {
        let err_str = e.to_string();
        if err_str.contains("too large") || err_str.contains("overflow") {
            MoneyError::Overflow
        } else {
            MoneyError::InvalidFormat(format!("invalid character in whole part: {}", whole))
        }
    })?;

    let frac_num: i64 = if decimals == 0 || frac.is_empty() {
        0
    } else {
        let frac_padded = format!("{:0<width$}", frac, width = decimals as usize);
        frac_padded[..decimals as usize]
            .parse::<i64>()
            .map_err(|_| MoneyError::InvalidFormat("invalid fractional part".into()))?
    };

    let multiplier = 10i64.checked_pow(decimals).ok_or(MoneyError::Overflow)?;
    let amount = whole_num
        .checked_mul(multiplier)
        .and_then(|v| v.checked_add(frac_num))
        .ok_or(MoneyError::Overflow)?;

    if amount == 0 {
        return Err(MoneyError::InvalidAmount);
    }

    Money::of(amount)
}

// ============================================================================
// Format: Internal -> Client (Money -> String)
// ============================================================================

/// Convert [`Money`] to a display string with the full configured precision.
pub fn format_amount(value: Money, decimals: u32) -> String {
    let decimal_value = Decimal::from(value.amount()) / Decimal::from(10i64.pow(decimals));
    format!("{:.prec$}", decimal_value, prec = decimals as usize)
}

/// Parse a `rust_decimal::Decimal` (JSON number boundary) to [`Money`].
pub fn parse_decimal(decimal: Decimal, decimals: u32) -> Result<Money, MoneyError> {
    if decimal.is_sign_negative() {
        return Err(MoneyError::InvalidAmount);
    }
    if decimal.is_zero() {
        return Err(MoneyError::InvalidAmount);
    }
    if decimal.scale() > decimals {
        return Err(MoneyError::PrecisionOverflow {
            provided: decimal.scale(),
            max: decimals,
        });
    }

    let multiplier = Decimal::from(10i64.pow(decimals));
    let result = decimal * multiplier;
    result
        .to_i64()
        .ok_or(MoneyError::Overflow)
        .and_then(Money::of)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_of_rejects_negative() {
        assert_eq!(Money::of(-1), Err(MoneyError::InvalidAmount));
        assert_eq!(Money::of(0).unwrap(), Money::ZERO);
        assert_eq!(Money::of(100).unwrap().amount(), 100);
    }

    #[test]
    fn test_add() {
        let a = Money::of(30_000).unwrap();
        let b = Money::of(70_000).unwrap();
        assert_eq!(a.add(b).unwrap().amount(), 100_000);
        assert_eq!(Money::ZERO.add(a).unwrap(), a);
    }

    #[test]
    fn test_add_overflow_checked() {
        let max = Money::of(i64::MAX).unwrap();
        assert_eq!(max.add(Money::of(1).unwrap()), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_subtract() {
        let balance = Money::of(100_000).unwrap();
        let amount = Money::of(30_000).unwrap();
        assert_eq!(balance.subtract(amount).unwrap().amount(), 70_000);
        // exact drain is allowed
        assert_eq!(balance.subtract(balance).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_subtract_insufficient() {
        let balance = Money::of(50).unwrap();
        let amount = Money::of(51).unwrap();
        assert_eq!(balance.subtract(amount), Err(MoneyError::InsufficientFunds));
        // the failed operation produced nothing; original value untouched
        assert_eq!(balance.amount(), 50);
    }

    #[test]
    fn test_ordering_by_amount() {
        let small = Money::of(1).unwrap();
        let big = Money::of(2).unwrap();
        assert!(small < big);
        assert!(big >= small);
        assert_eq!(small, Money::of(1).unwrap());
    }

    #[test]
    fn test_parse_amount_variations() {
        assert_eq!(parse_amount("1.23", 2).unwrap().amount(), 123);
        assert_eq!(parse_amount("001.23", 2).unwrap().amount(), 123);
        assert_eq!(parse_amount("0.01", 2).unwrap().amount(), 1);
        assert_eq!(parse_amount("30000", 0).unwrap().amount(), 30_000);

        // zero-amount movements are rejected at the boundary
        assert!(parse_amount("0", 2).is_err());
        assert!(parse_amount("0.00", 2).is_err());
    }

    #[test]
    fn test_parse_amount_invalid_formats() {
        let cases = vec![
            "1,000.00", // commas not allowed
            "1.2.3",    // multiple dots
            "1. 23",    // spaces inside
            "+1.23",    // explicit plus rejected
            "-1.23",    // negative rejected
            ".",        // just a dot
            ".5",       // missing leading zero
            "5.",       // missing fractional part
        ];
        for case in cases {
            assert!(
                parse_amount(case, 8).is_err(),
                "should reject invalid format: {}",
                case
            );
        }
        // dot with scale 0
        assert!(parse_amount("100.0", 0).is_err());
    }

    #[test]
    fn test_parse_amount_precision_limits() {
        assert!(parse_amount("1.234", 3).is_ok());
        assert!(matches!(
            parse_amount("1.2345", 3),
            Err(MoneyError::PrecisionOverflow {
                provided: 4,
                max: 3
            })
        ));
    }

    #[test]
    fn test_parse_amount_i64_boundary() {
        // i64::MAX is 9,223,372,036,854,775,807; at scale 2 that is
        // 92,233,720,368,547,758.07
        let max_s2 = "92233720368547758.07";
        assert_eq!(parse_amount(max_s2, 2).unwrap().amount(), i64::MAX);

        let too_big = "92233720368547758.08";
        assert!(matches!(parse_amount(too_big, 2), Err(MoneyError::Overflow)));
    }

    #[test]
    fn test_parse_decimal_edge_cases() {
        let d = Decimal::from_str("1.23000").unwrap(); // scale is 5
        assert!(parse_decimal(d, 2).is_err());

        let d = Decimal::from_str("1.23").unwrap();
        assert_eq!(parse_decimal(d, 2).unwrap().amount(), 123);

        assert!(parse_decimal(Decimal::ZERO, 2).is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Money::of(123).unwrap(), 2), "1.23");
        assert_eq!(format_amount(Money::ZERO, 2), "0.00");
        assert_eq!(format_amount(Money::of(70_000).unwrap(), 0), "70000");
    }

    #[test]
    fn test_roundtrip_consistency() {
        for (s, scale) in [("1.50", 2), ("0.01", 2), ("1234.5678", 4), ("999999", 0)] {
            let money = parse_amount(s, scale).unwrap();
            let formatted = format_amount(money, scale);
            assert_eq!(
                parse_amount(&formatted, scale).unwrap(),
                money,
                "roundtrip failed for {} at scale {}",
                s,
                scale
            );
        }
    }
}
