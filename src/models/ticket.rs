use std::str::FromStr;

use alloy::primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimals of the chain's native currency (wei per ether).
pub const NATIVE_DECIMALS: u32 = 18;

/// Fractional digits `Decimal` can hold; anything past this is truncated.
const MAX_FRACTION_DIGITS: usize = 28;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("invalid ticket price '{0}'")]
    Malformed(String),
    #[error("ticket price cannot be negative: {0}")]
    Negative(String),
    #[error("ticket price does not fit in 256 bits: {0}")]
    TooLarge(String),
}

/// Converts a decimal amount into integer base units with `decimals` places.
/// An empty amount is zero; extra fractional digits round half away from zero.
///
/// The whole part goes straight into `U256`, so any amount whose base-unit
/// value fits in 256 bits is accepted.
pub fn parse_units(amount: &str, decimals: u32) -> Result<U256, PriceError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Ok(U256::ZERO);
    }

    let malformed = || PriceError::Malformed(trimmed.to_string());
    let too_large = || PriceError::TooLarge(trimmed.to_string());

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(malformed());
    }

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|_| too_large())?
    };

    let keep = fraction.len().min(decimals as usize + 1).min(MAX_FRACTION_DIGITS);
    let fraction = if keep == 0 {
        Decimal::ZERO
    } else {
        Decimal::from_str(&format!("0.{}", &fraction[..keep])).map_err(|_| malformed())?
    };
    let fraction = fraction.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

    let ten = U256::from(10u8);
    let fraction_units = U256::from(fraction.mantissa().unsigned_abs())
        * ten.pow(U256::from(decimals - fraction.scale()));
    let total = whole
        .checked_mul(ten.pow(U256::from(decimals)))
        .and_then(|units| units.checked_add(fraction_units))
        .ok_or_else(too_large)?;

    if negative && !total.is_zero() {
        return Err(PriceError::Negative(trimmed.to_string()));
    }
    Ok(total)
}

/// Ticket price in wei.
pub fn parse_ticket_price(amount: &str) -> Result<U256, PriceError> {
    parse_units(amount, NATIVE_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_price_is_zero() {
        assert_eq!(parse_ticket_price("").unwrap(), U256::ZERO);
        assert_eq!(parse_ticket_price("   ").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_fractional_price() {
        assert_eq!(
            parse_ticket_price("1.5").unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(
            parse_ticket_price("0.000000000000000001").unwrap(),
            U256::from(1u8)
        );
    }

    #[test]
    fn test_whole_price() {
        assert_eq!(
            parse_ticket_price("2").unwrap(),
            U256::from(2_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_excess_precision_rounds() {
        assert_eq!(
            parse_ticket_price("0.0000000000000000015").unwrap(),
            U256::from(2u8)
        );
        assert_eq!(
            parse_ticket_price("0.0000000000000000014").unwrap(),
            U256::from(1u8)
        );
    }

    #[test]
    fn test_other_decimals() {
        assert_eq!(parse_units("12.34", 6).unwrap(), U256::from(12_340_000u64));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            parse_ticket_price("abc"),
            Err(PriceError::Malformed("abc".into()))
        );
        assert_eq!(
            parse_ticket_price("-1"),
            Err(PriceError::Negative("-1".into()))
        );
        assert_eq!(parse_ticket_price("-0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_price_beyond_decimal_range() {
        assert_eq!(
            parse_ticket_price("1000000000000000000000000000000").unwrap(),
            U256::from(10u8).pow(U256::from(48))
        );
        assert_eq!(
            parse_ticket_price("1000000000000000000000000000000.25").unwrap(),
            U256::from(10u8).pow(U256::from(48)) + U256::from(250_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_price_past_256_bits() {
        let huge = "1".repeat(80);
        assert_eq!(
            parse_ticket_price(&huge),
            Err(PriceError::TooLarge(huge.clone()))
        );
        // Fits as a whole number but not once scaled to wei.
        let scaled = U256::MAX.to_string();
        assert_eq!(
            parse_ticket_price(&scaled),
            Err(PriceError::TooLarge(scaled.clone()))
        );
    }

    #[test]
    fn test_rejects_stray_characters() {
        for bad in [".", "-", "1.2.3", "1,5", "0x10", " 1 2"] {
            assert!(
                matches!(parse_ticket_price(bad), Err(PriceError::Malformed(_))),
                "{bad}"
            );
        }
        assert_eq!(parse_ticket_price(".5").unwrap(), U256::from(500_000_000_000_000_000u128));
        assert_eq!(parse_ticket_price("3.").unwrap(), U256::from(3_000_000_000_000_000_000u128));
    }
}
