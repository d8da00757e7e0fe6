//! Exact fixed-point conversion between human units and base units.
//!
//! Amounts entered by the operator (ether, whole tokens) are scaled by
//! `10^decimals` on 256-bit integers. Nothing here goes through floating point.

use ethers_core::types::U256;

use crate::error::TypesError;

/// Decimals of the native currency (1 ether = 10^18 wei).
pub const ETHER_DECIMALS: u32 = 18;

/// Largest supported decimals value; 10^76 still leaves headroom below 2^256.
pub const MAX_DECIMALS: u32 = 76;

/// Parse a decimal string such as `"1.25"` into base units.
pub fn parse_units(text: &str, decimals: u32) -> Result<U256, TypesError> {
    check_decimals(decimals)?;

    let amount = text.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(TypesError::InvalidAmount(amount.to_string()));
    }

    if fraction.len() > decimals as usize {
        return Err(TypesError::TooManyDecimals {
            amount: amount.to_string(),
            decimals,
        });
    }

    let overflow = || TypesError::Overflow(amount.to_string());
    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| overflow())?
    };
    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = decimals as usize);
        U256::from_dec_str(&padded).map_err(|_| overflow())?
    };

    whole
        .checked_mul(U256::exp10(decimals as usize))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Format base units as a decimal string, without trailing zeros.
pub fn format_units(amount: U256, decimals: u32) -> Result<String, TypesError> {
    check_decimals(decimals)?;
    if decimals == 0 {
        return Ok(amount.to_string());
    }

    let formatted = ethers_core::utils::format_units(amount, decimals)
        .map_err(|e| TypesError::InvalidAmount(e.to_string()))?;
    Ok(trim_fraction(&formatted))
}

/// Parse an ether amount into wei.
pub fn parse_ether(text: &str) -> Result<U256, TypesError> {
    parse_units(text, ETHER_DECIMALS)
}

/// Format wei as ether ("2000000000000000000" -> "2").
pub fn format_ether(wei: U256) -> String {
    trim_fraction(&ethers_core::utils::format_ether(wei))
}

/// Parse a non-negative decimal integer.
pub fn parse_integer(text: &str) -> Result<U256, TypesError> {
    let digits = text.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TypesError::InvalidAmount(digits.to_string()));
    }
    U256::from_dec_str(digits).map_err(|_| TypesError::Overflow(digits.to_string()))
}

/// Scale a whole-token amount by `10^decimals`.
pub fn scale_token_amount(whole: U256, decimals: u32) -> Result<U256, TypesError> {
    check_decimals(decimals)?;
    whole
        .checked_mul(U256::exp10(decimals as usize))
        .ok_or_else(|| TypesError::Overflow(whole.to_string()))
}

fn check_decimals(decimals: u32) -> Result<(), TypesError> {
    if decimals > MAX_DECIMALS {
        return Err(TypesError::UnsupportedDecimals(decimals));
    }
    Ok(())
}

fn trim_fraction(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => formatted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_parse_ether() {
        assert_eq!(parse_ether("2").unwrap(), U256::from(2 * WEI_PER_ETHER));
        assert_eq!(parse_ether("0.5").unwrap(), U256::from(WEI_PER_ETHER / 2));
        assert_eq!(parse_ether(".25").unwrap(), U256::from(WEI_PER_ETHER / 4));
        assert_eq!(parse_ether(" 1. ").unwrap(), U256::from(WEI_PER_ETHER));
        assert_eq!(
            parse_ether("0.000000000000000001").unwrap(),
            U256::one()
        );
    }

    #[test]
    fn test_parse_ether_rejects_bad_input() {
        assert!(matches!(parse_ether(""), Err(TypesError::InvalidAmount(_))));
        assert!(matches!(parse_ether("."), Err(TypesError::InvalidAmount(_))));
        assert!(matches!(parse_ether("-1"), Err(TypesError::InvalidAmount(_))));
        assert!(matches!(parse_ether("1e18"), Err(TypesError::InvalidAmount(_))));
        assert!(matches!(parse_ether("1.2.3"), Err(TypesError::InvalidAmount(_))));
        assert!(matches!(
            parse_ether("0.0000000000000000001"),
            Err(TypesError::TooManyDecimals { decimals: 18, .. })
        ));
        assert!(matches!(
            parse_ether(&"9".repeat(60)),
            Err(TypesError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_units_at_max_decimals() {
        assert_eq!(parse_units("1", MAX_DECIMALS).unwrap(), U256::exp10(76));
        // 11 * 10^76 < 2^256 < 12 * 10^76
        assert_eq!(
            parse_units("11", MAX_DECIMALS).unwrap(),
            U256::from(11u64) * U256::exp10(76)
        );
        assert!(matches!(
            parse_units("12", MAX_DECIMALS),
            Err(TypesError::Overflow(_))
        ));
        assert_eq!(parse_units("0.5", 1).unwrap(), U256::from(5u64));
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(U256::from(2 * WEI_PER_ETHER)), "2");
        assert_eq!(format_ether(U256::from(WEI_PER_ETHER / 10)), "0.1");
        assert_eq!(format_ether(U256::zero()), "0");
        assert_eq!(format_ether(U256::one()), "0.000000000000000001");
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(U256::from(1_500u64), 3).unwrap(), "1.5");
        assert_eq!(format_units(U256::from(42u64), 0).unwrap(), "42");
        assert!(format_units(U256::one(), 90).is_err());
    }

    #[test]
    fn test_scale_token_amount() {
        let cap = scale_token_amount(U256::from(1000u64), 18).unwrap();
        assert_eq!(cap, U256::from(1000u64) * U256::exp10(18));
        assert_eq!(cap.to_string(), format!("1000{}", "0".repeat(18)));

        assert_eq!(
            scale_token_amount(U256::from(7u64), 0).unwrap(),
            U256::from(7u64)
        );
        assert!(matches!(
            scale_token_amount(U256::MAX, 1),
            Err(TypesError::Overflow(_))
        ));
        assert!(matches!(
            scale_token_amount(U256::one(), 77),
            Err(TypesError::UnsupportedDecimals(77))
        ));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("1000").unwrap(), U256::from(1000u64));
        assert!(parse_integer("10.5").is_err());
        assert!(parse_integer("").is_err());
        assert!(matches!(parse_integer(&"9".repeat(90)), Err(TypesError::Overflow(_))));
    }

    proptest! {
        #[test]
        fn prop_integral_ether_round_trips(ether in 0u64..=u64::MAX) {
            let text = ether.to_string();
            let wei = parse_ether(&text).unwrap();
            prop_assert_eq!(wei, U256::from(ether) * U256::exp10(18));
            prop_assert_eq!(format_ether(wei), text);
        }

        #[test]
        fn prop_token_units_round_trip(whole in 0u64..1_000_000_000, decimals in 0u32..=30) {
            let scaled = scale_token_amount(U256::from(whole), decimals).unwrap();
            prop_assert_eq!(format_units(scaled, decimals).unwrap(), whole.to_string());
            prop_assert_eq!(parse_units(&whole.to_string(), decimals).unwrap(), scaled);
        }
    }
}
