//! Typed questions on top of a [`Console`].
//!
//! Every helper re-asks until the answer parses; only a closed console ends
//! the loop early.

use icogen_types::{check_contribution_range, check_time_window, units, U256};

use crate::console::Console;
use crate::output;

pub const INVALID_INTEGER: &str = "Please enter a whole number.";
pub const INVALID_ETHER: &str = "Please enter an amount in ether, for example 0.5.";
pub const END_TIME_LIMIT: &str = "Please enter an end time later than the start time";
pub const MAX_CONTRIBUTION_LIMIT: &str =
    "Please enter a maximum contribution higher than the minimum contribution.";

/// Free-form answer, trimmed.
pub fn ask_text(console: &mut dyn Console, question: &str) -> anyhow::Result<String> {
    Ok(console.read_line(question, None)?.trim().to_string())
}

/// Free-form answer that falls back to `default` when left empty.
pub fn ask_with_default(
    console: &mut dyn Console,
    question: &str,
    default: &str,
) -> anyhow::Result<String> {
    let answer = console.read_line(question, Some(default))?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Ask until `parse` accepts the answer, printing its message otherwise.
pub fn ask_parsed<T, F>(console: &mut dyn Console, question: &str, parse: F) -> anyhow::Result<T>
where
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        let answer = console.read_line(question, None)?;
        match parse(answer.trim()) {
            Ok(value) => return Ok(value),
            Err(msg) => console.println(&output::warning_line(&msg)),
        }
    }
}

pub fn ask_u64(console: &mut dyn Console, question: &str) -> anyhow::Result<u64> {
    ask_parsed(console, question, parse_u64)
}

/// Arbitrary-size non-negative integer.
pub fn ask_uint(console: &mut dyn Console, question: &str) -> anyhow::Result<U256> {
    ask_parsed(console, question, |s| {
        units::parse_integer(s).map_err(|_| INVALID_INTEGER.to_string())
    })
}

/// Ether amount, returned in wei.
pub fn ask_ether(console: &mut dyn Console, question: &str) -> anyhow::Result<U256> {
    ask_parsed(console, question, parse_ether)
}

pub fn parse_u64(s: &str) -> Result<u64, String> {
    s.parse::<u64>().map_err(|_| INVALID_INTEGER.to_string())
}

pub fn parse_ether(s: &str) -> Result<U256, String> {
    units::parse_ether(s).map_err(|e| format!("{} ({})", INVALID_ETHER, e))
}

/// Token decimals, bounded so `10^decimals` stays representable.
pub fn parse_decimals(s: &str) -> Result<u32, String> {
    let decimals = s.parse::<u32>().map_err(|_| INVALID_INTEGER.to_string())?;
    if decimals > units::MAX_DECIMALS {
        return Err(format!("Please enter at most {} decimals.", units::MAX_DECIMALS));
    }
    Ok(decimals)
}

/// End time that does not precede `start`.
pub fn parse_end_time(start: u64, s: &str) -> Result<u64, String> {
    let end = parse_u64(s)?;
    check_time_window(start, end).map_err(|_| END_TIME_LIMIT.to_string())?;
    Ok(end)
}

/// Token cap in whole tokens, scaled to base units.
pub fn parse_token_cap(decimals: u32, s: &str) -> Result<U256, String> {
    let whole = units::parse_integer(s).map_err(|_| INVALID_INTEGER.to_string())?;
    units::scale_token_amount(whole, decimals).map_err(|e| e.to_string())
}

/// Maximum contribution in ether, strictly above `min` wei.
pub fn parse_max_contribution(min: U256, s: &str) -> Result<U256, String> {
    let max = parse_ether(s)?;
    check_contribution_range(min, max).map_err(|_| MAX_CONTRIBUTION_LIMIT.to_string())?;
    Ok(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimals() {
        assert_eq!(parse_decimals("18"), Ok(18));
        assert_eq!(parse_decimals("0"), Ok(0));
        assert_eq!(parse_decimals("-1"), Err(INVALID_INTEGER.to_string()));
        assert!(parse_decimals("77").is_err());
    }

    #[test]
    fn test_parse_end_time() {
        assert_eq!(parse_end_time(100, "100"), Ok(100));
        assert_eq!(parse_end_time(100, "250"), Ok(250));
        assert_eq!(parse_end_time(100, "99"), Err(END_TIME_LIMIT.to_string()));
        assert_eq!(parse_end_time(100, "soon"), Err(INVALID_INTEGER.to_string()));
    }

    #[test]
    fn test_parse_token_cap_scales_by_decimals() {
        assert_eq!(
            parse_token_cap(2, "1000"),
            Ok(U256::from(100_000u64))
        );
        assert_eq!(parse_token_cap(0, "5"), Ok(U256::from(5u64)));
        assert!(parse_token_cap(18, "1.5").is_err());
        assert!(parse_token_cap(80, "1").is_err());
    }

    #[test]
    fn test_parse_max_contribution() {
        let min = U256::exp10(17);
        assert_eq!(parse_max_contribution(min, "10"), Ok(U256::exp10(19)));
        assert_eq!(
            parse_max_contribution(min, "0.1"),
            Err(MAX_CONTRIBUTION_LIMIT.to_string())
        );
        assert_eq!(
            parse_max_contribution(min, "0.01"),
            Err(MAX_CONTRIBUTION_LIMIT.to_string())
        );
        assert!(parse_max_contribution(min, "ten")
            .unwrap_err()
            .starts_with(INVALID_ETHER));
    }
}
