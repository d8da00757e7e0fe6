//! Constructor parameters for a new crowdsale and its token.

use ethers_core::types::U256;

use crate::error::TypesError;

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Everything the crowdsale constructor needs, in operator-facing order.
///
/// Amounts are already in base units: `token_cap` is scaled by
/// `10^token_decimals`, contributions are in wei.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrowdsaleParameters {
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimals: u32,
    /// Unix seconds
    pub start_time: u64,
    /// Unix seconds
    pub end_time: u64,
    /// Beneficiary wallet exactly as entered; parsed only when deploying.
    pub wallet: String,
    /// Tokens per 1 ETH
    pub rate: U256,
    pub token_cap: U256,
    pub min_contribution: U256,
    pub max_contribution: U256,
}

impl CrowdsaleParameters {
    /// Re-check both input invariants.
    pub fn validate(&self) -> Result<(), TypesError> {
        check_time_window(self.start_time, self.end_time)?;
        check_contribution_range(self.min_contribution, self.max_contribution)
    }

    /// Replace the sale window with `[now, now + days]`.
    pub fn apply_debug_window(&mut self, now: u64, days: u64) {
        self.start_time = now;
        self.end_time = now.saturating_add(days.saturating_mul(SECONDS_PER_DAY));
    }
}

/// The end of the sale may not precede its start.
pub fn check_time_window(start: u64, end: u64) -> Result<(), TypesError> {
    if end < start {
        return Err(TypesError::EndBeforeStart { start, end });
    }
    Ok(())
}

/// The maximum contribution must be strictly above the minimum.
pub fn check_contribution_range(min: U256, max: U256) -> Result<(), TypesError> {
    if max <= min {
        return Err(TypesError::ContributionRange {
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}
