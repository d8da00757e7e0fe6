//! Live view of a deployed crowdsale.

use ethers_core::types::{Address, U256};
use std::fmt;

/// State read from a crowdsale and its token. Never cached: every field comes
/// from its own getter call and is re-read on each display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrowdsaleSnapshot {
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimals: u32,
    pub tokens_minted: U256,
    pub token_cap: U256,
    pub start_time: u64,
    pub end_time: u64,
    pub wallet: Address,
    pub rate: U256,
    /// Wei
    pub min_contribution: U256,
    /// Wei
    pub max_contribution: U256,
    /// Wei
    pub wei_raised: U256,
    /// Wei already contributed by the operator account.
    pub contribution: U256,
}

/// Reasons a new contribution would be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionBlocker {
    CapReached,
    SaleEnded,
    MaxContributionReached,
}

impl fmt::Display for ContributionBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ContributionBlocker::CapReached => {
                "Crowdsale cap reached. No further contributions accepted."
            }
            ContributionBlocker::SaleEnded => {
                "Crowdsale has already ended. No further contributions accepted."
            }
            ContributionBlocker::MaxContributionReached => {
                "You have already contributed the maximum ether you are allowed."
            }
        };
        f.write_str(msg)
    }
}

impl CrowdsaleSnapshot {
    /// Minted share of the cap, floored. `None` for a zero cap.
    pub fn progress_percent(&self) -> Option<U256> {
        if self.token_cap.is_zero() {
            return None;
        }
        self.tokens_minted
            .checked_mul(U256::from(100u64))
            .map(|scaled| scaled / self.token_cap)
    }

    /// Seconds until the sale closes; negative once it has closed.
    pub fn seconds_remaining(&self, now: u64) -> i128 {
        self.end_time as i128 - now as i128
    }

    pub fn hours_remaining(&self, now: u64) -> i128 {
        self.seconds_remaining(now).div_euclid(3600)
    }

    pub fn days_remaining(&self, now: u64) -> i128 {
        self.seconds_remaining(now).div_euclid(24 * 3600)
    }

    /// Every condition that rules out a contribution right now. Empty means
    /// the operator may contribute.
    pub fn contribution_blockers(&self, now: u64) -> Vec<ContributionBlocker> {
        let mut blockers = Vec::new();
        if self.tokens_minted >= self.token_cap {
            blockers.push(ContributionBlocker::CapReached);
        }
        if now >= self.end_time {
            blockers.push(ContributionBlocker::SaleEnded);
        }
        if self.contribution >= self.max_contribution {
            blockers.push(ContributionBlocker::MaxContributionReached);
        }
        blockers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn open_sale() -> CrowdsaleSnapshot {
        CrowdsaleSnapshot {
            token_name: "Example".into(),
            token_symbol: "EXM".into(),
            token_decimals: 18,
            tokens_minted: U256::from(250u64),
            token_cap: U256::from(1000u64),
            start_time: NOW - 3600,
            end_time: NOW + 3 * 24 * 3600 + 7200,
            wallet: Address::repeat_byte(0xaa),
            rate: U256::from(1000u64),
            min_contribution: U256::exp10(17),
            max_contribution: U256::exp10(19),
            wei_raised: U256::exp10(18),
            contribution: U256::zero(),
        }
    }

    #[test]
    fn test_derived_figures() {
        let s = open_sale();
        assert_eq!(s.progress_percent(), Some(U256::from(25u64)));
        assert_eq!(s.hours_remaining(NOW), 74);
        assert_eq!(s.days_remaining(NOW), 3);
    }

    #[test]
    fn test_progress_floors_and_handles_zero_cap() {
        let mut s = open_sale();
        s.tokens_minted = U256::from(999u64);
        assert_eq!(s.progress_percent(), Some(U256::from(99u64)));

        s.token_cap = U256::zero();
        assert_eq!(s.progress_percent(), None);
    }

    #[test]
    fn test_remaining_time_after_close_is_negative() {
        let mut s = open_sale();
        s.end_time = NOW - 1;
        assert_eq!(s.hours_remaining(NOW), -1);
        assert_eq!(s.days_remaining(NOW), -1);
    }

    #[test]
    fn test_open_sale_accepts_contributions() {
        assert!(open_sale().contribution_blockers(NOW).is_empty());
    }

    #[test]
    fn test_each_blocker_independently() {
        let mut s = open_sale();
        s.tokens_minted = s.token_cap;
        assert_eq!(s.contribution_blockers(NOW), vec![ContributionBlocker::CapReached]);

        let mut s = open_sale();
        s.end_time = NOW;
        assert_eq!(s.contribution_blockers(NOW), vec![ContributionBlocker::SaleEnded]);

        let mut s = open_sale();
        s.contribution = s.max_contribution;
        assert_eq!(
            s.contribution_blockers(NOW),
            vec![ContributionBlocker::MaxContributionReached]
        );
    }

    #[test]
    fn test_all_blockers_reported() {
        let mut s = open_sale();
        s.tokens_minted = s.token_cap;
        s.end_time = NOW - 10;
        s.contribution = s.max_contribution + U256::one();
        assert_eq!(s.contribution_blockers(NOW).len(), 3);
    }
}
