//! icogen Types - data model for the crowdsale generator.
//!
//! This crate provides the values that flow through an icogen session:
//! - Constructor parameters for a new crowdsale
//! - Snapshots of a deployed crowdsale and the rules derived from them
//! - Exact ether/wei and token-decimal conversion

pub mod error;
pub mod params;
pub mod snapshot;
pub mod units;

pub use error::TypesError;
pub use params::{check_contribution_range, check_time_window, CrowdsaleParameters, SECONDS_PER_DAY};
pub use snapshot::{ContributionBlocker, CrowdsaleSnapshot};

/// Re-exported so downstream crates agree on one set of primitives.
pub use ethers_core::types::{Address, H256, U256};
