use thiserror::Error;

/// Errors raised while building or converting crowdsale values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount has more than {decimals} decimal places: {amount}")]
    TooManyDecimals { amount: String, decimals: u32 },

    #[error("Unsupported decimals: {0} (at most 76)")]
    UnsupportedDecimals(u32),

    #[error("Amount overflows 256 bits: {0}")]
    Overflow(String),

    #[error("End time {end} is earlier than start time {start}")]
    EndBeforeStart { start: u64, end: u64 },

    #[error("Maximum contribution {max} wei is not above minimum contribution {min} wei")]
    ContributionRange { min: String, max: String },
}
