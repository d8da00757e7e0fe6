//! Output formatting utilities.
//!
//! Everything here returns lines; the workflow decides where they go.

use chrono::DateTime;
use colored::Colorize;
use icogen_gateway::Deployment;
use icogen_types::{units, Address, CrowdsaleParameters, CrowdsaleSnapshot};

pub const RULE: &str = "----------------------------------------------------";
const STARS: &str = "******************************************";

/// Format an address with its EIP-55 checksum.
pub fn format_address(addr: &Address) -> String {
    ethers_core::utils::to_checksum(addr, None)
}

/// Unix seconds followed by the UTC calendar time.
pub fn format_timestamp(secs: u64) -> String {
    match i64::try_from(secs).ok().and_then(|s| DateTime::from_timestamp(s, 0)) {
        Some(at) => format!("{} ({})", secs, at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => secs.to_string(),
    }
}

pub fn success_line(msg: &str) -> String {
    format!("✓ {}", msg).green().to_string()
}

pub fn error_line(msg: &str) -> String {
    format!("✗ {}", msg).red().to_string()
}

pub fn warning_line(msg: &str) -> String {
    format!("⚠ {}", msg).yellow().to_string()
}

pub fn info_line(msg: &str) -> String {
    format!("ℹ {}", msg).blue().to_string()
}

/// Step heading inside a flow.
pub fn heading(msg: &str) -> String {
    msg.blue().bold().to_string()
}

/// Highlighted notice, used for contribution blockers.
pub fn notice(msg: &str) -> String {
    msg.black().on_cyan().to_string()
}

pub fn banner_lines() -> Vec<String> {
    vec![
        STARS.to_string(),
        "Welcome to the Command-Line ICO Generator.".bright_cyan().to_string(),
        STARS.to_string(),
        "What would you like to do today?".to_string(),
    ]
}

pub fn section_lines(title: &str) -> Vec<String> {
    vec![STARS.to_string(), title.bold().to_string(), STARS.to_string()]
}

/// Values entered for a new crowdsale, as they will be deployed.
pub fn review_lines(params: &CrowdsaleParameters) -> Vec<String> {
    vec![
        RULE.to_string(),
        heading("Please review the information you entered:"),
        format!("Token name:  {}", params.token_name),
        format!("Token symbol:  {}", params.token_symbol),
        format!("Token decimals:  {}", params.token_decimals),
        format!("Start date:  {}", format_timestamp(params.start_time)),
        format!("End date:  {}", format_timestamp(params.end_time)),
        format!("Wallet:  {}", params.wallet),
        format!("Exchange rate:  1 ETH = {} {}", params.rate, params.token_symbol),
        format!("Token Cap:  {}", params.token_cap),
        format!(
            "Minimum contribution (in ether):  {}",
            units::format_ether(params.min_contribution)
        ),
        format!(
            "Maximum contribution (in ether):  {}",
            units::format_ether(params.max_contribution)
        ),
        RULE.to_string(),
    ]
}

pub fn deployment_lines(deployment: &Deployment) -> Vec<String> {
    vec![
        success_line("Congratulations! The ICO was successfully generated."),
        format!("ICO Address: {}", format_address(&deployment.crowdsale.address())),
        format!("TOKEN Address: {}", format_address(&deployment.token.address())),
        format!("Transaction: {:?}", deployment.transaction_hash),
    ]
}

/// Static crowdsale facts followed by the operator's position and progress.
pub fn snapshot_lines(snapshot: &CrowdsaleSnapshot, now: u64) -> Vec<String> {
    let progress = match snapshot.progress_percent() {
        Some(percent) => format!("{}%", percent),
        None => "n/a".to_string(),
    };

    vec![
        RULE.to_string(),
        heading("ICO information:"),
        format!("Token name:  {}", snapshot.token_name),
        format!("Token symbol:  {}", snapshot.token_symbol),
        format!("Token decimals:  {}", snapshot.token_decimals),
        format!("Start date:  {}", format_timestamp(snapshot.start_time)),
        format!("End date:  {}", format_timestamp(snapshot.end_time)),
        format!("Wallet:  {}", format_address(&snapshot.wallet)),
        format!(
            "Exchange rate: 1 ETH = {} {}",
            snapshot.rate, snapshot.token_symbol
        ),
        format!("Token Cap:  {}", snapshot.token_cap),
        format!(
            "Minimum contribution (in ETH):  {}",
            units::format_ether(snapshot.min_contribution)
        ),
        format!(
            "Maximum contribution (in ETH):  {}",
            units::format_ether(snapshot.max_contribution)
        ),
        RULE.to_string(),
        format!(
            "You have already contributed {} ether",
            units::format_ether(snapshot.contribution)
        ),
        format!(
            "You can contribute up to {} ether",
            units::format_ether(snapshot.max_contribution)
        ),
        format!("Ether raised:  {}", units::format_ether(snapshot.wei_raised)),
        format!(
            "Tokens minted:  {} of {}",
            snapshot.tokens_minted, snapshot.token_cap
        ),
        format!("Crowdsale progress: {}", progress),
        format!(
            "Time remaining: {} hours ({} days)",
            snapshot.hours_remaining(now),
            snapshot.days_remaining(now)
        ),
    ]
}
