//! The interactive session: main menu, crowdsale creation, and managing an
//! existing crowdsale.
//!
//! The session is an explicit state machine. Each step consumes the current
//! [`State`] and returns the next one; the loop ends on [`State::Exit`] or
//! when the console closes.

use anyhow::Context;
use icogen_gateway::{fetch_snapshot, ContractGateway, CrowdsaleHandle};
use icogen_types::{units, Address, CrowdsaleParameters};
use tracing::{debug, info, warn};

use crate::console::{Console, SessionClosed};
use crate::output;
use crate::prompt;

pub const MENU_ITEMS: [&str; 2] = ["Create new ICO", "Participate in existing ICO"];

/// Where the session goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MainMenu,
    Create,
    /// Display a crowdsale; `None` asks the operator for its address first.
    Manage(Option<CrowdsaleHandle>),
    Contribute(CrowdsaleHandle),
    Exit,
}

/// Current Unix time in seconds.
pub fn system_clock() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Drives one operator session against a gateway.
pub struct Controller<G, C> {
    gateway: G,
    console: C,
    /// Sale length in days when the debug window override is active.
    debug_window: Option<u64>,
    clock: fn() -> u64,
    operator: Option<Address>,
}

impl<G: ContractGateway, C: Console> Controller<G, C> {
    pub fn new(gateway: G, console: C) -> Self {
        Self {
            gateway,
            console,
            debug_window: None,
            clock: system_clock,
            operator: None,
        }
    }

    /// Replace the entered sale window with `[now, now + days]` on create.
    pub fn with_debug_window(mut self, days: Option<u64>) -> Self {
        self.debug_window = days;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run from `start` until the operator exits or the console closes.
    pub async fn run(&mut self, start: State) -> anyhow::Result<()> {
        let mut state = start;
        loop {
            if state == State::Exit {
                info!("session finished");
                return Ok(());
            }
            debug!(?state, "entering state");

            state = match self.step(state).await {
                Ok(next) => next,
                Err(e) if e.is::<SessionClosed>() => {
                    info!("console closed, leaving session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
        }
    }

    /// Execute one state and return its successor.
    pub async fn step(&mut self, state: State) -> anyhow::Result<State> {
        match state {
            State::MainMenu => self.main_menu().await,
            State::Create => self.create_flow().await,
            State::Manage(handle) => self.manage_flow(handle).await,
            State::Contribute(handle) => self.contribute_flow(handle).await,
            State::Exit => Ok(State::Exit),
        }
    }

    fn say(&mut self, line: &str) {
        self.console.println(line);
    }

    fn say_all(&mut self, lines: Vec<String>) {
        for line in lines {
            self.console.println(&line);
        }
    }

    /// First account of the node, fetched once per main-menu visit.
    async fn operator(&mut self) -> anyhow::Result<Address> {
        if let Some(operator) = self.operator {
            return Ok(operator);
        }

        let accounts = self
            .gateway
            .accounts()
            .await
            .context("Failed to fetch accounts from the node")?;
        let operator = accounts
            .first()
            .copied()
            .ok_or(icogen_gateway::GatewayError::NoAccounts)?;
        info!(operator = %output::format_address(&operator), "operator account");

        self.operator = Some(operator);
        Ok(operator)
    }

    async fn main_menu(&mut self) -> anyhow::Result<State> {
        self.operator = None;
        self.operator().await?;

        self.say_all(output::banner_lines());
        let choice = self.console.select("Choose an option", &MENU_ITEMS)?;

        Ok(match choice {
            Some(0) => State::Create,
            Some(1) => State::Manage(None),
            _ => State::Exit,
        })
    }

    async fn create_flow(&mut self) -> anyhow::Result<State> {
        self.say_all(output::section_lines("New ICO Creation"));
        self.say(
            "The following script will create a new ICO with its corresponding mintable token, \
             according to the parameters you enter.",
        );
        if self.debug_window.is_some() {
            self.say(&output::warning_line(
                "Warning: Debugging is activated. Start and End dates will be adjusted for easier testing.",
            ));
        }

        let answer = prompt::ask_with_default(
            &mut self.console,
            "Press enter to continue or exit (CTRL + C)",
            "Y",
        )?;
        if !answer.eq_ignore_ascii_case("y") {
            return Ok(State::MainMenu);
        }

        let mut params = self.collect_parameters()?;

        if let Some(days) = self.debug_window {
            params.apply_debug_window((self.clock)(), days);
            self.say(&output::warning_line(
                "Warning: Debugging is activated. Start and End dates have been modified",
            ));
        }

        self.say_all(output::review_lines(&params));

        let operator = self.operator().await?;
        match self.gateway.deploy(operator, &params).await {
            Ok(deployment) => self.say_all(output::deployment_lines(&deployment)),
            Err(e) => {
                warn!(error = %e, "crowdsale deployment failed");
                self.say(&output::error_line(&format!("Deployment failed: {}", e)));
            }
        }

        Ok(State::MainMenu)
    }

    fn collect_parameters(&mut self) -> anyhow::Result<CrowdsaleParameters> {
        let console = &mut self.console;

        console.println(&output::heading("Token Creation - Step 1: Token Name"));
        let token_name = prompt::ask_text(console, "Enter a name for your new token")?;
        console.println(&format!("You entered:  {}", token_name));

        console.println(&output::heading("Token Creation - Step 2: Token Symbol"));
        let token_symbol = prompt::ask_text(console, &format!("Enter a symbol for {}", token_name))?;
        console.println(&format!("You entered:  {}", token_symbol));

        console.println(&output::heading("Token Creation - Step 3: Decimals"));
        let token_decimals = prompt::ask_parsed(
            console,
            &format!(
                "How many decimals will {} token ({}) have?",
                token_name, token_symbol
            ),
            prompt::parse_decimals,
        )?;
        console.println(&format!("You entered:  {}", token_decimals));
        console.println(&format!(
            "{} token ({}) with {} decimals will be used for the ICO.",
            token_name, token_symbol, token_decimals
        ));

        console.println(&output::heading("ICO Creation - Step 1: Start date"));
        let start_time = prompt::ask_u64(
            console,
            "Choose a start date for the crowdsale (Unix seconds)",
        )?;
        console.println(&format!("You chose:  {}", start_time));

        console.println(&output::heading("ICO Creation - Step 2: End date"));
        let end_time = prompt::ask_parsed(
            console,
            "Choose an end date for the crowdsale (Unix seconds)",
            |s| prompt::parse_end_time(start_time, s),
        )?;
        console.println(&format!("You chose:  {}", end_time));

        console.println(&output::heading("ICO Creation - Step 3: Wallet address"));
        let wallet = prompt::ask_text(
            console,
            "Enter an ETH address to be used as wallet (funds will be transferred to this account)",
        )?;
        console.println(&format!("You chose:  {}", wallet));

        console.println(&output::heading(&format!(
            "ICO Creation - Step 4: ETH to {} exchange rate.",
            token_symbol
        )));
        let rate = prompt::ask_uint(
            console,
            &format!(
                "Enter the exchange rate for your token (1 ETH = x {})",
                token_symbol
            ),
        )?;
        console.println(&format!("Each 1 ETH will yield {} {}", rate, token_symbol));

        console.println(&output::heading("ICO Creation - Step 5: Token Cap"));
        let token_cap = prompt::ask_parsed(
            console,
            "What will be the maximum tokens to be minted? (Token Cap)",
            |s| prompt::parse_token_cap(token_decimals, s),
        )?;
        console.println(&format!(
            "The ICO will mint and distribute a maximum of {} tokens.",
            units::format_units(token_cap, token_decimals)?
        ));

        console.println(&output::heading(
            "ICO Creation - Step 6: Minimum allowed contribution",
        ));
        let min_contribution = prompt::ask_ether(
            console,
            "What will be the minimum possible contribution? (in ether)",
        )?;
        console.println(&format!(
            "The minimum allowed contribution will be {} ether.",
            units::format_ether(min_contribution)
        ));

        console.println(&output::heading(
            "ICO Creation - Step 7: Maximum allowed contribution",
        ));
        let max_contribution = prompt::ask_parsed(
            console,
            "What will be the maximum possible contribution? (in ether)",
            |s| prompt::parse_max_contribution(min_contribution, s),
        )?;
        console.println(&format!(
            "The maximum allowed contribution will be {} ether.",
            units::format_ether(max_contribution)
        ));

        Ok(CrowdsaleParameters {
            token_name,
            token_symbol,
            token_decimals,
            start_time,
            end_time,
            wallet,
            rate,
            token_cap,
            min_contribution,
            max_contribution,
        })
    }

    async fn manage_flow(&mut self, handle: Option<CrowdsaleHandle>) -> anyhow::Result<State> {
        self.say_all(output::section_lines("Participate in existing ICO"));

        let entered = handle.is_none();
        let crowdsale = match handle {
            Some(handle) => handle,
            None => self.ask_crowdsale().await?,
        };
        let operator = self.operator().await?;

        let snapshot = match fetch_snapshot(&self.gateway, &crowdsale, operator).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "failed to read crowdsale");
                self.say(&output::error_line(&format!(
                    "Could not read the ICO at {}: {}",
                    output::format_address(&crowdsale.address()),
                    e
                )));
                // Code at the address but not a crowdsale: ask again.
                return Ok(if entered {
                    State::Manage(None)
                } else {
                    State::MainMenu
                });
            }
        };

        let now = (self.clock)();
        self.say_all(output::snapshot_lines(&snapshot, now));

        let blockers = snapshot.contribution_blockers(now);
        if blockers.is_empty() {
            return Ok(State::Contribute(crowdsale));
        }

        debug!(?blockers, "contribution not possible");
        for blocker in &blockers {
            self.say(&output::notice(&blocker.to_string()));
        }
        Ok(State::MainMenu)
    }

    /// Ask until the operator names an address with contract code behind it.
    async fn ask_crowdsale(&mut self) -> anyhow::Result<CrowdsaleHandle> {
        loop {
            let input = prompt::ask_text(&mut self.console, "Enter the address of an existing ICO")?;
            match self.gateway.crowdsale_at(&input).await {
                Ok(handle) => return Ok(handle),
                Err(e) => {
                    debug!(input = %input, error = %e, "crowdsale lookup failed");
                    self.say(&output::warning_line(
                        "Please enter the address of an existing contract.",
                    ));
                }
            }
        }
    }

    async fn contribute_flow(&mut self, crowdsale: CrowdsaleHandle) -> anyhow::Result<State> {
        let operator = self.operator().await?;
        let balance = match self.gateway.balance(operator).await {
            Ok(wei) => units::format_ether(wei),
            Err(e) => {
                warn!(error = %e, "balance lookup failed");
                "unknown".to_string()
            }
        };

        self.say("How much (in ether) would you like to contribute?");
        let value = prompt::ask_ether(
            &mut self.console,
            &format!(
                "(The balance in account {} is {} ether)",
                output::format_address(&operator),
                balance
            ),
        )?;
        self.say(&output::info_line(&format!("Sending {} wei", value)));

        let call = crowdsale.buy_tokens(operator);
        match self.gateway.send(operator, &call, value).await {
            Ok(hash) => self.say(&output::success_line(&format!(
                "Contribution confirmed in transaction {:?}",
                hash
            ))),
            Err(e) => {
                warn!(error = %e, "contribution failed");
                self.say(&output::error_line(&format!("Contribution failed: {}", e)));
            }
        }

        Ok(State::Manage(Some(crowdsale)))
    }
}
