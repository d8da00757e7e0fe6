//! Command-line surface: flags, subcommands and their execution.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use icogen_gateway::{Artifacts, ContractGateway, RpcClient, RpcGateway};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::console::TermConsole;
use crate::output::*;
use crate::telemetry;
use crate::workflow::{Controller, State};

/// Main CLI.
#[derive(Debug, Parser)]
#[command(name = "icogen")]
#[command(about = "Command-line ICO generator: deploy and join token crowdsales")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// JSON-RPC endpoint URL
    #[arg(short, long, global = true, env = "ICOGEN_RPC_URL")]
    pub rpc: Option<String>,

    /// Configuration file (defaults to ~/.icogen/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the compiled contract artifacts
    #[arg(short, long, global = true)]
    pub artifacts: Option<PathBuf>,

    /// Replace the entered sale window with [now, now + debug_sale_days]
    #[arg(long, global = true)]
    pub debug: bool,

    /// tracing filter directive, e.g. "icogen_gateway=debug"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one the main menu opens.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new crowdsale and its token
    Create,

    /// Inspect and contribute to an existing crowdsale
    Manage {
        /// Crowdsale address; asked for interactively when omitted
        address: Option<String>,
    },

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Key
        key: String,
    },
    /// Reset to defaults
    Reset,
    /// Print the configuration file location
    Path,
}

impl Cli {
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => CliConfig::config_path(),
        }
    }

    /// Load the configuration file and apply command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<CliConfig> {
        let path = self.config_path()?;
        let mut config = CliConfig::load_or_create(&path)?;

        if let Some(rpc) = &self.rpc {
            config.rpc_url = rpc.clone();
        }
        if let Some(artifacts) = &self.artifacts {
            config.artifacts_dir = artifacts.clone();
        }
        if self.debug {
            config.debug = true;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Execute the parsed command line.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config_path()?;
    let config = cli.resolve_config()?;
    telemetry::init_telemetry(&config.log_level)?;

    match cli.command {
        Some(Commands::Config(cmd)) => execute_config(cmd, &config_path),
        Some(Commands::Create) => run_session(&config, Start::Create).await,
        Some(Commands::Manage { address }) => run_session(&config, Start::Manage(address)).await,
        None => run_session(&config, Start::Menu).await,
    }
}

enum Start {
    Menu,
    Create,
    Manage(Option<String>),
}

async fn run_session(config: &CliConfig, start: Start) -> anyhow::Result<()> {
    let client = RpcClient::new(&config.rpc_url, config.request_timeout())
        .with_context(|| format!("Failed to create RPC client for {}", config.rpc_url))?;
    let artifacts = Artifacts::load_dir(&config.artifacts_dir).with_context(|| {
        format!(
            "Failed to load contract artifacts from '{}'",
            config.artifacts_dir.display()
        )
    })?;
    let gateway = RpcGateway::new(
        client,
        artifacts,
        config.gas_limits(),
        config.receipt_timeout(),
    );
    info!(rpc = %config.rpc_url, "connected gateway");

    let state = match start {
        Start::Menu => State::MainMenu,
        Start::Create => State::Create,
        Start::Manage(None) => State::Manage(None),
        Start::Manage(Some(address)) => match gateway.crowdsale_at(&address).await {
            Ok(handle) => State::Manage(Some(handle)),
            Err(e) => {
                warn!(%address, error = %e, "crowdsale lookup failed");
                println!(
                    "{}",
                    warning_line("Please enter the address of an existing contract.")
                );
                State::Manage(None)
            }
        },
    };

    let debug_window = config.debug.then_some(config.debug_sale_days);
    let mut controller = Controller::new(gateway, TermConsole).with_debug_window(debug_window);
    controller.run(state).await
}

fn execute_config(cmd: ConfigCommands, path: &Path) -> anyhow::Result<()> {
    let mut config = CliConfig::load_or_create(path)?;

    match cmd {
        ConfigCommands::Show => {
            println!("{}", "CLI Configuration".bold());
            println!("{}", "=".repeat(50));
            for key in CliConfig::KEYS {
                println!("{:<22}{}", key, config.get(key)?.bright_cyan());
            }
        }

        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            config.validate()?;
            config.save_to(path)?;
            println!("{}", success_line(&format!("Set {} = {}", key, value)));
        }

        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            println!("{} = {}", key.bright_cyan(), value.bright_green());
        }

        ConfigCommands::Reset => {
            let confirm = Confirm::new()
                .with_prompt("Reset all configuration to defaults?")
                .interact()?;

            if confirm {
                config = CliConfig::default();
                config.save_to(path)?;
                println!("{}", success_line("Configuration reset to defaults"));
            }
        }

        ConfigCommands::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_interactive_default() {
        let cli = Cli::try_parse_from(["icogen"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_parse_manage_with_address() {
        let cli = Cli::try_parse_from([
            "icogen",
            "manage",
            "0x00000000000000000000000000000000000000aa",
            "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        match cli.command {
            Some(Commands::Manage { address }) => {
                assert_eq!(
                    address.as_deref(),
                    Some("0x00000000000000000000000000000000000000aa")
                );
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["icogen", "config", "set", "debug", "true"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommands::Set { .. }))
        ));
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let cli = Cli::try_parse_from([
            "icogen",
            "--config",
            path.to_str().unwrap(),
            "--rpc",
            "http://node:9545",
            "--artifacts",
            "out/contracts",
            "--debug",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.rpc_url, "http://node:9545");
        assert_eq!(config.artifacts_dir, PathBuf::from("out/contracts"));
        assert!(config.debug);
        assert_eq!(config.log_level, "debug");

        // Overrides are not written back.
        let stored = CliConfig::load_from(&path).unwrap();
        assert_eq!(stored, CliConfig::default());
    }

    #[test]
    fn test_config_set_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        execute_config(
            ConfigCommands::Set {
                key: "debug_sale_days".into(),
                value: "7".into(),
            },
            &path,
        )
        .unwrap();
        assert_eq!(CliConfig::load_from(&path).unwrap().debug_sale_days, 7);

        let err = execute_config(
            ConfigCommands::Set {
                key: "deploy_gas".into(),
                value: "0".into(),
            },
            &path,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Gas limits"));
        assert_eq!(CliConfig::load_from(&path).unwrap().deploy_gas, 4_000_000);
    }
}
