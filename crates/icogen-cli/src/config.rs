//! CLI configuration management.
//!
//! Handles the RPC endpoint, artifact location, gas limits and the debug
//! sale-window override.

use icogen_gateway::GasLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Truffle `build/contracts` directory
    pub artifacts_dir: PathBuf,
    /// Gas limit for the crowdsale deployment
    pub deploy_gas: u64,
    /// Gas limit for contributions
    pub send_gas: u64,
    /// Gas limit for read-only calls
    pub call_gas: u64,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
    /// How long to wait for a transaction to be mined
    pub receipt_timeout_secs: u64,
    /// Replace the entered sale window with `[now, now + debug_sale_days]`
    pub debug: bool,
    pub debug_sale_days: u64,
    /// tracing filter directive
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        let gas = GasLimits::default();
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            artifacts_dir: PathBuf::from("build").join("contracts"),
            deploy_gas: gas.deploy,
            send_gas: gas.send,
            call_gas: gas.call,
            request_timeout_secs: 30,
            receipt_timeout_secs: 120,
            debug: false,
            debug_sale_days: 30,
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Keys accepted by `get` and `set`.
    pub const KEYS: &'static [&'static str] = &[
        "rpc_url",
        "artifacts_dir",
        "deploy_gas",
        "send_gas",
        "call_gas",
        "request_timeout_secs",
        "receipt_timeout_secs",
        "debug",
        "debug_sale_days",
        "log_level",
    ];

    /// Load configuration from `path`, writing the defaults there on first use.
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: CliConfig = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".icogen").join("config.toml"))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rpc_url.trim().is_empty() {
            anyhow::bail!("RPC URL cannot be empty");
        }
        if self.deploy_gas == 0 || self.send_gas == 0 || self.call_gas == 0 {
            anyhow::bail!("Gas limits must be positive");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("Request timeout cannot be 0");
        }
        Ok(())
    }

    pub fn gas_limits(&self) -> GasLimits {
        GasLimits {
            deploy: self.deploy_gas,
            send: self.send_gas,
            call: self.call_gas,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    /// Read one key as text.
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        let value = match key {
            "rpc" | "rpc_url" => self.rpc_url.clone(),
            "artifacts" | "artifacts_dir" => self.artifacts_dir.display().to_string(),
            "deploy_gas" => self.deploy_gas.to_string(),
            "send_gas" => self.send_gas.to_string(),
            "call_gas" => self.call_gas.to_string(),
            "request_timeout_secs" => self.request_timeout_secs.to_string(),
            "receipt_timeout_secs" => self.receipt_timeout_secs.to_string(),
            "debug" => self.debug.to_string(),
            "debug_sale_days" => self.debug_sale_days.to_string(),
            "log_level" => self.log_level.clone(),
            _ => anyhow::bail!("Unknown config key: {}", key),
        };
        Ok(value)
    }

    /// Update one key from text.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "rpc" | "rpc_url" => self.rpc_url = value.to_string(),
            "artifacts" | "artifacts_dir" => self.artifacts_dir = PathBuf::from(value),
            "deploy_gas" => self.deploy_gas = value.parse()?,
            "send_gas" => self.send_gas = value.parse()?,
            "call_gas" => self.call_gas = value.parse()?,
            "request_timeout_secs" => self.request_timeout_secs = value.parse()?,
            "receipt_timeout_secs" => self.receipt_timeout_secs = value.parse()?,
            "debug" => self.debug = value.parse()?,
            "debug_sale_days" => self.debug_sale_days = value.parse()?,
            "log_level" => self.log_level = value.to_string(),
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.deploy_gas, 4_000_000);
        assert_eq!(config.send_gas, 2_000_000);
        assert!(!config.debug);
        assert_eq!(config.debug_sale_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = CliConfig::default();
        config.rpc_url = "http://test:8545".to_string();
        config.debug = true;
        config.save_to(&path).unwrap();

        let loaded = CliConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".icogen").join("config.toml");

        let config = CliConfig::load_or_create(&path).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "rpc_url = \"http://node:8545\"\n").unwrap();

        let loaded = CliConfig::load_from(&path).unwrap();
        assert_eq!(loaded.rpc_url, "http://node:8545");
        assert_eq!(loaded.deploy_gas, 4_000_000);
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "deploy_gas = \"lots\"").unwrap();

        let err = CliConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_get_and_set() {
        let mut config = CliConfig::default();
        config.set("rpc", "http://other:8545").unwrap();
        config.set("debug", "true").unwrap();
        config.set("send_gas", "300000").unwrap();

        assert_eq!(config.get("rpc_url").unwrap(), "http://other:8545");
        assert_eq!(config.get("debug").unwrap(), "true");
        assert_eq!(config.gas_limits().send, 300_000);

        assert!(config.set("send_gas", "many").is_err());
        assert!(config.set("chain_id", "1").is_err());
        assert!(config.get("chain_id").is_err());
        for key in CliConfig::KEYS {
            assert!(config.get(key).is_ok(), "{}", key);
        }
    }

    #[test]
    fn test_validate() {
        let mut config = CliConfig::default();
        config.deploy_gas = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.rpc_url = " ".to_string();
        assert!(config.validate().is_err());
    }
}
