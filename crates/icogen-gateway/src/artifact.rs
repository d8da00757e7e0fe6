//! Truffle build artifacts for the crowdsale and token factories.

use ethers_core::abi::{Abi, Function, Token};
use serde::Deserialize;
use std::path::Path;

use crate::error::{GatewayError, Result};

/// On-disk shape of a Truffle artifact; other fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    #[serde(default)]
    contract_name: Option<String>,
    abi: Abi,
    #[serde(default)]
    bytecode: String,
}

/// A contract's ABI and creation bytecode.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub abi: Abi,
    pub bytecode: Vec<u8>,
}

impl Artifact {
    /// Parse artifact JSON. `fallback_name` is used when the file carries no
    /// `contractName`.
    pub fn from_json(fallback_name: &str, json: &str) -> Result<Self> {
        let file: ArtifactFile = serde_json::from_str(json).map_err(|e| {
            GatewayError::Artifact(format!("{}: {}", fallback_name, e))
        })?;

        let name = file
            .contract_name
            .unwrap_or_else(|| fallback_name.to_string());
        let code = file.bytecode.trim().trim_start_matches("0x");
        let bytecode = hex::decode(code).map_err(|e| {
            GatewayError::Artifact(format!("{}: invalid bytecode: {}", name, e))
        })?;

        Ok(Self {
            name,
            abi: file.abi,
            bytecode,
        })
    }

    /// Load an artifact file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Artifact(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_json(&fallback, &json)
    }

    /// Creation code followed by the ABI-encoded constructor arguments.
    pub fn encode_deploy(&self, args: &[Token]) -> Result<Vec<u8>> {
        if self.bytecode.is_empty() {
            return Err(GatewayError::Artifact(format!(
                "{} has no bytecode (abstract contract or interface?)",
                self.name
            )));
        }

        match self.abi.constructor() {
            Some(constructor) => Ok(constructor.encode_input(self.bytecode.clone(), args)?),
            None if args.is_empty() => Ok(self.bytecode.clone()),
            None => Err(GatewayError::Abi(format!(
                "{} has no constructor but {} argument(s) were given",
                self.name,
                args.len()
            ))),
        }
    }

    /// Look up a function by name.
    pub fn function(&self, name: &str) -> Result<&Function> {
        self.abi.function(name).map_err(|e| {
            GatewayError::Abi(format!("{}.{}: {}", self.name, name, e))
        })
    }
}

/// The pair of factories the generator deploys and talks to.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub crowdsale: Artifact,
    pub token: Artifact,
}

impl Artifacts {
    pub const CROWDSALE_FILE: &'static str = "CrowdsaleGenerator.json";
    pub const TOKEN_FILE: &'static str = "TokenGenerator.json";

    /// Load both artifacts from a Truffle `build/contracts` directory.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            crowdsale: Artifact::load(&dir.join(Self::CROWDSALE_FILE))?,
            token: Artifact::load(&dir.join(Self::TOKEN_FILE))?,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Trimmed-down CrowdsaleGenerator artifact.
    pub const CROWDSALE_JSON: &str = r#"{
        "contractName": "CrowdsaleGenerator",
        "bytecode": "0x6080604052",
        "abi": [
            {"type": "constructor", "stateMutability": "nonpayable", "payable": false, "inputs": [
                {"name": "_startTime", "type": "uint256"},
                {"name": "_endTime", "type": "uint256"},
                {"name": "_wallet", "type": "address"},
                {"name": "_rate", "type": "uint256"},
                {"name": "_tokenCap", "type": "uint256"},
                {"name": "_minContribution", "type": "uint256"},
                {"name": "_maxContribution", "type": "uint256"},
                {"name": "_tokenName", "type": "string"},
                {"name": "_tokenSymbol", "type": "string"},
                {"name": "_tokenDecimals", "type": "uint8"}
            ]},
            {"type": "function", "name": "token", "constant": true, "stateMutability": "view",
             "inputs": [], "outputs": [{"name": "", "type": "address"}]},
            {"type": "function", "name": "tokenCap", "constant": true, "stateMutability": "view",
             "inputs": [], "outputs": [{"name": "", "type": "uint256"}]},
            {"type": "function", "name": "contributions", "constant": true, "stateMutability": "view",
             "inputs": [{"name": "", "type": "address"}], "outputs": [{"name": "", "type": "uint256"}]},
            {"type": "function", "name": "buyTokens", "constant": false, "payable": true, "stateMutability": "payable",
             "inputs": [{"name": "beneficiary", "type": "address"}], "outputs": []}
        ]
    }"#;

    /// Trimmed-down TokenGenerator artifact.
    pub const TOKEN_JSON: &str = r#"{
        "contractName": "TokenGenerator",
        "bytecode": "0x6080",
        "abi": [
            {"type": "function", "name": "symbol", "constant": true, "stateMutability": "view",
             "inputs": [], "outputs": [{"name": "", "type": "string"}]},
            {"type": "function", "name": "decimals", "constant": true, "stateMutability": "view",
             "inputs": [], "outputs": [{"name": "", "type": "uint8"}]}
        ]
    }"#;
}
