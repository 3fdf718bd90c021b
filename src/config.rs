//! Configuration for connecting to Aptos fullnodes
//!
//! This module provides a configuration system for pointing truepass at a
//! fullnode and at the deployed contract.
//!
//! # Example Configuration File (truepass.toml)
//!
//! ```toml
//! [network]
//! network = "testnet"
//!
//! [node]
//! url = "https://fullnode.testnet.aptoslabs.com/v1"
//!
//! [contract]
//! address = "0x3680dfbdca8eacd6edcf835f5da855e6c7a5cc9e05a1f5ded8f4294810ca0d4"
//! module = "truepass"
//!
//! [transaction]
//! max_gas_amount = 100000
//! gas_unit_price = 100
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::transaction::TransactionOptions;
use crate::truepass_abi::{CONTRACT_ADDRESS, MODULE_NAME};

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "truepass.toml";

/// Aptos network selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
    Local,
}

impl Network {
    /// Get the default fullnode REST URL for this network
    #[must_use]
    pub fn default_node_url(self) -> String {
        match self {
            Self::Local => "http://127.0.0.1:8080/v1".to_string(),
            _ => format!("https://fullnode.{self}.aptoslabs.com/v1"),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Devnet => write!(f, "devnet"),
            Self::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            "local" | "localnet" => Ok(Self::Local),
            other => Err(ConfigError::Invalid(format!("unknown network '{other}'"))),
        }
    }
}

/// Fullnode connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSettings {
    /// REST URL including the `/v1` prefix
    pub url: String,
    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self::for_network(Network::default())
    }
}

impl NodeSettings {
    /// Create node settings for a specific network with default settings
    #[must_use]
    pub fn for_network(network: Network) -> Self {
        Self {
            url: network.default_node_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    /// Join an API path onto the node URL
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Location of the deployed contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSettings {
    pub address: String,
    pub module: String,
}

impl Default for ContractSettings {
    fn default() -> Self {
        Self {
            address: CONTRACT_ADDRESS.to_string(),
            module: MODULE_NAME.to_string(),
        }
    }
}

/// Network configuration wrapper (for TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct NetworkWrapper {
    network: Network,
}

/// Complete node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Network selection
    #[serde(default, rename = "network")]
    network_wrapper: NetworkWrapper,
    /// Fullnode settings
    #[serde(default)]
    pub node: NodeSettings,
    /// Contract location
    #[serde(default)]
    pub contract: ContractSettings,
    /// Transaction settings
    #[serde(default)]
    pub transaction: TransactionOptions,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::testnet()
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML string
    ///
    /// A `[network]` section without a `[node]` section picks the default
    /// fullnode for that network.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(toml_str)?;
        let has_node = table.contains_key("node");
        let mut config: Self = table.try_into()?;
        if !has_node {
            config.node = NodeSettings::for_network(config.network());
        }
        Ok(config)
    }

    /// Load `path` if given, else `truepass.toml` in the working directory
    /// if present, else the testnet defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Serialize configuration to TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let toml_str = self.to_toml()?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Get the network type
    #[must_use]
    pub const fn network(&self) -> Network {
        self.network_wrapper.network
    }

    /// Switch network and reset the node URL to that network's default
    pub fn set_network(&mut self, network: Network) {
        self.network_wrapper.network = network;
        self.node.url = network.default_node_url();
    }

    /// Create a default config for the given network
    #[must_use]
    pub fn for_network(network: Network) -> Self {
        Self {
            network_wrapper: NetworkWrapper { network },
            node: NodeSettings::for_network(network),
            contract: ContractSettings::default(),
            transaction: TransactionOptions::default(),
        }
    }

    /// Create a default config for testnet
    #[must_use]
    pub fn testnet() -> Self {
        Self::for_network(Network::Testnet)
    }

    /// Create a default config for mainnet
    #[must_use]
    pub fn mainnet() -> Self {
        Self::for_network(Network::Mainnet)
    }

    /// Create a default config for a local testnet
    #[must_use]
    pub fn local() -> Self {
        Self::for_network(Network::Local)
    }

    /// Override the fullnode URL
    #[must_use]
    pub fn with_node_url(mut self, url: &str) -> Self {
        self.node.url = url.to_string();
        self
    }

    /// Override the contract location
    #[must_use]
    pub fn with_contract(mut self, address: &str, module: &str) -> Self {
        self.contract.address = address.to_string();
        self.contract.module = module.to_string();
        self
    }

    /// URL of the module introspection endpoint for the configured contract
    #[must_use]
    pub fn module_url(&self) -> String {
        self.node.endpoint(&format!(
            "accounts/{}/module/{}",
            self.contract.address, self.contract.module
        ))
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
