//! REST-based NodeClient implementation for Aptos fullnodes
//!
//! This module provides an implementation of the `NodeClient` trait that
//! talks to the fullnode REST API (`/v1`) over blocking HTTP.
//!
//! # Example
//!
//! ```ignore
//! use truepass::{ContractClient, NodeConfig, RestClient};
//!
//! // Load config from file
//! let config = NodeConfig::from_file("truepass.toml")?;
//! let client = RestClient::new(config)?;
//!
//! // Or point at a node directly
//! let client = RestClient::from_url("http://127.0.0.1:8080/v1")?;
//!
//! let contract = ContractClient::truepass(client);
//! let number = contract.get_number().into_option();
//! ```

use crate::account::AccountAddress;
use crate::client::{AccountInfo, ClientResult, NodeClient, ViewRequest};
use crate::config::{Network, NodeConfig};
use crate::error::ClientError;
use crate::transaction::{
    PendingTransaction, SignedTransaction, TransactionStatus, UnsignedTransaction,
};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Error body returned by the REST API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    error_code: Option<String>,
}

/// REST client for Aptos fullnodes
pub struct RestClient {
    client: Client,
    config: NodeConfig,
}

impl RestClient {
    /// Create a new REST client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: NodeConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.node.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from a config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the client cannot be built.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self, ClientError> {
        Self::new(NodeConfig::from_file(path)?)
    }

    /// Create from a node URL (uses testnet defaults otherwise)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_url(url: &str) -> Result<Self, ClientError> {
        Self::new(NodeConfig::testnet().with_node_url(url))
    }

    /// Create for a specific network with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn for_network(network: Network) -> Result<Self, ClientError> {
        Self::new(NodeConfig::for_network(network))
    }

    /// Get the network type
    #[must_use]
    pub fn network(&self) -> Network {
        self.config.network()
    }

    /// Get a reference to the config
    #[must_use]
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.node.endpoint(path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ClientError::Http(format!("GET {url} failed: {e}")))?;
        Self::parse_response(response)
    }

    /// GET that maps 404 to `None`
    fn get_optional<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(ClientError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| ClientError::Http(format!("POST {url} failed: {e}")))?;
        Self::parse_response(response)
    }

    fn parse_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ClientError::Http(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(format!("{e}: {body}")))
    }

    /// Get ledger info (chain id, ledger version, timestamps)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub fn ledger_info(&self) -> ClientResult<Value> {
        self.get("")
    }

    /// Get the chain id reported by the node
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the field is missing.
    pub fn chain_id(&self) -> ClientResult<u8> {
        chain_id_from_ledger_info(&self.ledger_info()?)
    }
}

fn chain_id_from_ledger_info(info: &Value) -> ClientResult<u8> {
    info.get("chain_id")
        .and_then(Value::as_u64)
        .and_then(|id| u8::try_from(id).ok())
        .ok_or_else(|| ClientError::Decode("Ledger info is missing chain_id".to_string()))
}

fn api_error(status: StatusCode, body: &str) -> ClientError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            message,
            error_code: Some(code),
        }) => format!("{message} ({code})"),
        Ok(ApiErrorBody { message, .. }) => message,
        Err(_) => body.to_string(),
    };
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

impl NodeClient for RestClient {
    fn view(&self, request: &ViewRequest) -> ClientResult<Vec<Value>> {
        self.post("view", request)
    }

    fn account(&self, address: &AccountAddress) -> ClientResult<AccountInfo> {
        self.get(&format!("accounts/{address}"))
    }

    fn encode_submission(&self, txn: &UnsignedTransaction) -> ClientResult<Vec<u8>> {
        let encoded: String = self.post("transactions/encode_submission", txn)?;
        hex::decode(encoded.trim_start_matches("0x"))
            .map_err(|e| ClientError::Decode(format!("Invalid signing message: {e}")))
    }

    fn submit(&self, txn: &SignedTransaction) -> ClientResult<PendingTransaction> {
        let pending: PendingTransaction = self.post("transactions", txn)?;
        info!(hash = %pending.hash, sender = %txn.raw.sender, "transaction submitted");
        Ok(pending)
    }

    fn wait_for_transaction(&self, hash: &str) -> ClientResult<TransactionStatus> {
        let options = &self.config.transaction;
        let timeout = Duration::from_secs(options.wait_timeout_secs);
        let poll_interval = Duration::from_millis(options.poll_interval_ms);
        let start = Instant::now();

        loop {
            // Freshly submitted transactions may 404 until indexed
            let status: Option<TransactionStatus> =
                self.get_optional(&format!("transactions/by_hash/{hash}"))?;

            if let Some(status) = status.filter(|s| !s.is_pending()) {
                if status.is_success() {
                    info!(%hash, version = ?status.version, "transaction committed");
                    return Ok(status);
                }
                return Err(ClientError::TransactionFailed {
                    hash: hash.to_string(),
                    vm_status: status.vm_status.unwrap_or_else(|| "unknown".to_string()),
                });
            }

            if start.elapsed() >= timeout {
                return Err(ClientError::Timeout {
                    hash: hash.to_string(),
                    secs: options.wait_timeout_secs,
                });
            }
            std::thread::sleep(poll_interval);
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("config", &self.config)
            .finish()
    }
}
