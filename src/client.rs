//! Abstract interface for interacting with Aptos fullnodes

use crate::account::AccountAddress;
use crate::error::ClientError;
use crate::transaction::{
    PendingTransaction, SignedTransaction, TransactionStatus, UnsignedTransaction,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result type for node client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Body of a view-function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl ViewRequest {
    #[must_use]
    pub fn new(function: String, arguments: Vec<Value>) -> Self {
        Self {
            function,
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

/// On-chain account metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(with = "crate::transaction::u64_string")]
    pub sequence_number: u64,
    pub authentication_key: String,
}

/// Abstract interface for interacting with Aptos fullnodes
///
/// This trait lets the contract client run against a live node
/// ([`crate::rest_client::RestClient`]) or an in-memory double in tests.
pub trait NodeClient {
    /// Execute a view function and return its result list
    fn view(&self, request: &ViewRequest) -> ClientResult<Vec<Value>>;

    /// Get sequence number and authentication key of an account
    fn account(&self, address: &AccountAddress) -> ClientResult<AccountInfo>;

    /// Get the BCS signing message for a transaction
    fn encode_submission(&self, txn: &UnsignedTransaction) -> ClientResult<Vec<u8>>;

    /// Submit a signed transaction
    fn submit(&self, txn: &SignedTransaction) -> ClientResult<PendingTransaction>;

    /// Block until the transaction is committed
    ///
    /// Committed transactions that did not execute successfully are errors.
    fn wait_for_transaction(&self, hash: &str) -> ClientResult<TransactionStatus>;
}
