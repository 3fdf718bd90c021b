//! Mock NodeClient implementation for testing

#![cfg(test)]

use crate::account::AccountAddress;
use crate::client::{AccountInfo, ClientResult, NodeClient, ViewRequest};
use crate::error::ClientError;
use crate::transaction::{
    PendingTransaction, SignedTransaction, TransactionStatus, UnsignedTransaction,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock client for testing without a live node
#[derive(Clone)]
pub struct MockClient {
    inner: Arc<Mutex<MockClientInner>>,
}

#[derive(Default)]
struct MockClientInner {
    /// View results keyed by bare function name
    view_results: HashMap<String, Vec<Value>>,
    fail_all: bool,
    sequence_number: u64,
    transaction_failure: Option<String>,
    view_requests: Vec<ViewRequest>,
    submitted: Vec<SignedTransaction>,
    waited_for: Vec<String>,
    calls: usize,
}

impl MockClient {
    /// Create a new mock client; views return empty lists by default
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockClientInner::default())),
        }
    }

    /// A client whose every call fails at the network level
    #[must_use]
    pub fn failing() -> Self {
        let client = Self::new();
        client.inner.lock().unwrap().fail_all = true;
        client
    }

    pub fn set_view_result(&self, function: &str, values: Vec<Value>) {
        let mut inner = self.inner.lock().unwrap();
        inner.view_results.insert(function.to_string(), values);
    }

    pub fn set_sequence_number(&self, sequence_number: u64) {
        self.inner.lock().unwrap().sequence_number = sequence_number;
    }

    /// Make committed transactions report failure with `vm_status`
    pub fn fail_transactions(&self, vm_status: &str) {
        self.inner.lock().unwrap().transaction_failure = Some(vm_status.to_string());
    }

    pub fn view_requests(&self) -> Vec<ViewRequest> {
        self.inner.lock().unwrap().view_requests.clone()
    }

    pub fn submitted(&self) -> Vec<SignedTransaction> {
        self.inner.lock().unwrap().submitted.clone()
    }

    pub fn waited_for(&self) -> Vec<String> {
        self.inner.lock().unwrap().waited_for.clone()
    }

    /// Total number of calls that reached this client
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls
    }

    /// Count the call and fail it when the client is set to fail
    fn enter(&self, operation: &str) -> ClientResult<std::sync::MutexGuard<'_, MockClientInner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        if inner.fail_all {
            return Err(ClientError::Http(format!("{operation}: connection refused")));
        }
        Ok(inner)
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeClient for MockClient {
    fn view(&self, request: &ViewRequest) -> ClientResult<Vec<Value>> {
        let mut inner = self.enter("view")?;
        inner.view_requests.push(request.clone());

        let name = request.function.rsplit("::").next().unwrap_or_default();
        Ok(inner.view_results.get(name).cloned().unwrap_or_default())
    }

    fn account(&self, _address: &AccountAddress) -> ClientResult<AccountInfo> {
        let inner = self.enter("account")?;
        Ok(AccountInfo {
            sequence_number: inner.sequence_number,
            authentication_key: format!("0x{}", "00".repeat(32)),
        })
    }

    fn encode_submission(&self, txn: &UnsignedTransaction) -> ClientResult<Vec<u8>> {
        let _inner = self.enter("encode_submission")?;
        Ok(serde_json::to_vec(txn)?)
    }

    fn submit(&self, txn: &SignedTransaction) -> ClientResult<PendingTransaction> {
        let mut inner = self.enter("submit")?;
        inner.submitted.push(txn.clone());

        let hash = format!("0x{}", hex::encode(rand::random::<[u8; 32]>()));
        Ok(PendingTransaction { hash })
    }

    fn wait_for_transaction(&self, hash: &str) -> ClientResult<TransactionStatus> {
        let mut inner = self.enter("wait_for_transaction")?;
        inner.waited_for.push(hash.to_string());

        if let Some(vm_status) = &inner.transaction_failure {
            return Err(ClientError::TransactionFailed {
                hash: hash.to_string(),
                vm_status: vm_status.clone(),
            });
        }

        Ok(TransactionStatus {
            kind: "user_transaction".to_string(),
            hash: hash.to_string(),
            version: Some(inner.submitted.len().to_string()),
            success: Some(true),
            vm_status: Some("Executed successfully".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mock_view_defaults_to_empty() {
        let client = MockClient::new();
        let request = ViewRequest::new("0x1::truepass::get_status".to_string(), vec![json!("0x1")]);

        assert!(client.view(&request).unwrap().is_empty());
        assert_eq!(client.view_requests(), vec![request]);
    }

    #[test]
    fn test_mock_view_result_by_name() {
        let client = MockClient::new();
        client.set_view_result("get_number", vec![json!("9")]);

        let request = ViewRequest::new("0xabc::truepass::get_number".to_string(), Vec::new());
        assert_eq!(client.view(&request).unwrap(), vec![json!("9")]);
    }

    #[test]
    fn test_mock_failing_counts_calls() {
        let client = MockClient::failing();
        let address = crate::test_fixtures::test_address();

        assert!(client.account(&address).is_err());
        assert!(client.wait_for_transaction("0x1").is_err());
        assert_eq!(client.call_count(), 2);
    }

    #[test]
    fn test_mock_wait_reports_success() {
        let client = MockClient::new();
        let status = client.wait_for_transaction("0xab").unwrap();
        assert!(status.is_success());
        assert_eq!(client.waited_for(), vec!["0xab".to_string()]);
    }
}
