//! Contract client for the TruePass module
//!
//! Every contract function is either a view call (read-only, no signature)
//! or an entry call (signed transaction, waits for finality). Both go
//! through the injected [`NodeClient`]; failures never escape as panics or
//! `Err`, they come back as [`CallOutcome::Failed`].

use crate::account::{AccountAddress, LocalAccount};
use crate::client::{AccountInfo, ClientResult, NodeClient, ViewRequest};
use crate::descriptor::{FunctionDescription, InterfaceDescriptor};
use crate::error::ClientError;
use crate::transaction::{EntryFunctionPayload, TransactionOptions, UnsignedTransaction};
use crate::truepass_abi::TRUEPASS_ABI;
use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of a single contract call
#[derive(Debug)]
pub enum CallOutcome<T> {
    /// The call succeeded and produced a value
    Value(T),
    /// The call succeeded but the node returned nothing
    Empty,
    /// The call failed; the reason is kept for callers that care
    Failed(ClientError),
}

impl<T> CallOutcome<T> {
    /// Absent on both `Empty` and `Failed`
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        !matches!(self, Self::Value(_))
    }
}

/// Client for one deployed module
pub struct ContractClient<C> {
    client: C,
    abi: &'static InterfaceDescriptor,
    address: String,
    options: TransactionOptions,
}

impl<C: NodeClient> ContractClient<C> {
    /// Create a client for the module described by `abi`
    pub fn new(client: C, abi: &'static InterfaceDescriptor) -> Self {
        Self {
            client,
            abi,
            address: abi.address.to_string(),
            options: TransactionOptions::default(),
        }
    }

    /// Create a client for the deployed TruePass module
    pub fn truepass(client: C) -> Self {
        Self::new(client, &TRUEPASS_ABI)
    }

    /// Set gas and expiration options for transactions
    #[must_use]
    pub fn with_options(mut self, options: TransactionOptions) -> Self {
        self.options = options;
        self
    }

    /// Call the same module published under another account
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn abi(&self) -> &'static InterfaceDescriptor {
        self.abi
    }

    /// Account the module is called under
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn node(&self) -> &C {
        &self.client
    }

    /// `{address}::{module}::{function}`
    pub fn function_id(&self, function: &str) -> String {
        format!("{}::{}::{function}", self.address, self.abi.name)
    }

    /// Status flag stored for `address`
    pub fn get_status(&self, address: &AccountAddress) -> CallOutcome<bool> {
        let outcome = self.view_first("get_status", vec![address_arg(address)]);
        decode(outcome, "get_status", |v| v.as_bool())
    }

    /// Message stored for `address`
    pub fn get_message(&self, address: &AccountAddress) -> CallOutcome<String> {
        let outcome = self.view_first("get_message", vec![address_arg(address)]);
        decode(outcome, "get_message", |v| v.as_str().map(str::to_string))
    }

    pub fn get_number(&self) -> CallOutcome<u64> {
        let outcome = self.view_first("get_number", Vec::new());
        decode(outcome, "get_number", |v| match v {
            Value::String(s) => s.parse().ok(),
            other => other.as_u64(),
        })
    }

    /// Create the sender's status record
    pub fn init_status(&self, account: &LocalAccount) -> CallOutcome<String> {
        self.execute(account, "init_status", Vec::new())
    }

    pub fn set_message(&self, account: &LocalAccount, message: &str) -> CallOutcome<String> {
        self.execute(account, "set_message", vec![Value::String(message.to_string())])
    }

    pub fn set_status_true(&self, account: &LocalAccount) -> CallOutcome<String> {
        self.execute(account, "set_status_true", Vec::new())
    }

    /// Set the status of `target`; the contract decides whether the sender
    /// is allowed to
    pub fn update_status(
        &self,
        account: &LocalAccount,
        target: &AccountAddress,
        status: bool,
    ) -> CallOutcome<String> {
        self.execute(
            account,
            "update_status",
            vec![address_arg(target), Value::Bool(status)],
        )
    }

    /// Sequence number and authentication key of `address`
    pub fn account_info(&self, address: &AccountAddress) -> CallOutcome<AccountInfo> {
        match self.client.account(address) {
            Ok(info) => CallOutcome::Value(info),
            Err(err) => {
                warn!(%address, error = %err, "account lookup failed");
                CallOutcome::Failed(err)
            }
        }
    }

    /// Call a view function and keep only the first returned value
    fn view_first(&self, function: &str, arguments: Vec<Value>) -> CallOutcome<Value> {
        let result = self
            .checked(function, &arguments, FunctionKind::View)
            .and_then(|id| self.client.view(&ViewRequest::new(id, arguments)));

        match result {
            Ok(values) => match values.into_iter().next() {
                Some(first) => CallOutcome::Value(first),
                None => CallOutcome::Empty,
            },
            Err(err) => {
                warn!(function, error = %err, "view call failed");
                CallOutcome::Failed(err)
            }
        }
    }

    /// Build, sign, submit and wait for an entry function call
    fn execute(
        &self,
        account: &LocalAccount,
        function: &str,
        arguments: Vec<Value>,
    ) -> CallOutcome<String> {
        match self.submit_and_wait(account, function, arguments) {
            Ok(hash) => CallOutcome::Value(hash),
            Err(err) => {
                warn!(function, sender = %account.address(), error = %err, "transaction failed");
                CallOutcome::Failed(err)
            }
        }
    }

    fn submit_and_wait(
        &self,
        account: &LocalAccount,
        function: &str,
        arguments: Vec<Value>,
    ) -> ClientResult<String> {
        let id = self.checked(function, &arguments, FunctionKind::Entry)?;
        let sender = account.address();
        let sequence_number = self.client.account(&sender)?.sequence_number;

        let payload = EntryFunctionPayload::new(id, arguments);
        let txn = UnsignedTransaction::new(sender, sequence_number, payload, &self.options);
        let signing_message = self.client.encode_submission(&txn)?;
        let signed = txn.sign(account, &signing_message)?;

        let pending = self.client.submit(&signed)?;
        debug!(hash = %pending.hash, function, "waiting for transaction");
        self.client.wait_for_transaction(&pending.hash)?;
        Ok(pending.hash)
    }

    /// Check a call against the descriptor and return the function id
    fn checked(
        &self,
        function: &str,
        arguments: &[Value],
        kind: FunctionKind,
    ) -> ClientResult<String> {
        let description = self.abi.function(function).ok_or_else(|| {
            ClientError::Abi(format!("{} has no function {function}", self.abi.name))
        })?;
        check_call(description, arguments, kind)?;
        Ok(self.function_id(function))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
    View,
    Entry,
}

fn check_call(
    function: &FunctionDescription,
    arguments: &[Value],
    kind: FunctionKind,
) -> ClientResult<()> {
    match kind {
        FunctionKind::View if !function.is_view => {
            return Err(ClientError::Abi(format!("{} is not a view function", function.name)));
        }
        FunctionKind::Entry if !function.is_entry => {
            return Err(ClientError::Abi(format!("{} is not an entry function", function.name)));
        }
        _ => {}
    }

    let params = function.user_params();
    if params.len() != arguments.len() {
        return Err(ClientError::Abi(format!(
            "{} takes {} argument(s), got {}",
            function.name,
            params.len(),
            arguments.len()
        )));
    }

    for (param, arg) in params.iter().zip(arguments) {
        if !argument_matches(param, arg) {
            return Err(ClientError::Abi(format!(
                "{}: argument {arg} does not match type {param}",
                function.name
            )));
        }
    }
    Ok(())
}

/// JSON argument encoding accepted by the REST API for a Move type
fn argument_matches(type_name: &str, arg: &Value) -> bool {
    match type_name {
        "bool" => arg.is_boolean(),
        "address" => arg
            .as_str()
            .is_some_and(|s| s.parse::<AccountAddress>().is_ok()),
        "u8" | "u16" | "u32" => arg.is_u64(),
        "u64" | "u128" | "u256" => arg
            .as_str()
            .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())),
        "0x1::string::String" => arg.is_string(),
        // Vectors, objects and generics are not checked
        _ => true,
    }
}

fn address_arg(address: &AccountAddress) -> Value {
    Value::String(address.to_hex_literal())
}

fn decode<T>(
    outcome: CallOutcome<Value>,
    function: &str,
    f: impl FnOnce(&Value) -> Option<T>,
) -> CallOutcome<T> {
    match outcome {
        CallOutcome::Value(value) => match f(&value) {
            Some(decoded) => CallOutcome::Value(decoded),
            None => {
                let err = ClientError::Decode(format!("{function} returned unexpected {value}"));
                warn!(function, error = %err, "view call failed");
                CallOutcome::Failed(err)
            }
        },
        CallOutcome::Empty => CallOutcome::Empty,
        CallOutcome::Failed(err) => CallOutcome::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_client::MockClient;
    use crate::test_fixtures::{test_account, test_address};
    use serde_json::json;

    fn contract(mock: &MockClient) -> ContractClient<MockClient> {
        ContractClient::truepass(mock.clone())
    }

    #[test]
    fn test_function_id_format() {
        let mock = MockClient::new();
        assert_eq!(
            contract(&mock).function_id("get_status"),
            format!("{}::truepass::get_status", crate::truepass_abi::CONTRACT_ADDRESS)
        );
    }

    #[test]
    fn test_with_address_relocates_calls() {
        let mock = MockClient::new();
        mock.set_view_result("get_number", vec![json!("1")]);
        let c = contract(&mock).with_address("0xcafe");

        assert_eq!(c.address(), "0xcafe");
        assert_eq!(c.function_id("get_number"), "0xcafe::truepass::get_number");
        assert_eq!(c.get_number().into_option(), Some(1));
        assert_eq!(
            mock.view_requests().pop().unwrap().function,
            "0xcafe::truepass::get_number"
        );

        c.set_status_true(&test_account()).into_option().unwrap();
        match mock.submitted().pop().unwrap().raw.payload {
            crate::transaction::TransactionPayload::EntryFunctionPayload(p) => {
                assert_eq!(p.function, "0xcafe::truepass::set_status_true");
            }
        }
    }

    #[test]
    fn test_get_status_unknown_address_is_empty() {
        let mock = MockClient::new();
        mock.set_view_result("get_status", Vec::new());

        let outcome = contract(&mock).get_status(&test_address());
        assert!(matches!(outcome, CallOutcome::Empty));
        assert_eq!(outcome.into_option(), None);
    }

    #[test]
    fn test_view_returns_first_element() {
        let mock = MockClient::new();
        mock.set_view_result("get_message", vec![json!("first"), json!("second")]);
        mock.set_view_result("get_status", vec![json!(true), json!(false)]);

        let c = contract(&mock);
        assert_eq!(c.get_message(&test_address()).into_option(), Some("first".to_string()));
        assert_eq!(c.get_status(&test_address()).into_option(), Some(true));
    }

    #[test]
    fn test_view_request_contents() {
        let mock = MockClient::new();
        mock.set_view_result("get_status", vec![json!(false)]);

        contract(&mock).get_status(&test_address());

        let request = mock.view_requests().pop().unwrap();
        assert!(request.function.ends_with("::truepass::get_status"));
        assert!(request.type_arguments.is_empty());
        assert_eq!(request.arguments, vec![json!(test_address().to_hex_literal())]);
    }

    #[test]
    fn test_get_number_accepts_string_and_number() {
        let mock = MockClient::new();
        mock.set_view_result("get_number", vec![json!("42")]);
        assert_eq!(contract(&mock).get_number().into_option(), Some(42));

        mock.set_view_result("get_number", vec![json!(7)]);
        assert_eq!(contract(&mock).get_number().into_option(), Some(7));
    }

    #[test]
    fn test_unexpected_value_is_failure() {
        let mock = MockClient::new();
        mock.set_view_result("get_status", vec![json!("yes")]);

        let outcome = contract(&mock).get_status(&test_address());
        assert!(matches!(outcome.failure(), Some(ClientError::Decode(_))));
    }

    #[test]
    fn test_every_operation_absent_on_failure() {
        let mock = MockClient::failing();
        let c = contract(&mock);
        let account = test_account();
        let target = test_address();

        assert!(c.get_status(&target).failure().is_some());
        assert!(c.get_message(&target).failure().is_some());
        assert!(c.get_number().failure().is_some());
        assert!(c.init_status(&account).failure().is_some());
        assert!(c.set_message(&account, "hello").failure().is_some());
        assert!(c.set_status_true(&account).failure().is_some());
        assert!(c.update_status(&account, &target, true).failure().is_some());
        assert!(c.account_info(&target).failure().is_some());

        assert!(c.get_number().into_option().is_none());
        assert!(c.set_status_true(&account).into_option().is_none());
    }

    #[test]
    fn test_set_message_returns_hash_after_finality() {
        let mock = MockClient::new();
        let account = test_account();

        let hash = contract(&mock)
            .set_message(&account, "hello")
            .into_option()
            .expect("transaction hash");

        assert!(!hash.is_empty());
        assert_eq!(mock.waited_for(), vec![hash]);

        let submitted = mock.submitted().pop().unwrap();
        assert_eq!(submitted.raw.sender, account.address());
        match submitted.raw.payload {
            crate::transaction::TransactionPayload::EntryFunctionPayload(p) => {
                assert!(p.function.ends_with("::truepass::set_message"));
                assert_eq!(p.arguments, vec![json!("hello")]);
            }
        }
    }

    #[test]
    fn test_transaction_uses_sequence_number_and_options() {
        let mock = MockClient::new();
        mock.set_sequence_number(5);
        let options = TransactionOptions {
            max_gas_amount: 2_000,
            gas_unit_price: 150,
            ..Default::default()
        };

        contract(&mock)
            .with_options(options)
            .update_status(&test_account(), &test_address(), false)
            .into_option()
            .unwrap();

        let submitted = mock.submitted().pop().unwrap();
        assert_eq!(submitted.raw.sequence_number, 5);
        assert_eq!(submitted.raw.max_gas_amount, 2_000);
        assert_eq!(submitted.raw.gas_unit_price, 150);
    }

    #[test]
    fn test_failed_finality_is_failure() {
        let mock = MockClient::new();
        mock.fail_transactions("Move abort: E_NOT_AUTHORIZED");

        let outcome = contract(&mock).update_status(&test_account(), &test_address(), true);
        assert!(matches!(
            outcome.failure(),
            Some(ClientError::TransactionFailed { .. })
        ));
    }

    #[test]
    fn test_account_info_passthrough() {
        let mock = MockClient::new();
        mock.set_sequence_number(3);

        let info = contract(&mock).account_info(&test_address()).into_option().unwrap();
        assert_eq!(info.sequence_number, 3);
    }

    #[test]
    fn test_check_call_rejects_wrong_kind_and_arity() {
        let get_status = TRUEPASS_ABI.function("get_status").unwrap();
        assert!(check_call(get_status, &[json!("0x1")], FunctionKind::View).is_ok());
        assert!(check_call(get_status, &[json!("0x1")], FunctionKind::Entry).is_err());
        assert!(check_call(get_status, &[], FunctionKind::View).is_err());
        assert!(check_call(get_status, &[json!(true)], FunctionKind::View).is_err());

        let set_message = TRUEPASS_ABI.function("set_message").unwrap();
        assert!(check_call(set_message, &[json!("hi")], FunctionKind::Entry).is_ok());
        assert!(check_call(set_message, &[json!(1)], FunctionKind::Entry).is_err());
    }

    #[test]
    fn test_argument_matches() {
        assert!(argument_matches("u64", &json!("18446744073709551615")));
        assert!(!argument_matches("u64", &json!(1)));
        assert!(argument_matches("u8", &json!(1)));
        assert!(argument_matches("vector<u8>", &json!("0x00")));
        assert!(!argument_matches("address", &json!("0xzz")));
    }

    #[test]
    fn test_rejected_call_never_reaches_node() {
        let mock = MockClient::new();
        let c = contract(&mock);

        let outcome = c.view_first("missing_function", Vec::new());
        assert!(matches!(outcome.failure(), Some(ClientError::Abi(_))));
        assert!(mock.view_requests().is_empty());
    }
}
