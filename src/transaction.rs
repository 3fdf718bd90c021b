//! JSON wire types for user transactions
//!
//! BCS encoding is left to the node: an [`UnsignedTransaction`] is sent to
//! `encode_submission`, the returned signing message is signed locally, and
//! the resulting [`SignedTransaction`] is submitted as JSON.

use crate::account::{AccountAddress, LocalAccount};
use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Gas and finality settings for submitted transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionOptions {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    /// Seconds from now until the transaction expires
    pub expiration_secs: u64,
    /// How long to poll for finality before giving up
    pub wait_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: 100_000,
            gas_unit_price: 100,
            expiration_secs: 600,
            wait_timeout_secs: 20,
            poll_interval_ms: 1_000,
        }
    }
}

/// Call of an entry function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    /// `{address}::{module}::{function}`
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl EntryFunctionPayload {
    #[must_use]
    pub fn new(function: String, arguments: Vec<Value>) -> Self {
        Self {
            function,
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionPayload {
    EntryFunctionPayload(EntryFunctionPayload),
}

/// A user transaction waiting for its signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub sender: AccountAddress,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
    #[serde(with = "u64_string")]
    pub max_gas_amount: u64,
    #[serde(with = "u64_string")]
    pub gas_unit_price: u64,
    #[serde(with = "u64_string")]
    pub expiration_timestamp_secs: u64,
    pub payload: TransactionPayload,
}

impl UnsignedTransaction {
    /// Build a transaction expiring `options.expiration_secs` from now
    #[must_use]
    pub fn new(
        sender: AccountAddress,
        sequence_number: u64,
        payload: EntryFunctionPayload,
        options: &TransactionOptions,
    ) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Self {
            sender,
            sequence_number,
            max_gas_amount: options.max_gas_amount,
            gas_unit_price: options.gas_unit_price,
            expiration_timestamp_secs: now + options.expiration_secs,
            payload: TransactionPayload::EntryFunctionPayload(payload),
        }
    }

    /// Sign the node-provided signing message with the sender's key
    ///
    /// # Errors
    ///
    /// Returns an error if `account` is not the transaction's sender.
    pub fn sign(
        self,
        account: &LocalAccount,
        signing_message: &[u8],
    ) -> Result<SignedTransaction, ClientError> {
        if account.address() != self.sender {
            return Err(ClientError::Signing(format!(
                "account {} cannot sign for sender {}",
                account.address(),
                self.sender
            )));
        }

        let signature = TransactionSignature::Ed25519Signature {
            public_key: account.public_key_hex(),
            signature: format!("0x{}", hex::encode(account.sign(signing_message))),
        };

        Ok(SignedTransaction {
            raw: self,
            signature,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionSignature {
    Ed25519Signature { public_key: String, signature: String },
}

/// A transaction ready for submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub raw: UnsignedTransaction,
    pub signature: TransactionSignature,
}

/// Node acknowledgement of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
}

/// A transaction as reported by `transactions/by_hash`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    #[serde(rename = "type")]
    pub kind: String,
    pub hash: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub vm_status: Option<String>,
}

impl TransactionStatus {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.kind == "pending_transaction"
    }

    /// Committed and executed successfully
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.is_pending() && self.success.unwrap_or(false)
    }
}

/// The REST API encodes `u64` as decimal strings
pub(crate) mod u64_string {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => s.parse().map_err(D::Error::custom),
            serde_json::Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| D::Error::custom(format!("not a u64: {n}"))),
            other => Err(D::Error::custom(format!("expected u64, got {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> EntryFunctionPayload {
        EntryFunctionPayload::new(
            "0x1::truepass::set_message".to_string(),
            vec![json!("hello")],
        )
    }

    #[test]
    fn test_unsigned_json_shape() {
        let sender: AccountAddress = "0x1".parse().unwrap();
        let txn = UnsignedTransaction::new(sender, 7, payload(), &TransactionOptions::default());
        let value = serde_json::to_value(&txn).unwrap();

        assert_eq!(value["sender"], json!(sender.to_hex_literal()));
        assert_eq!(value["sequence_number"], json!("7"));
        assert_eq!(value["max_gas_amount"], json!("100000"));
        assert_eq!(value["gas_unit_price"], json!("100"));
        assert_eq!(value["payload"]["type"], json!("entry_function_payload"));
        assert_eq!(value["payload"]["function"], json!("0x1::truepass::set_message"));
        assert_eq!(value["payload"]["type_arguments"], json!([]));
        assert_eq!(value["payload"]["arguments"], json!(["hello"]));
    }

    #[test]
    fn test_expiration_is_in_the_future() {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let options = TransactionOptions {
            expiration_secs: 30,
            ..Default::default()
        };
        let txn = UnsignedTransaction::new(AccountAddress::new([0; 32]), 0, payload(), &options);
        assert!(txn.expiration_timestamp_secs >= now + 30);
        assert!(txn.expiration_timestamp_secs <= now + 31);
    }

    #[test]
    fn test_signed_json_is_flat() {
        let account = LocalAccount::generate();
        let txn = UnsignedTransaction::new(
            account.address(),
            0,
            payload(),
            &TransactionOptions::default(),
        );
        let signed = txn.sign(&account, b"message").unwrap();
        let value = serde_json::to_value(&signed).unwrap();

        assert_eq!(value["sequence_number"], json!("0"));
        assert_eq!(value["signature"]["type"], json!("ed25519_signature"));
        assert_eq!(value["signature"]["public_key"], json!(account.public_key_hex()));
        // 64-byte signature as 0x-prefixed hex
        assert_eq!(value["signature"]["signature"].as_str().unwrap().len(), 130);
    }

    #[test]
    fn test_sign_rejects_other_sender() {
        let account = LocalAccount::generate();
        let txn = UnsignedTransaction::new(
            AccountAddress::new([9; 32]),
            0,
            payload(),
            &TransactionOptions::default(),
        );
        assert!(matches!(
            txn.sign(&account, b"message"),
            Err(ClientError::Signing(_))
        ));
    }

    #[test]
    fn test_transaction_status() {
        let pending: TransactionStatus =
            serde_json::from_value(json!({"type": "pending_transaction", "hash": "0xab"})).unwrap();
        assert!(pending.is_pending());
        assert!(!pending.is_success());

        let committed: TransactionStatus = serde_json::from_value(json!({
            "type": "user_transaction",
            "hash": "0xab",
            "version": "12",
            "success": true,
            "vm_status": "Executed successfully"
        }))
        .unwrap();
        assert!(committed.is_success());
        assert_eq!(committed.version.as_deref(), Some("12"));
    }
}
