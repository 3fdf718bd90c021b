//! TruePass - client, shell and ABI generator for the TruePass Move contract
//!
//! This crate talks to a single deployed Move module on Aptos. It keeps a
//! static description of the module's interface, wraps a fullnode client
//! to call view and entry functions, drives an interactive test menu, and
//! regenerates the interface description from the live network.
//!
//! # Example
//!
//! ```ignore
//! use truepass::{ContractClient, LocalAccount, NodeConfig, RestClient};
//!
//! let client = RestClient::new(NodeConfig::testnet())?;
//! let contract = ContractClient::truepass(client);
//!
//! // View functions need no account
//! let number = contract.get_number().into_option();
//!
//! // Entry functions are signed by a session account
//! let account = LocalAccount::generate();
//! let hash = contract.set_message(&account, "hello").into_option();
//! ```
//!
//! # Interface Descriptor
//!
//! ```
//! use truepass::truepass_abi::{get_function_by_name, get_view_functions};
//!
//! let get_status = get_function_by_name("get_status").unwrap();
//! assert!(get_status.is_view);
//! assert_eq!(get_view_functions().len(), 3);
//! assert!(get_function_by_name("missing").is_none());
//! ```

pub mod account;
pub mod client;
#[cfg(feature = "rest")]
pub mod config;
pub mod contract;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod logging;
#[cfg(feature = "rest")]
pub mod rest_client;
pub mod shell;
pub mod transaction;
pub mod truepass_abi;

#[cfg(test)]
mod mock_client;
#[cfg(test)]
mod test_fixtures;

// Re-export core types
pub use account::{AccountAddress, LocalAccount};
pub use client::{AccountInfo, NodeClient, ViewRequest};
pub use contract::{CallOutcome, ContractClient};
pub use descriptor::{FunctionDescription, InterfaceDescriptor, RecordTypeDescription};
pub use error::{AccountError, ClientError};
pub use generator::{Artifact, ArtifactKind, ArtifactMeta, GenerateError, MoveModuleAbi};
pub use shell::{MenuChoice, Shell};
pub use transaction::TransactionOptions;
pub use truepass_abi::TRUEPASS_ABI;

// Re-export config and REST client when feature is enabled
#[cfg(feature = "rest")]
pub use config::{ConfigError, Network, NodeConfig};
#[cfg(feature = "rest")]
pub use generator::HttpAbiSource;
#[cfg(feature = "rest")]
pub use rest_client::RestClient;
