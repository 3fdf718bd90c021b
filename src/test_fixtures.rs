//! Test fixtures and constants for truepass tests

#![allow(dead_code)] // Test fixtures may not all be used in every test

use crate::account::{AccountAddress, LocalAccount};

/// Deterministic private key for signing tests
pub const TEST_PRIVATE_KEY: &str =
    "0x4b6d6a1b6f3b4e1c9a0d2e5f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b";

/// `abi` section of a module response, as served by the node
pub const MODULE_RESPONSE: &str = r#"{
    "bytecode": "0xa11ceb0b",
    "abi": {
        "address": "0x3680dfbdca8eacd6edcf835f5da855e6c7a5cc9e05a1f5ded8f4294810ca0d4",
        "name": "truepass",
        "friends": [],
        "exposed_functions": [
            {
                "name": "get_status",
                "visibility": "public",
                "is_entry": false,
                "is_view": true,
                "generic_type_params": [],
                "params": ["address"],
                "return": ["bool"]
            },
            {
                "name": "set_message",
                "visibility": "public",
                "is_entry": true,
                "is_view": false,
                "generic_type_params": [],
                "params": ["signer", "0x1::string::String"],
                "return": []
            }
        ],
        "structs": [
            {
                "name": "MessageChange",
                "is_native": false,
                "is_event": true,
                "abilities": ["drop", "store"],
                "generic_type_params": [],
                "fields": [
                    {"name": "account", "type": "address"},
                    {"name": "to_message", "type": "0x1::string::String"}
                ]
            }
        ]
    }
}"#;

/// Helper to create a deterministic session account
#[must_use]
pub fn test_account() -> LocalAccount {
    LocalAccount::from_private_key(TEST_PRIVATE_KEY).expect("valid key")
}

/// Helper to create a test address
#[must_use]
pub fn test_address() -> AccountAddress {
    "0xcafe".parse().expect("valid address")
}
