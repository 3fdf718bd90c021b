// Auto-generated ABI for truepass contract
// Generated from: 0x3680dfbdca8eacd6edcf835f5da855e6c7a5cc9e05a1f5ded8f4294810ca0d4
// Network: testnet
//
// Regenerate with `cargo run --bin gen-abi`; do not edit by hand.

//! Interface of the `truepass` module

use crate::descriptor::{
    FieldDescription, FunctionDescription, InterfaceDescriptor, RecordTypeDescription,
};

pub const CONTRACT_ADDRESS: &str = "0x3680dfbdca8eacd6edcf835f5da855e6c7a5cc9e05a1f5ded8f4294810ca0d4";
pub const MODULE_NAME: &str = "truepass";

pub const TRUEPASS_ABI: InterfaceDescriptor = InterfaceDescriptor {
    address: CONTRACT_ADDRESS,
    name: MODULE_NAME,
    friends: &[],
    exposed_functions: &[
        FunctionDescription {
            name: "get_message",
            visibility: "public",
            is_entry: false,
            is_view: true,
            generic_type_params: &[],
            params: &["address"],
            returns: &["0x1::string::String"],
        },
        FunctionDescription {
            name: "get_number",
            visibility: "public",
            is_entry: false,
            is_view: true,
            generic_type_params: &[],
            params: &[],
            returns: &["u64"],
        },
        FunctionDescription {
            name: "get_status",
            visibility: "public",
            is_entry: false,
            is_view: true,
            generic_type_params: &[],
            params: &["address"],
            returns: &["bool"],
        },
        FunctionDescription {
            name: "init_status",
            visibility: "public",
            is_entry: true,
            is_view: false,
            generic_type_params: &[],
            params: &["signer"],
            returns: &[],
        },
        FunctionDescription {
            name: "set_message",
            visibility: "public",
            is_entry: true,
            is_view: false,
            generic_type_params: &[],
            params: &["signer", "0x1::string::String"],
            returns: &[],
        },
        FunctionDescription {
            name: "set_status_true",
            visibility: "public",
            is_entry: true,
            is_view: false,
            generic_type_params: &[],
            params: &["signer"],
            returns: &[],
        },
        FunctionDescription {
            name: "update_status",
            visibility: "public",
            is_entry: true,
            is_view: false,
            generic_type_params: &[],
            params: &["address", "bool"],
            returns: &[],
        },
    ],
    structs: &[
        RecordTypeDescription {
            name: "AddressStatusHolder",
            is_native: false,
            is_event: false,
            abilities: &["key"],
            generic_type_params: &[],
            fields: &[
                FieldDescription { name: "status", type_name: "bool" },
            ],
        },
        RecordTypeDescription {
            name: "MessageChange",
            is_native: false,
            is_event: true,
            abilities: &["drop", "store"],
            generic_type_params: &[],
            fields: &[
                FieldDescription { name: "account", type_name: "address" },
                FieldDescription { name: "from_message", type_name: "0x1::string::String" },
                FieldDescription { name: "to_message", type_name: "0x1::string::String" },
            ],
        },
        RecordTypeDescription {
            name: "MessageHolder",
            is_native: false,
            is_event: false,
            abilities: &["key"],
            generic_type_params: &[],
            fields: &[
                FieldDescription { name: "message", type_name: "0x1::string::String" },
            ],
        },
    ],
};

/// Get function definition by name
#[must_use]
pub fn get_function_by_name(name: &str) -> Option<&'static FunctionDescription> {
    TRUEPASS_ABI.function(name)
}

/// Get struct definition by name
#[must_use]
pub fn get_struct_by_name(name: &str) -> Option<&'static RecordTypeDescription> {
    TRUEPASS_ABI.record_type(name)
}

/// Get all view functions
#[must_use]
pub fn get_view_functions() -> Vec<&'static FunctionDescription> {
    TRUEPASS_ABI.view_functions()
}

/// Get all entry functions
#[must_use]
pub fn get_entry_functions() -> Vec<&'static FunctionDescription> {
    TRUEPASS_ABI.entry_functions()
}
