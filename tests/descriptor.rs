//! Lookups over the compiled-in module interface

use truepass::truepass_abi::{
    get_entry_functions, get_function_by_name, get_struct_by_name, get_view_functions,
    CONTRACT_ADDRESS, MODULE_NAME,
};
use truepass::TRUEPASS_ABI;

#[test]
fn test_known_and_unknown_functions() {
    let set_message = get_function_by_name("set_message").unwrap();
    assert!(set_message.is_entry);
    assert!(!set_message.is_view);
    assert_eq!(set_message.params, ["signer", "0x1::string::String"]);
    assert_eq!(set_message.user_params(), ["0x1::string::String"]);

    assert!(get_function_by_name("transfer").is_none());
    assert!(get_function_by_name("").is_none());
}

#[test]
fn test_known_and_unknown_structs() {
    let event = get_struct_by_name("MessageChange").unwrap();
    assert!(event.is_event);
    assert!(event.has_ability("drop"));
    assert_eq!(event.field("to_message").unwrap().type_name, "0x1::string::String");

    let holder = get_struct_by_name("MessageHolder").unwrap();
    assert!(holder.has_ability("key"));
    assert!(!holder.is_event);

    assert!(get_struct_by_name("Coin").is_none());
}

#[test]
fn test_view_and_entry_partition_functions() {
    let views = get_view_functions();
    let entries = get_entry_functions();

    assert!(views.iter().all(|f| f.is_view));
    assert!(entries.iter().all(|f| f.is_entry));
    assert_eq!(views.len() + entries.len(), TRUEPASS_ABI.exposed_functions.len());

    let mut names: Vec<_> = views.iter().chain(&entries).map(|f| f.name).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        [
            "get_message",
            "get_number",
            "get_status",
            "init_status",
            "set_message",
            "set_status_true",
            "update_status",
        ]
    );
}

#[test]
fn test_update_status_takes_no_signer() {
    let update = get_function_by_name("update_status").unwrap();
    assert_eq!(update.params, ["address", "bool"]);
    assert_eq!(update.user_params().len(), 2);
}

#[test]
fn test_function_ids() {
    assert_eq!(TRUEPASS_ABI.address, CONTRACT_ADDRESS);
    assert_eq!(TRUEPASS_ABI.name, MODULE_NAME);
    assert_eq!(
        TRUEPASS_ABI.function_id("get_status"),
        format!("{CONTRACT_ADDRESS}::truepass::get_status")
    );
}
