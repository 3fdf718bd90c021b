//! Static description of a Move module's interface
//!
//! These types hold `'static` data so a descriptor can be written out as a
//! Rust literal by the generator and compiled straight into the crate (see
//! [`crate::truepass_abi`]).

/// Generic type parameter of a function or struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericTypeParam {
    pub constraints: &'static [&'static str],
}

/// An exposed function of the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDescription {
    pub name: &'static str,
    pub visibility: &'static str,
    pub is_entry: bool,
    pub is_view: bool,
    pub generic_type_params: &'static [GenericTypeParam],
    pub params: &'static [&'static str],
    pub returns: &'static [&'static str],
}

impl FunctionDescription {
    /// Parameters the caller supplies; a leading signer is provided by the
    /// transaction sender instead
    #[must_use]
    pub fn user_params(&self) -> &'static [&'static str] {
        match self.params.split_first() {
            Some((first, rest)) if is_signer(first) => rest,
            _ => self.params,
        }
    }
}

fn is_signer(type_name: &str) -> bool {
    matches!(type_name, "signer" | "&signer")
}

/// A field of a struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescription {
    pub name: &'static str,
    pub type_name: &'static str,
}

/// A struct (resource or event) declared by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordTypeDescription {
    pub name: &'static str,
    pub is_native: bool,
    pub is_event: bool,
    pub abilities: &'static [&'static str],
    pub generic_type_params: &'static [GenericTypeParam],
    pub fields: &'static [FieldDescription],
}

impl RecordTypeDescription {
    #[must_use]
    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities.contains(&ability)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescription> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Interface of one deployed module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    pub address: &'static str,
    pub name: &'static str,
    pub friends: &'static [&'static str],
    pub exposed_functions: &'static [FunctionDescription],
    pub structs: &'static [RecordTypeDescription],
}

impl InterfaceDescriptor {
    /// Look up an exposed function by name
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&'static FunctionDescription> {
        self.exposed_functions.iter().find(|f| f.name == name)
    }

    /// Look up a struct by name
    #[must_use]
    pub fn record_type(&self, name: &str) -> Option<&'static RecordTypeDescription> {
        self.structs.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn view_functions(&self) -> Vec<&'static FunctionDescription> {
        self.exposed_functions.iter().filter(|f| f.is_view).collect()
    }

    #[must_use]
    pub fn entry_functions(&self) -> Vec<&'static FunctionDescription> {
        self.exposed_functions.iter().filter(|f| f.is_entry).collect()
    }

    /// Fully-qualified `{address}::{module}::{function}` identifier
    #[must_use]
    pub fn function_id(&self, function: &str) -> String {
        format!("{}::{}::{}", self.address, self.name, function)
    }
}
