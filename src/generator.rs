//! Regenerates interface descriptor sources from a deployed module
//!
//! The module ABI is fetched once, checked for content, then rendered as a
//! Rust module (the crate's own [`crate::truepass_abi`]) and as a TypeScript
//! module for the web front end. Nothing is written if the fetch fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Fixed timeout for the module introspection request
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while generating descriptor sources
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Error fetching ABI: {0}")]
    Fetch(String),

    #[error("Error processing ABI: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No ABI found in module data")]
    MissingAbi,

    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveGenericTypeParam {
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFunction {
    pub name: String,
    pub visibility: String,
    pub is_entry: bool,
    pub is_view: bool,
    pub generic_type_params: Vec<MoveGenericTypeParam>,
    pub params: Vec<String>,
    #[serde(rename = "return")]
    pub returns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStructField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStruct {
    pub name: String,
    pub is_native: bool,
    #[serde(default)]
    pub is_event: bool,
    pub abilities: Vec<String>,
    pub generic_type_params: Vec<MoveGenericTypeParam>,
    pub fields: Vec<MoveStructField>,
}

/// The `abi` object of a module, as served by the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveModuleAbi {
    pub address: String,
    pub name: String,
    #[serde(default)]
    pub friends: Vec<String>,
    pub exposed_functions: Vec<MoveFunction>,
    pub structs: Vec<MoveStruct>,
}

/// Extract the ABI from a `GET accounts/{address}/module/{module}` response
///
/// # Errors
///
/// Returns [`GenerateError::MissingAbi`] if the `abi` field is absent or
/// empty, or a JSON error if it does not have the expected shape.
pub fn parse_module_response(response: &Value) -> Result<MoveModuleAbi, GenerateError> {
    let abi = match response.get("abi") {
        Some(Value::Object(map)) if !map.is_empty() => Value::Object(map.clone()),
        _ => return Err(GenerateError::MissingAbi),
    };
    Ok(serde_json::from_value(abi)?)
}

/// Where module ABIs come from
pub trait AbiSource {
    /// Fetch the current ABI of the module
    fn fetch(&self) -> Result<MoveModuleAbi, GenerateError>;

    /// Human-readable origin, for progress output
    fn describe(&self) -> String;
}

/// Fetches the ABI from a fullnode over HTTP
#[cfg(feature = "rest")]
#[derive(Debug, Clone)]
pub struct HttpAbiSource {
    url: String,
}

#[cfg(feature = "rest")]
impl HttpAbiSource {
    #[must_use]
    pub fn new(url: String) -> Self {
        Self { url }
    }

    /// Module endpoint of the contract in `config`
    #[must_use]
    pub fn from_config(config: &crate::config::NodeConfig) -> Self {
        Self::new(config.module_url())
    }
}

#[cfg(feature = "rest")]
impl AbiSource for HttpAbiSource {
    fn fetch(&self) -> Result<MoveModuleAbi, GenerateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| GenerateError::Fetch(e.to_string()))?;

        let response: Value = client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::json)
            .map_err(|e| GenerateError::Fetch(e.to_string()))?;

        parse_module_response(&response)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Header values written into every artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMeta {
    pub address: String,
    pub module: String,
    pub network: String,
}

/// Target ecosystem of a generated source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Rust,
    TypeScript,
}

impl ArtifactKind {
    #[must_use]
    pub fn render(self, abi: &MoveModuleAbi, meta: &ArtifactMeta) -> String {
        match self {
            Self::Rust => render_rust(abi, meta),
            Self::TypeScript => render_typescript(abi, meta),
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rust => write!(f, "Rust"),
            Self::TypeScript => write!(f, "TypeScript"),
        }
    }
}

/// A source file to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// What a generation run managed to write
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub written: Vec<Artifact>,
    pub failed: Vec<(Artifact, GenerateError)>,
}

impl GenerationReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Process exit status of a generation run
///
/// `0` only when the ABI was fetched and every artifact was written.
#[must_use]
pub fn exit_status(result: &Result<GenerationReport, GenerateError>) -> u8 {
    match result {
        Ok(report) if report.is_complete() => 0,
        _ => 1,
    }
}

/// Fetch the ABI and write every artifact
///
/// # Errors
///
/// Returns the fetch error without writing anything if the ABI cannot be
/// fetched. Write failures are collected in the report instead.
pub fn generate<S: AbiSource + ?Sized>(
    source: &S,
    artifacts: &[Artifact],
    meta: &ArtifactMeta,
) -> Result<GenerationReport, GenerateError> {
    let abi = source.fetch()?;
    info!(
        module = %abi.name,
        functions = abi.exposed_functions.len(),
        structs = abi.structs.len(),
        "fetched module ABI"
    );

    let mut report = GenerationReport::default();
    for artifact in artifacts {
        let contents = artifact.kind.render(&abi, meta);
        match write_artifact(&artifact.path, &contents) {
            Ok(()) => {
                info!(kind = %artifact.kind, path = %artifact.path.display(), "artifact written");
                report.written.push(artifact.clone());
            }
            Err(err) => {
                warn!(kind = %artifact.kind, error = %err, "artifact not written");
                report.failed.push((artifact.clone(), err));
            }
        }
    }
    Ok(report)
}

fn write_artifact(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let to_error = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, contents).map_err(to_error)
}

/// Name of the descriptor constant in the generated Rust module
///
/// Fixed, because the crate imports it from `truepass_abi` whatever module
/// the file was generated from.
pub const RUST_ABI_CONST: &str = "TRUEPASS_ABI";

/// Line buffer for rendered sources
#[derive(Default)]
struct Lines(String);

impl Lines {
    fn push(&mut self, line: impl AsRef<str>) {
        self.0.push_str(line.as_ref());
        self.0.push('\n');
    }

    fn blank(&mut self) {
        self.0.push('\n');
    }
}

/// Rust helper functions: doc line, signature, return type, descriptor call
const RUST_HELPERS: [(&str, &str, &str, &str); 4] = [
    (
        "Get function definition by name",
        "get_function_by_name(name: &str)",
        "Option<&'static FunctionDescription>",
        "function(name)",
    ),
    (
        "Get struct definition by name",
        "get_struct_by_name(name: &str)",
        "Option<&'static RecordTypeDescription>",
        "record_type(name)",
    ),
    (
        "Get all view functions",
        "get_view_functions()",
        "Vec<&'static FunctionDescription>",
        "view_functions()",
    ),
    (
        "Get all entry functions",
        "get_entry_functions()",
        "Vec<&'static FunctionDescription>",
        "entry_functions()",
    ),
];

/// Render the ABI as a Rust module built on [`crate::descriptor`] types
#[must_use]
pub fn render_rust(abi: &MoveModuleAbi, meta: &ArtifactMeta) -> String {
    let mut out = Lines::default();

    out.push(format!("// Auto-generated ABI for {} contract", meta.module));
    out.push(format!("// Generated from: {}", meta.address));
    out.push(format!("// Network: {}", meta.network));
    out.push("//");
    out.push("// Regenerate with `cargo run --bin gen-abi`; do not edit by hand.");
    out.blank();
    out.push(format!("//! Interface of the `{}` module", meta.module));
    out.blank();

    let has_generics = abi
        .exposed_functions
        .iter()
        .any(|f| !f.generic_type_params.is_empty())
        || abi.structs.iter().any(|s| !s.generic_type_params.is_empty());
    let has_fields = abi.structs.iter().any(|s| !s.fields.is_empty());

    let mut imports = Vec::new();
    if has_fields {
        imports.push("FieldDescription");
    }
    imports.push("FunctionDescription");
    if has_generics {
        imports.push("GenericTypeParam");
    }
    imports.push("InterfaceDescriptor");
    imports.push("RecordTypeDescription");
    out.push("use crate::descriptor::{");
    out.push(format!("    {},", imports.join(", ")));
    out.push("};");
    out.blank();

    out.push(format!("pub const CONTRACT_ADDRESS: &str = {:?};", meta.address));
    out.push(format!("pub const MODULE_NAME: &str = {:?};", meta.module));
    out.blank();

    out.push(format!(
        "pub const {RUST_ABI_CONST}: InterfaceDescriptor = InterfaceDescriptor {{"
    ));
    out.push("    address: CONTRACT_ADDRESS,");
    out.push("    name: MODULE_NAME,");
    out.push(format!("    friends: {},", rust_str_slice(&abi.friends)));

    if abi.exposed_functions.is_empty() {
        out.push("    exposed_functions: &[],");
    } else {
        out.push("    exposed_functions: &[");
        for function in &abi.exposed_functions {
            out.push("        FunctionDescription {");
            out.push(format!("            name: {:?},", function.name));
            out.push(format!("            visibility: {:?},", function.visibility));
            out.push(format!("            is_entry: {},", function.is_entry));
            out.push(format!("            is_view: {},", function.is_view));
            out.push(format!(
                "            generic_type_params: {},",
                rust_generic_params(&function.generic_type_params)
            ));
            out.push(format!("            params: {},", rust_str_slice(&function.params)));
            out.push(format!("            returns: {},", rust_str_slice(&function.returns)));
            out.push("        },");
        }
        out.push("    ],");
    }

    if abi.structs.is_empty() {
        out.push("    structs: &[],");
    } else {
        out.push("    structs: &[");
        for record in &abi.structs {
            out.push("        RecordTypeDescription {");
            out.push(format!("            name: {:?},", record.name));
            out.push(format!("            is_native: {},", record.is_native));
            out.push(format!("            is_event: {},", record.is_event));
            out.push(format!("            abilities: {},", rust_str_slice(&record.abilities)));
            out.push(format!(
                "            generic_type_params: {},",
                rust_generic_params(&record.generic_type_params)
            ));
            if record.fields.is_empty() {
                out.push("            fields: &[],");
            } else {
                out.push("            fields: &[");
                for field in &record.fields {
                    out.push(format!(
                        "                FieldDescription {{ name: {:?}, type_name: {:?} }},",
                        field.name, field.type_name
                    ));
                }
                out.push("            ],");
            }
            out.push("        },");
        }
        out.push("    ],");
    }
    out.push("};");

    for (doc, signature, returns, call) in RUST_HELPERS {
        out.blank();
        out.push(format!("/// {doc}"));
        out.push("#[must_use]");
        out.push(format!("pub fn {signature} -> {returns} {{"));
        out.push(format!("    {RUST_ABI_CONST}.{call}"));
        out.push("}");
    }
    out.0
}

fn rust_str_slice(items: &[String]) -> String {
    if items.is_empty() {
        return "&[]".to_string();
    }
    let quoted: Vec<String> = items.iter().map(|item| format!("{item:?}")).collect();
    format!("&[{}]", quoted.join(", "))
}

fn rust_generic_params(params: &[MoveGenericTypeParam]) -> String {
    if params.is_empty() {
        return "&[]".to_string();
    }
    let rendered: Vec<String> = params
        .iter()
        .map(|p| {
            format!(
                "GenericTypeParam {{ constraints: {} }}",
                rust_str_slice(&p.constraints)
            )
        })
        .collect();
    format!("&[{}]", rendered.join(", "))
}

/// Render the ABI as a TypeScript module with an `as const` literal
#[must_use]
pub fn render_typescript(abi: &MoveModuleAbi, meta: &ArtifactMeta) -> String {
    // Serializing these plain structs cannot fail
    let literal = serde_json::to_string_pretty(abi).unwrap_or_default();

    format!(
        r#"// Auto-generated ABI for {module} contract
// Generated from: {address}
// Network: {network}

export const ABI = {literal} as const;

// Helper constants
export const CONTRACT_ADDRESS = "{address}";
export const MODULE_NAME = "{module}";

// Type definitions
export type ABIFunction = typeof ABI.exposed_functions[number];
export type ABIStruct = typeof ABI.structs[number];

// Helper functions
export function getFunctionByName(name: string): ABIFunction | undefined {{
  return ABI.exposed_functions.find(func => func.name === name);
}}

export function getStructByName(name: string): ABIStruct | undefined {{
  return ABI.structs.find(struct => struct.name === name);
}}

export function getViewFunctions(): ABIFunction[] {{
  return ABI.exposed_functions.filter(func => func.is_view);
}}

export function getEntryFunctions(): ABIFunction[] {{
  return ABI.exposed_functions.filter(func => func.is_entry);
}}
"#,
        module = meta.module,
        address = meta.address,
        network = meta.network,
    )
}
