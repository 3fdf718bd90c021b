//! Regenerate the TruePass interface files from the live module ABI

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use truepass::generator::{exit_status, generate, AbiSource};
use truepass::{Artifact, ArtifactKind, ArtifactMeta, HttpAbiSource, Network, NodeConfig};

fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[derive(Parser, Debug)]
#[command(
    name = "gen-abi",
    version,
    about = "Fetch the module ABI and write Rust and TypeScript interface files"
)]
struct Cli {
    /// Path to a truepass.toml configuration file
    #[arg(short, long, env = "TRUEPASS_CONFIG")]
    config: Option<PathBuf>,

    /// Network to fetch from (mainnet, testnet, devnet, local)
    #[arg(short, long, env = "TRUEPASS_NETWORK")]
    network: Option<Network>,

    /// Account the module is published under
    #[arg(long)]
    address: Option<String>,

    /// Module name
    #[arg(long)]
    module: Option<String>,

    /// Output path of the Rust interface
    #[arg(long, default_value_os_t = project_root().join("src/truepass_abi.rs"))]
    rust_out: PathBuf,

    /// Output path of the TypeScript interface
    #[arg(long, default_value_os_t = project_root().join("front/src/utils/abi.ts"))]
    ts_out: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    truepass::logging::init(cli.verbose);

    let mut config = match NodeConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(network) = cli.network {
        config.set_network(network);
    }
    if cli.address.is_some() || cli.module.is_some() {
        let address = cli.address.unwrap_or_else(|| config.contract.address.clone());
        let module = cli.module.unwrap_or_else(|| config.contract.module.clone());
        config = config.with_contract(&address, &module);
    }

    println!("Starting ABI generation...");
    let source = HttpAbiSource::from_config(&config);
    println!("Fetching ABI from: {}", source.describe());

    let meta = ArtifactMeta {
        address: config.contract.address.clone(),
        module: config.contract.module.clone(),
        network: config.network().to_string(),
    };
    let artifacts = [
        Artifact::new(ArtifactKind::Rust, cli.rust_out),
        Artifact::new(ArtifactKind::TypeScript, cli.ts_out),
    ];

    let result = generate(&source, &artifacts, &meta);
    match &result {
        Err(e) => {
            println!("✗ {e}");
            println!("✗ Failed to fetch ABI, exiting...");
        }
        Ok(report) => {
            for artifact in &report.written {
                println!("✓ {} ABI generated: {}", artifact.kind, artifact.path.display());
            }
            for (artifact, error) in &report.failed {
                println!("✗ Failed to generate {} ABI: {error}", artifact.kind);
            }
            if report.is_complete() {
                println!("\n✓ All ABI files generated successfully!");
            } else {
                println!(
                    "\n✗ Only {}/{} files generated successfully",
                    report.written.len(),
                    report.total()
                );
            }
        }
    }

    ExitCode::from(exit_status(&result))
}
