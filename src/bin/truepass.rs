//! Interactive menu for exercising the TruePass contract

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use truepass::{
    ContractClient, LocalAccount, Network, NodeConfig, RestClient, Shell, TRUEPASS_ABI,
};

#[derive(Parser, Debug)]
#[command(name = "truepass", version, about = "Interactive client for the TruePass contract")]
struct Cli {
    /// Path to a truepass.toml configuration file
    #[arg(short, long, env = "TRUEPASS_CONFIG")]
    config: Option<PathBuf>,

    /// Network to connect to (mainnet, testnet, devnet, local)
    #[arg(short, long, env = "TRUEPASS_NETWORK")]
    network: Option<Network>,

    /// Fullnode REST URL, overrides the network default
    #[arg(long, env = "TRUEPASS_NODE_URL")]
    node_url: Option<String>,

    /// Ed25519 private key to use instead of a fresh account
    #[arg(long, env = "TRUEPASS_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    truepass::logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config =
        NodeConfig::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(network) = cli.network {
        config.set_network(network);
    }
    if let Some(url) = &cli.node_url {
        config = config.with_node_url(url);
    }
    debug!(network = %config.network(), url = %config.node.url, "using fullnode");

    if config.contract.module != TRUEPASS_ABI.name {
        warn!(
            module = %config.contract.module,
            "configured module differs from the compiled-in interface, ignoring"
        );
    }
    let options = config.transaction;
    let address = config.contract.address.clone();
    let client = RestClient::new(config).context("Failed to create fullnode client")?;
    match client.chain_id() {
        Ok(chain_id) => debug!(chain_id, "connected to fullnode"),
        Err(e) => warn!(error = %e, "fullnode not reachable"),
    }
    let contract = ContractClient::truepass(client)
        .with_address(address)
        .with_options(options);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(contract, stdin.lock(), stdout.lock());
    if let Some(key) = &cli.private_key {
        let account = LocalAccount::from_private_key(key).context("Invalid private key")?;
        shell.set_account(account);
    }

    shell.run().context("Console I/O failed")
}
