//! Tracing setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber
///
/// `RUST_LOG` is honored unless `verbose` forces debug output. Repeated
/// calls are ignored.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("truepass=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
