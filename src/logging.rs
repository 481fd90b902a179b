//! tracing subscriber setup

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the stdout subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "pagesmith=info",
        1 => "pagesmith=debug",
        _ => "pagesmith=trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}
