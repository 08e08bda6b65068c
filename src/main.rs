//! API server entry point.
//!
//! ```text
//! CLI flags + environment + optional TOML file
//!     → Settings (validated, immutable, Arc-shared)
//!     → structured logging on stdout
//!     → HTTP server until SIGINT/SIGTERM
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use expert_api::config::load_from_env;
use expert_api::lifecycle::startup;
use expert_api::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "expert-api", version, about = "Correlated, structured-logging HTTP API")]
struct Cli {
    /// Path to a TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Settings errors surface before anything binds.
    let mut settings = load_from_env(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }

    init_logging(&settings)?;

    startup::run(Arc::new(settings)).await?;
    Ok(())
}
