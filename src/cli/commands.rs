use crate::logging::{init_logging_with_config, LogConfig};
use crate::runtime_config::RuntimeConfig;
use crate::sentiment::LexiconScorer;
use crate::server::{HttpServer, ReviewService, ServerHandle};
use crate::store::ReviewStore;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Command-line interface for the review analyzer
#[derive(Parser, Debug)]
#[command(name = "review-analyzer")]
#[command(about = "Location review service with sentiment ranking", version, long_about = None)]
pub struct Cli {
    /// The subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve the review endpoint over HTTP
    Serve(ServeArgs),

    /// Score a piece of text with the built-in lexicon
    Score {
        /// Text to score
        text: String,
    },
}

/// Flags for `serve`. Anything left unset comes from the environment.
#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// CSV dataset the store is seeded from
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

impl ServeArgs {
    /// Overlay the flags that were given onto `config`.
    #[must_use]
    pub fn apply(self, mut config: RuntimeConfig) -> RuntimeConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(data) = self.data {
            config.data_path = data;
        }
        config
    }
}

/// Execute the parsed command.
///
/// # Errors
///
/// Returns an error if logging cannot be installed, the server cannot bind,
/// or the score cannot be encoded.
pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            let _guard = init_logging_with_config(&LogConfig::from_env())?;
            serve(args.apply(RuntimeConfig::from_env()))
        }
        Commands::Score { text } => {
            let score = LexiconScorer::new().polarity_scores(&text);
            println!("{}", serde_json::to_string_pretty(&score)?);
            Ok(())
        }
    }
}

fn serve(config: RuntimeConfig) -> Result<()> {
    may::config().set_stack_size(config.stack_size);

    let store = Arc::new(ReviewStore::load(&config.data_path));
    let service = ReviewService::new(store, Arc::new(LexiconScorer::new()));

    let addr = config.bind_address();
    let handle = HttpServer(service)
        .start(addr.as_str())
        .with_context(|| format!("Failed to start server on {addr}"))?;
    info!(addr = %handle.addr(), stack_size = config.stack_size, "Review service running");

    wait_for_shutdown(handle)
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("Failed to install signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "Shutdown signal received");
    }
    handle.stop();
    info!("Server stopped");
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("Server coroutine panicked"))
}
