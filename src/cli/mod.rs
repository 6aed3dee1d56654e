//! # CLI Module
//!
//! Command-line entry point for the review analyzer.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Seed the store from the CSV dataset and serve the review endpoint:
//!
//! ```bash
//! review-analyzer serve --port 8000 --data data/reviews.csv
//! ```
//!
//! Options:
//! - `--port <PORT>` - Port to listen on (default: `PORT` or `8000`)
//! - `--host <HOST>` - Interface to bind (default: `REVIEWS_BIND_HOST` or `0.0.0.0`)
//! - `--data <FILE>` - CSV dataset to load (default: `REVIEWS_DATA_PATH` or `data/reviews.csv`)
//!
//! Running with no subcommand is the same as `serve` with no flags.
//! The server runs until SIGINT or SIGTERM.
//!
//! ### `score`
//!
//! Print the lexicon sentiment score for a piece of text as JSON:
//!
//! ```bash
//! review-analyzer score "The staff were wonderful!"
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands, ServeArgs};
