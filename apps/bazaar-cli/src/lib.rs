//! # Bazaar CLI Library
//!
//! Session and cart stores, the commands built on them, and the CLI runner.
//!
//! ## Module Organization
//! ```text
//! bazaar_cli/
//! ├── lib.rs          ◄─── You are here (tracing, runtime, run)
//! ├── cli.rs          ◄─── clap definitions and dispatch
//! ├── state/
//! │   ├── session.rs  ◄─── SessionStore (token + user)
//! │   ├── cart.rs     ◄─── CartStore (local cart)
//! │   ├── config.rs   ◄─── ConfigState (read-only)
//! │   └── registry.rs ◄─── Stores registry
//! ├── commands/       ◄─── session, product, cart, bag, doctor
//! └── error.rs        ◄─── AppError returned by every command
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing (stderr, RUST_LOG or "bazaar=info,sqlx=warn")   │
//! │  2. Parse the command line                                             │
//! │  3. Resolve config: defaults → config.toml → BAZAAR_* env → flags      │
//! │  4. Open storage (SQLite file, or memory with --memory)                │
//! │  5. Restore session, load cart                                         │
//! │  6. Run the command, print JSON to stdout                              │
//! │     errors print as {"code", "message", "navigation"?}, exit code 1    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::AppResult;
use state::Stores;

/// Parses arguments, runs one command and reports the outcome.
pub fn run() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_cli(cli)) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = ?err.code, "Command failed: {}", err.message);
            match cli::to_json(&err) {
                Ok(json) => println!("{}", json),
                Err(_) => println!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: Cli) -> AppResult<String> {
    let config = cli.config_state()?;
    info!(api_url = %config.api_url, "Starting Bazaar client");

    let stores = Stores::open(config).await?;
    let result = cli::execute(&stores, cli.command).await;
    stores.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bazaar_api=trace` - Trace HTTP traffic only
/// - Default: `bazaar=info,sqlx=warn`
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bazaar=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

