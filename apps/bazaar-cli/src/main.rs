//! # Bazaar CLI Entry Point
//!
//! The actual setup is in lib.rs so the stores and commands stay testable.

use std::process::ExitCode;

fn main() -> ExitCode {
    bazaar_cli::run()
}
