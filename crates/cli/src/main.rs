//! confidential - resolve secret references in JSON configuration files.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Resolve and merge configuration through the shared libraries.
//! - Print the result to stdout and map failures to exit codes.
//!
//! Does NOT handle:
//! - Secret lookup or document merging (see `crates/config` and `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr so stdout carries only the merged configuration.

mod args;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use confidential_config::ConfigLoader;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
