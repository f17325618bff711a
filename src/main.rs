//! contract-assistant CLI
//!
//! Sends one explain or generate request to the contract backend and
//! prints the result. Results go to stdout, diagnostics to stderr.

use clap::Parser;
use contract_assistant::cli::{run_cli_mode, Args};
use contract_assistant::logging::{init_logging, LogConfig};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(LogConfig {
        verbose: args.verbose,
    }) {
        eprintln!("Warning: {}", e);
    }

    let code = run_cli_mode(args).await;
    std::process::exit(code);
}
