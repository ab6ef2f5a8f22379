//! contributor-triage entry point.

use clap::Parser;

use contributor_triage::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli::execute(&cli).await {
        Ok(report) => cli::output(&report, cli.json),
        Err(err) => cli::handle_error(&err, cli.json),
    }
}
