use std::process::ExitCode;

use tracing::error;

/// Argument parsing and tracing setup.
mod cli;
/// One module per subcommand.
mod commands;
/// Tracing subscriber installation.
mod logging;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("appconf failed: {}", e);
            ExitCode::FAILURE
        },
    }
}
