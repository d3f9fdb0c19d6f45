use clap::Parser as _;

use crate::{
    commands::{run_command, Cli},
    logging::init_tracing,
};

/// Parses arguments, installs tracing and runs the requested command.
pub async fn run() -> appconf_store::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.json, cli.verbose);

    run_command(cli.command).await
}
