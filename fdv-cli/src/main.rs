//! FDV CLI - command line access to the flood data pipeline.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "fdv-cli",
    version,
    about = "India flood event inventory toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: fdv_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting fdv-cli");
    fdv_cmd::run(cli.command)
}
