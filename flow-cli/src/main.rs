//! flow-cli - Command line tool for annual and monthly streamflow statistics.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "flow-cli",
    version,
    about = "Descriptive hydrologic statistics from USGS daily discharge records"
)]
struct Cli {
    #[command(subcommand)]
    command: flow_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    flow_cmd::run(cli.command)
}
