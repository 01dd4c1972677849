//! blt-pa11y - run pa11y accessibility tests for a project
//!
//! Provisions pa11y configuration into a project, installs pa11y through
//! npm and runs it against every configured URL.

use clap::Parser;
use blt_pa11y::commands::{Commands, GlobalOptions};
use blt_pa11y::{cli, common::logging};

#[derive(Parser)]
#[command(name = "blt-pa11y", about = "Run pa11y accessibility tests")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.global.verbose);

    if let Err(e) = cli::dispatch(cli.command, &cli.global).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
