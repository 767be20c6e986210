//! ventmaze: find the cheapest route through a vent maze.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use ventmaze_lib::{Cli, run};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let all_found = run(&cli, &mut out)?;
    out.flush()?;

    Ok(if all_found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
