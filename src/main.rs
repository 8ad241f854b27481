use anyhow::Result;
use blanklint::cli::{self, Cli};
use blanklint::telemetry;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init()?;

    // Load failures are part of the report, not the exit status.
    cli::run_stdout(&cli)?;
    Ok(())
}
