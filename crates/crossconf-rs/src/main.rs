//! Command-line checker for a directory of configuration files.

use anyhow::Result;
use clap::Parser;
use crossconf_rs::protocol::{AggregateError, ErrorPolicy};
use crossconf_rs::{ALL_PASSED_MESSAGE, check_directory, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "crossconf", version)]
struct Cli {
    /// Directory containing the configuration files
    dir: PathBuf,
    /// Stop at the first failing file or rule
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();
    let policy = if cli.fail_fast {
        ErrorPolicy::FailFast
    } else {
        ErrorPolicy::Accumulate
    };

    let errors = check_directory(&cli.dir, policy)?;
    if errors.is_empty() {
        println!("{ALL_PASSED_MESSAGE}");
        return Ok(ExitCode::SUCCESS);
    }
    println!("{}", AggregateError::new(errors));
    Ok(ExitCode::FAILURE)
}
