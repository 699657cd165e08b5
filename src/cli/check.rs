//! Check subcommand: parse a configuration and report the outcome.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the check subcommand
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Print the error as JSON instead of a single line
    #[arg(long)]
    pub json: bool,
}
