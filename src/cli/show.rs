//! Show subcommand: print the resolved configuration and launch plan.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Output format: markdown (default) or json
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    pub format: ShowFormat,

    /// CPU cores to distribute over when pin_cpus is set (default: all available)
    #[arg(long, value_name = "N")]
    pub cores: Option<usize>,
}

impl ShowArgs {
    /// Number of cores used for automatic pinning.
    pub fn available_cores(&self) -> usize {
        self.cores.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Output format for the show subcommand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowFormat {
    #[default]
    Markdown,
    Json,
}

impl std::str::FromStr for ShowFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ShowFormat::Markdown),
            "json" => Ok(ShowFormat::Json),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: markdown, json",
                s
            )),
        }
    }
}
