//! Benchmark Harness Configuration CLI
//!
//! Validates benchmark run descriptions and prints the resolved launch plan.

use anyhow::Result;
use bench_harness_config::cli::check::CheckArgs;
use bench_harness_config::cli::show::{ShowArgs, ShowFormat};
use bench_harness_config::cli::{Cli, Command};
use bench_harness_config::config::{self, ExecutionPlan};
use bench_harness_config::format::{format_json, format_markdown};
use clap::Parser;
use std::fs::OpenOptions;
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    match cli.command {
        Command::Check(args) => run_check(args),
        Command::Show(args) => run_show(args),
    }
}

fn run_check(args: CheckArgs) -> Result<ExitCode> {
    match config::parse(&args.path) {
        Ok(config) => {
            println!("ok: {} benchmark(s)", config.benchmark_count());
            config.release();
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&err.report())?);
            } else {
                eprintln!("error: {}", err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_show(args: ShowArgs) -> Result<ExitCode> {
    let config = match config::parse(&args.path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let cores = args.available_cores();
    debug!(cores, "Building launch plan");
    let plan = ExecutionPlan::build(&config, cores);

    match args.format {
        ShowFormat::Markdown => print!("{}", format_markdown(&config, &plan)),
        ShowFormat::Json => println!("{}", format_json(&config, &plan)?),
    }

    config.release();
    Ok(ExitCode::SUCCESS)
}
