mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::budget::SolveArgs;
use commands::rates::{InsuranceOptionsArgs, TenorsArgs};
use commands::records::RecordArgs;
use commands::simulation::SimulateArgs;

/// Vehicle financing credit simulation
#[derive(Parser)]
#[command(
    name = "vcs",
    version,
    about = "Vehicle financing credit simulation",
    long_about = "A CLI for vehicle financing credit terms with decimal precision. \
                  Computes down payment, insurance, flat interest, monthly installment \
                  and first-payment breakdowns, and solves for the down payment that \
                  meets a first-payment or installment budget."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full credit breakdown for a down-payment percentage
    Simulate(SimulateArgs),
    /// Find the down payment that meets a first-payment or installment target
    Solve(SolveArgs),
    /// List insurance products available for a vehicle and tenor
    InsuranceOptions(InsuranceOptionsArgs),
    /// List the tenors offered for a category
    Tenors(TenorsArgs),
    /// Simulate and map the result into a storable record
    Record(RecordArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulation::run_simulate(args),
        Commands::Solve(args) => commands::budget::run_solve(args),
        Commands::InsuranceOptions(args) => commands::rates::run_insurance_options(args),
        Commands::Tenors(args) => commands::rates::run_tenors(args),
        Commands::Record(args) => commands::records::run_record(args),
        Commands::Version => {
            println!("vcs {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
