mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::LoanArgs;
use commands::comparison::CompareArgs;
use commands::roce::RoceArgs;

/// Compare mortgage offers by return on capital employed
#[derive(Parser)]
#[command(
    name = "mroce",
    version,
    about = "Compare mortgage offers by return on capital employed",
    long_about = "Computes fixed-rate amortisation schedules with decimal precision and \
                  ranks loan offers by ROCE = (income - interest - fees) / down payment, \
                  under worst, expected and best yearly interest."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment for a fixed-rate loan
    Payment(LoanArgs),
    /// Yearly interest profile of a fixed-rate loan
    Interest(LoanArgs),
    /// Return on capital employed for given income and costs
    Roce(RoceArgs),
    /// Rank loan offers by expected ROCE
    Compare(CompareArgs),
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

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Interest(args) => commands::amortization::run_interest(args),
        Commands::Roce(args) => commands::roce::run_roce(args),
        Commands::Compare(args) => commands::comparison::run_compare(args),
        Commands::Version => {
            println!("mroce {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
