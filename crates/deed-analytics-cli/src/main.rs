mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::costs::CostsArgs;
use commands::flip::FlipArgs;
use commands::recommend::RecommendArgs;
use commands::risk::RiskArgs;

/// Tax-deed property investment analysis
#[derive(Parser)]
#[command(
    name = "deeda",
    version,
    about = "Tax-deed property investment analysis",
    long_about = "A CLI for analyzing tax-deed property deals with decimal precision. \
                  Computes fix-and-flip returns (ROI, annualized ROI, 70%-rule max \
                  offer), cost breakdowns, deal risk assessments, and buy/pass \
                  recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze fix-and-flip returns for a deal
    Flip(FlipArgs),
    /// Break down deal costs by category
    Costs(CostsArgs),
    /// Score deal risk factors
    Risk(RiskArgs),
    /// Produce a buy/pass recommendation
    Recommend(RecommendArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Flip(args) => commands::flip::run_flip(args),
        Commands::Costs(args) => commands::costs::run_costs(args),
        Commands::Risk(args) => commands::risk::run_risk(args),
        Commands::Recommend(args) => commands::recommend::run_recommend(args),
        Commands::Version => {
            println!("deeda {}", env!("CARGO_PKG_VERSION"));
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
