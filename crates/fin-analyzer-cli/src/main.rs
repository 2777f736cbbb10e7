mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::document::AnalyzeArgs;
use commands::scoring::FieldsArgs;
use commands::toolkit::InvokeArgs;
use input::DocumentArgs;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "FINA_LOG";

/// Heuristic financial document analysis
#[derive(Parser)]
#[command(
    name = "fina",
    version,
    about = "Heuristic financial document analysis",
    long_about = "Extracts key figures (assets, liabilities, revenue, net income, equity) \
                  from financial document text or PDFs by keyword matching, computes \
                  profit margin, debt-to-equity and return on assets, and assigns a \
                  LOW/MEDIUM/HIGH risk level. Results are heuristic."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log extraction and scoring decisions to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract key financial figures from a document
    Extract(DocumentArgs),
    /// Compute profit margin, debt-to-equity and return on assets
    Ratios(FieldsArgs),
    /// Assess risk from leverage and profitability
    Risk(FieldsArgs),
    /// Render the plain-text summary report
    Report(DocumentArgs),
    /// Check whether a document looks like a financial statement
    Verify(DocumentArgs),
    /// Run the full pipeline
    Analyze(AnalyzeArgs),
    /// Run one capability on behalf of a role
    Invoke(InvokeArgs),
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

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Extract(args) => commands::document::run_extract(args),
        Commands::Ratios(args) => commands::scoring::run_ratios(args),
        Commands::Risk(args) => commands::scoring::run_risk(args),
        Commands::Report(args) => commands::document::run_report(args),
        Commands::Verify(args) => commands::document::run_verify(args),
        Commands::Analyze(args) => commands::document::run_analyze(args),
        Commands::Invoke(args) => commands::toolkit::run_invoke(args),
        Commands::Version => {
            println!("fina {}", env!("CARGO_PKG_VERSION"));
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
