//! CLI for extracting bank-statement transaction tables into CSV.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Bank-statement table extraction: OCR or vision-model input,
/// reference-exact CSV output.
#[derive(Parser)]
#[command(name = "ledgerlens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract transactions from a statement image or raw OCR text
    Extract(commands::ExtractArgs),

    /// Extract transactions via a vision-model API
    Vision(commands::VisionArgs),

    /// Compare a produced CSV against a reference file line by line
    Validate(commands::ValidateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => commands::extract(args).await,
        Commands::Vision(args) => commands::vision(args).await,
        Commands::Validate(args) => commands::validate(args),
    }
}
