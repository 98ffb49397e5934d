mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autocdl", about = "Automatic exposure/contrast CDL for S-Log3 footage")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show frame statistics, faces and scene classification
    Analyze(commands::analyze::AnalyzeArgs),
    /// Decide and write a CDL for a frame
    Grade(commands::grade::GradeArgs),
    /// Decide a CDL, grade the frame with it and flag quality problems
    Verify(commands::verify::VerifyArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Grade(args) => commands::grade::run(args),
        Commands::Verify(args) => commands::verify::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
