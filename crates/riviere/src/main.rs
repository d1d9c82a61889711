//! # riviere
//!
//! Riviere - Component data-flow diagrams from extracted UI facts.
//!
//! The CLI consumes what a framework extractor serialized (one
//! `ComponentAnalysis` as JSON) and emits the data-flow diagram as JSON or
//! text. Parsing source dialects is the extractor's business, not ours.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "riviere")]
#[command(about = "Component data-flow diagrams from extracted UI facts", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a data-flow diagram from extracted component facts
    #[command(visible_alias = "confluent")]
    Analyze(commands::analyze::AnalyzeArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
    };
    std::process::exit(exit_code);
}
