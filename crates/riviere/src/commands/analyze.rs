//! Analyze command - build a DFD from extracted component facts.
//!
//! Input is the JSON an extractor produced: a `ComponentAnalysis`, plus an
//! optional atom-definition list from the static scanner. No type oracle is
//! reachable from the CLI; classification runs on the naming heuristic.

use clap::Args;
use riviere_amont::{AtomDefinition, ComponentAnalysis};
use riviere_confluent::{AnalyzerOptions, DfdAnalyzer};
use std::fs;
use std::path::PathBuf;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Extracted component facts (JSON produced by a framework extractor)
    pub facts: PathBuf,

    /// Atom definitions from the static scanner (JSON array)
    #[arg(long)]
    pub atoms: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: AnalyzeArgs) -> i32 {
    let facts = match fs::read_to_string(&args.facts) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", args.facts.display());
            return 1;
        }
    };
    let analysis: ComponentAnalysis = match serde_json::from_str(&facts) {
        Ok(analysis) => analysis,
        Err(err) => {
            eprintln!("error: {} is not a component analysis: {err}", args.facts.display());
            return 1;
        }
    };

    let atoms: Vec<AtomDefinition> = match &args.atoms {
        Some(path) => {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(err) => {
                    eprintln!("error: cannot read {}: {err}", path.display());
                    return 1;
                }
            };
            match serde_json::from_str(&content) {
                Ok(atoms) => atoms,
                Err(err) => {
                    eprintln!("error: {} is not an atom list: {err}", path.display());
                    return 1;
                }
            }
        }
        None => Vec::new(),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            return 1;
        }
    };

    let analyzer = DfdAnalyzer::new().with_options(AnalyzerOptions::default());
    let graph = match runtime.block_on(analyzer.analyze(&analysis, None, &atoms)) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    match args.format.as_str() {
        "json" => {
            let serialized = if args.pretty {
                serde_json::to_string_pretty(&graph)
            } else {
                serde_json::to_string(&graph)
            };
            match serialized {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: serialization failed: {err}");
                    return 1;
                }
            }
        }
        "text" => print!("{graph}"),
        other => {
            eprintln!("error: unknown format {other:?} (expected text or json)");
            return 1;
        }
    }

    0
}
