mod annotation;
mod batch;
mod config;
mod datetime;
mod entities;
mod error;
mod extract;
mod lexicon;
mod location;
mod resolver;
mod rules;
mod task;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use batch::Shape;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use extract::TaskExtractor;
use resolver::RuleResolver;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = config::APP_NAME,
    version = config::APP_VERSION,
    about = "Turn task sentences into structured scheduling records"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract one sentence and print the record as JSON
    Extract {
        /// Task sentence; several arguments are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,
        /// Emit the legacy shape (priority and description, no end time)
        #[arg(long)]
        legacy: bool,
        /// Day that relative dates are resolved against (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        reference_date: Option<NaiveDate>,
    },
    /// Process a batch file, or every *.json in a directory
    Batch {
        /// Batch file or directory of batch files
        #[arg(default_value = config::DEFAULT_INPUT)]
        input: PathBuf,
        /// Output file, or output directory for a directory input
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[arg(long)]
        legacy: bool,
        #[arg(long, value_name = "YYYY-MM-DD")]
        reference_date: Option<NaiveDate>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Extract {
            text,
            legacy,
            reference_date,
        }) => run_extract(&text.join(" "), legacy, reference_date),
        Some(Command::Batch {
            input,
            output,
            legacy,
            reference_date,
        }) => run_batch(&input, output, legacy, reference_date),
        // Default: input.json → output.json in the working directory
        None => run_batch(Path::new(config::DEFAULT_INPUT), None, false, None),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn make_extractor(
    reference_date: Option<NaiveDate>,
) -> TaskExtractor<&'static rules::RuleAnnotator, RuleResolver> {
    let resolver = reference_date.map_or_else(RuleResolver::today, RuleResolver::new);
    debug!(reference = %resolver.reference(), "resolving relative dates");
    TaskExtractor::new(rules::shared(), resolver)
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: one sentence → stdout
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(text: &str, legacy: bool, reference_date: Option<NaiveDate>) -> ExitCode {
    let extractor = make_extractor(reference_date);
    let json = if legacy {
        serde_json::to_string_pretty(&extractor.extract_legacy(text))
    } else {
        serde_json::to_string_pretty(&extractor.extract(text))
    };
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "cannot serialize record");
            ExitCode::FAILURE
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  BATCH MODE: file → file, or directory → directory
// ═══════════════════════════════════════════════════════════════════════

fn run_batch(
    input: &Path,
    output: Option<PathBuf>,
    legacy: bool,
    reference_date: Option<NaiveDate>,
) -> ExitCode {
    let extractor = make_extractor(reference_date);
    let shape = if legacy { Shape::Legacy } else { Shape::Full };

    if input.is_dir() {
        let output = output.unwrap_or_else(|| PathBuf::from(config::DEFAULT_OUTPUT_DIR));
        return match batch::process_dir(&extractor, input, &output, shape) {
            Ok(summary) if summary.failed.is_empty() => ExitCode::SUCCESS,
            Ok(summary) => {
                error!(failed = summary.failed.len(), "some batch files failed");
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(error = %e, "batch failed");
                ExitCode::FAILURE
            }
        };
    }

    let output = output.unwrap_or_else(|| PathBuf::from(config::DEFAULT_OUTPUT));
    match batch::process_file(&extractor, input, &output, shape) {
        Ok(summary) => {
            info!(
                processed = summary.processed,
                skipped = summary.skipped,
                "results written to {}",
                output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "batch failed");
            ExitCode::FAILURE
        }
    }
}
