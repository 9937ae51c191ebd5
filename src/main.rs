use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::warn;

use gherkin_reporter::formatter::{EventIndex, ProgressFormatter, RunEvent};
use gherkin_reporter::report;

#[derive(Parser)]
#[command(name = "gherkin-reporter")]
#[command(version = "0.1.0")]
#[command(about = "Live progress and PR report generation for Gherkin test runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a finished run and write the Markdown PR comment
    Summarize {
        /// Path to the persisted result document (JSON)
        results: PathBuf,

        /// Output file path (defaults to the fixed comment location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render live progress from an NDJSON event stream
    Follow {
        /// Event stream file; reads stdin when omitted
        events: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize { results, output } => {
            println!(
                "{} Summarizing results from: {}",
                "📊".blue(),
                results.display()
            );
            let summary = report::generate_report(&results, output.as_deref())?;

            let verdict = if summary.failed_scenarios > 0 {
                "FAILED".red().bold()
            } else {
                "PASSED".green().bold()
            };
            println!("\n{} Test run {}", "■".blue().bold(), verdict);
            println!(
                "  Scenarios: {} total, {} passed, {} failed, {} skipped",
                summary.total_scenarios,
                summary.passed_scenarios.to_string().green(),
                summary.failed_scenarios.to_string().red(),
                summary.skipped_scenarios.to_string().yellow()
            );
            println!(
                "  Steps: {} total, {} passed, {} failed, {} skipped",
                summary.total_steps,
                summary.passed_steps.to_string().green(),
                summary.failed_steps.to_string().red(),
                summary.skipped_steps.to_string().yellow()
            );
            println!(
                "  Duration: {}",
                report::format_duration(summary.duration_nanos)
            );
        }

        Commands::Follow { events } => match events {
            Some(path) => {
                let file = File::open(&path)?;
                follow(BufReader::new(file))?;
            }
            None => follow(io::stdin().lock())?,
        },
    }

    Ok(())
}

/// Replay an NDJSON event stream through the progress formatter. Display
/// names are indexed from the stream itself, so lookups resolve as long as
/// the engine emitted them; malformed lines are skipped.
fn follow<R: BufRead>(reader: R) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut formatter = ProgressFormatter::new(stdout.lock());
    let mut index = EventIndex::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: RunEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(err) => {
                warn!("skipping malformed event line: {}", err);
                continue;
            }
        };
        index.observe(&event);
        formatter.handle(&event, &index)?;
    }

    Ok(())
}
