//! Command-line shell for the vigil log validator.
//!
//! Loads a rule catalog, decodes a record stream from a file or stdin,
//! drives the validator with real-time alerts, and renders the final
//! report to the console and optionally to a JSON file.

mod alerts;
mod decoder;
mod reporter;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use vigil_eval::{RuleEngine, Validator};
use vigil_rules::load_rules_file;

use crate::alerts::AlertPrinter;
use crate::decoder::RecordStream;
use crate::reporter::Reporter;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Validate structured log streams against declarative rule sets")]
#[command(version)]
struct Cli {
    /// Path to the input log file (JSON array or JSONL)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to the rules file (JSON or YAML)
    #[arg(short, long)]
    rules: PathBuf,

    /// Write the full JSON report to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read records from stdin instead of a file
    #[arg(long)]
    stream: bool,

    /// Show detailed violation information and decode warnings
    #[arg(short, long)]
    verbose: bool,

    /// Suppress real-time alerts (only show the final report)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Maximum violations to show in the console summary
    #[arg(long, default_value_t = 10)]
    max_violations: usize,
}

fn main() {
    let cli = Cli::parse();
    process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let input = match (cli.input, cli.stream) {
        (None, false) => {
            eprintln!("Error: either --input or --stream must be specified");
            return 1;
        }
        (Some(_), true) => {
            eprintln!("Error: cannot use both --input and --stream");
            return 1;
        }
        (input, _) => input,
    };

    if cli.verbose {
        // Surface the engine's fail-open diagnostics on stderr.
        tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    let stdout_colors = !cli.no_color && io::stdout().is_terminal();
    let stderr_colors = !cli.no_color && io::stderr().is_terminal();

    let rules = match load_rules_file(&cli.rules) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error loading rules from {}: {e}", cli.rules.display());
            return 1;
        }
    };
    let rules_source = cli.rules.display().to_string();

    let mut printer = AlertPrinter::new(stderr_colors, cli.verbose, cli.quiet);
    let mut validator = Validator::new(RuleEngine::new(rules))
        .on_violation(move |violation| {
            printer.alert(violation);
        });

    let (mut records, input_source): (RecordStream, String) = match input {
        Some(path) => match decoder::decode_file(&path, cli.verbose) {
            Ok(stream) => (stream, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                return 1;
            }
        },
        None => match decoder::decode_reader(io::stdin().lock(), cli.verbose) {
            Ok(stream) => (stream, "stdin".to_string()),
            Err(e) => {
                eprintln!("Error reading stdin: {e}");
                return 1;
            }
        },
    };

    println!("\nValidating logs from: {input_source}");
    println!("Using rules from: {rules_source}");
    println!("{}", "-".repeat(40));

    // Pull one record at a time; alerts fire from the violation listener.
    while let Some(record) = records.next() {
        validator.process(record);
    }
    if records.skipped() > 0 {
        eprintln!("Warning: skipped {} malformed line(s)", records.skipped());
    }

    let report = validator.finalize(&rules_source, &input_source);

    let reporter = Reporter::new(stdout_colors, cli.max_violations);
    if let Err(e) = reporter.print_summary(&report, &mut io::stdout().lock()) {
        eprintln!("Error writing summary: {e}");
        return 1;
    }
    if let Some(output) = &cli.output {
        if let Err(e) = reporter.write_json(&report, output) {
            eprintln!("Error writing report to {}: {e}", output.display());
            return 1;
        }
        println!("Report written to: {}", output.display());
    }

    if report.summary.total_violations > 0 {
        1
    } else {
        0
    }
}
