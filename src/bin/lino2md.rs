//! Lino to Markdown Converter
//!
//! A simple CLI tool to convert Links Notation benchmark reports to Markdown format.
//!
//! Usage:
//!   lino2md input.lino [output.md]
//!
//! If output is not specified, prints to stdout.

use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use sort_shootout::lino_report::parse_lino_report;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        let program = args.first().map(String::as_str).unwrap_or("lino2md");
        eprintln!("Usage: {} <input.lino> [output.md]", program);
        eprintln!();
        eprintln!("Converts a Links Notation benchmark report to Markdown format.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  input.lino    Path to the Links Notation report file");
        eprintln!("  output.md     Optional output path (prints to stdout if not specified)");
        return ExitCode::FAILURE;
    }

    let input_path = Path::new(&args[1]);

    let content = match fs::read_to_string(input_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading input file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = match parse_lino_report(&content) {
        Some(r) => r,
        None => {
            eprintln!("Error: Could not parse the Links Notation report");
            eprintln!("Make sure the file contains valid benchmark data");
            return ExitCode::FAILURE;
        }
    };

    if let Some(output) = args.get(2) {
        let output_path = Path::new(output);
        match report.save_markdown(output_path) {
            Ok(()) => println!("Markdown report written to: {}", output_path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report.to_markdown_table());
    }

    ExitCode::SUCCESS
}
