//! CLI tool for searching a PDF for a list of terms

use clap::{Parser, ValueEnum};
use pdf_term_search::{load_terms, search_pdf_with_options, SearchOptions};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "pdf-search")]
#[command(version, about = "Find terms in a PDF and report matched lines with headings and remarks", long_about = None)]
struct Cli {
    /// Input PDF file
    pdf: PathBuf,

    /// Text file with one search term per line
    terms: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Heading lines kept per page
    #[arg(long, default_value_t = 3)]
    heading_lines: usize,

    /// Search pages one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum Format {
    Markdown,
    Json,
    Text,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let terms = match load_terms(&cli.terms) {
        Ok(terms) => terms,
        Err(e) => {
            eprintln!("Error reading terms from {}: {}", cli.terms.display(), e);
            process::exit(1);
        }
    };

    let options = SearchOptions {
        heading_lines: cli.heading_lines,
        parallel: !cli.sequential,
        ..Default::default()
    };

    let report = match search_pdf_with_options(&cli.pdf, &terms, &options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match cli.format {
        Format::Markdown => print!("{}", report.to_markdown()),
        Format::Text => print!("{}", report.to_text()),
        Format::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    }

    if cli.format != Format::Json {
        eprintln!("{}", report.summary());
    }
}
