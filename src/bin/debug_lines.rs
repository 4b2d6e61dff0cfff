//! Debug tool: print fragments, reconstructed lines and headings per page
//!
//! Usage: debug_lines <pdf_file> [max_page | min-max]

use pdf_term_search::headings::{extract_heading, DEFAULT_HEADING_LINES, DEFAULT_MIN_HEADING_LEN};
use pdf_term_search::{extract_pages, reconstruct_lines};
use std::env;
use std::process;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: debug_lines <pdf_path> [max_page | min-max]");
        process::exit(1);
    }

    let range = args.get(2).map(|s| s.as_str()).unwrap_or("1-3");
    let (min_page, max_page): (u32, u32) = if let Some((a, b)) = range.split_once('-') {
        (a.parse().unwrap_or(1), b.parse().unwrap_or(3))
    } else {
        (1, range.parse().unwrap_or(3))
    };

    let pages = match extract_pages(&args[1]) {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("Error extracting text: {}", e);
            process::exit(1);
        }
    };

    for page in pages
        .iter()
        .filter(|p| p.number >= min_page && p.number <= max_page)
    {
        println!("=== PAGE {} ({} fragments) ===", page.number, page.fragments.len());
        for fragment in &page.fragments {
            println!("  x={:7.1} y={:7.1} text={:?}", fragment.x, fragment.y, fragment.text);
        }

        println!("--- heading ---");
        for line in extract_heading(&page.fragments, DEFAULT_HEADING_LINES, DEFAULT_MIN_HEADING_LEN) {
            println!("  {}", line);
        }

        println!("--- lines ---");
        for line in reconstruct_lines(&page.fragments) {
            println!("  {:4} {}", line.serial(), line.text);
        }
        println!();
    }
}
