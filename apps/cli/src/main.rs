use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quillpad_search::{DocumentSearcher, SearchDirection, SearchMode, SearchOptions};
use quillpad_text::{Cursor, Document};

#[derive(Parser)]
#[command(
    name = "quillpad-cli",
    about = "Utility commands for the QuillPad editor",
    author,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a pattern across files.
    Find(FindArgs),
}

#[derive(Args)]
struct FindArgs {
    /// Pattern to search for (literal or regex).
    pattern: String,

    /// Files to search.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Interpret pattern as regex.
    #[arg(long)]
    regex: bool,

    /// Case sensitive search.
    #[arg(long)]
    case_sensitive: bool,

    /// Match whole words only.
    #[arg(long)]
    whole_word: bool,

    /// Scan from the end of each file towards the start.
    #[arg(long)]
    backward: bool,

    /// Print only the total number of hits.
    #[arg(long)]
    count: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli { command } = Cli::parse();
    match command {
        Commands::Find(args) => execute_find(args),
    }
}

fn execute_find(args: FindArgs) -> Result<()> {
    let mut options = SearchOptions::new(args.pattern);
    if args.regex {
        options.mode = SearchMode::Regex;
    }
    options.case_sensitive = args.case_sensitive;
    options.whole_word = args.whole_word;
    if args.backward {
        options.direction = SearchDirection::Backward;
    }

    let mut results = Vec::new();
    let mut total = 0usize;
    for path in &args.files {
        let doc = Document::from_file(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let matches = enumerate_matches(&doc, &options);
        total += matches.len();
        if !matches.is_empty() {
            results.push((path.clone(), doc, matches));
        }
    }

    if args.count {
        println!("{total}");
        return Ok(());
    }
    if results.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    println!(
        "Search \"{}\" ({} hits in {} files)",
        options.pattern,
        total,
        results.len()
    );
    for (path, doc, matches) in &results {
        println!("  {} ({} hits)", path.display(), matches.len());
        for m in matches {
            let block = doc.block_at(m.selection_start());
            let line = block + 1;
            let column = m.selection_start() - doc.block_start(block) + 1;
            println!("    Line {} (Col {}): {}", line, column, doc.block_text(block));
        }
    }
    Ok(())
}

/// Walks the document with repeated single-shot finds, the same way the
/// editor's next/previous buttons do. Matches come back in scan order, so
/// a backward scan lists them last first.
fn enumerate_matches(doc: &Document, options: &SearchOptions) -> Vec<Cursor> {
    let searcher = DocumentSearcher::new(doc);
    let mut matches = Vec::new();
    let mut from = match options.direction {
        SearchDirection::Forward => Cursor::collapsed(0),
        SearchDirection::Backward => Cursor::collapsed(doc.len()),
    };
    while let Some(m) = searcher.find(options, from) {
        from = match options.direction {
            SearchDirection::Forward => Cursor::collapsed(m.selection_end()),
            SearchDirection::Backward => Cursor::collapsed(m.selection_start()),
        };
        matches.push(m);
    }
    matches
}
