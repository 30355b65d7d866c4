//! Main entry point for the cvtext CLI application.
//!
//! This binary reads a resume document from disk, routes it through the
//! format dispatcher, and prints the extracted text (or a container entry
//! listing) to stdout.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use cvtext::{Cli, DecodeOutcome, FormatDispatcher, LocalHeaderScanner, SourceHint};

/// Application entry point.
///
/// Parses command-line arguments and dispatches to listing or extraction
/// based on the selected mode.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("failed to read {}", cli.file))?;

    // List mode: display container contents and exit
    if cli.list || cli.verbose {
        return list_entries(&data, cli.verbose);
    }

    process_document(&data, &cli).await
}

/// Extract text from the document and write it out.
///
/// Failures carry the decoder's reason plus a concrete remediation the user
/// can act on. Heuristically recovered text produces a warning on stderr, or
/// an error under `--strict`.
///
/// # Arguments
///
/// * `data` - The raw file content
/// * `cli` - Parsed command-line arguments
async fn process_document(data: &[u8], cli: &Cli) -> Result<()> {
    let file_name = Path::new(&cli.file)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.file.clone());

    let mut hint = SourceHint::new(file_name);
    if let Some(ref media_type) = cli.media_type {
        hint = hint.with_media_type(media_type.clone());
    }

    let dispatcher = FormatDispatcher::new();
    let outcome = match dispatcher.read_to_text(data, &hint).await {
        Ok(outcome) => outcome,
        Err(err) => bail!("{err} ({})", err.remediation()),
    };

    if let DecodeOutcome::Recovered(_) = outcome {
        if cli.strict {
            bail!("text was recovered heuristically and --strict is set");
        }
        if !cli.is_quiet() {
            eprintln!("warning: text was recovered heuristically and may be incomplete");
        }
    }

    write_output(outcome.text(), cli).await
}

/// Write the extracted text to the selected destination.
async fn write_output(text: &str, cli: &Cli) -> Result<()> {
    match cli.output {
        Some(ref path) => {
            tokio::fs::write(path, text)
                .await
                .with_context(|| format!("failed to write {path}"))?;
            if !cli.is_quiet() {
                eprintln!("extracted {} characters to {path}", text.chars().count());
            }
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
    }

    Ok(())
}

/// List the entries found in a word-processing container.
///
/// Supports two output formats:
/// - Simple format (`-l`): just entry names, one per line
/// - Verbose format (`-v`): table with sizes, method, and timestamps
fn list_entries(data: &[u8], verbose: bool) -> Result<()> {
    let entries = LocalHeaderScanner::default().scan(data);

    if entries.is_empty() {
        bail!("no container entries found; is this a word-processing document?");
    }

    if verbose {
        println!(
            "{:>10}  {:>10}  {:>8}  {:>10}  {:>5}  Name",
            "Length", "Size", "Method", "Date", "Time"
        );
        println!("{}", "-".repeat(70));
    }

    for entry in &entries {
        if verbose {
            let (year, month, day) = entry.mod_date();
            let (hour, minute, _second) = entry.mod_time();

            println!(
                "{:>10}  {:>10}  {:>8}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
                entry.uncompressed_size,
                entry.compressed_size,
                entry.compression_method.to_string(),
                year,
                month,
                day,
                hour,
                minute,
                entry.name
            );
        } else {
            println!("{}", entry.name);
        }
    }

    Ok(())
}
