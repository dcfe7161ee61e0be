//! # chatprep CLI
//!
//! Command-line interface for the chatprep library.

use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chatprep::cli::Args;
use chatprep::core::output::write_chunks_jsonl;
use chatprep::core::process;
use chatprep::format::{OutputFormat, write_to_format};
use chatprep::parsers::{ParseReport, WhatsAppParser};
use chatprep::{ChatprepError, Message};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatprepError> {
    let total_start = Instant::now();
    let config = args.pipeline_config()?;
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();

    println!("📦 chatprep v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", format);
    if let Some(chunks) = &args.chunks {
        println!("🧩 Chunks:  {}", chunks.display());
    }
    if args.streaming {
        println!("🌊 Mode:    Streaming");
    }
    println!();

    let (messages, report, parse_time) = if args.streaming {
        parse_streaming(&args.input)?
    } else {
        parse_regular(&args.input)?
    };
    info!(
        headers = report.header_lines,
        continuations = report.continuation_lines,
        orphans = report.orphan_lines,
        elapsed_ms = u64::try_from(parse_time.as_millis()).unwrap_or(u64::MAX),
        "parsed export"
    );

    let processed = process(messages, &config)?;
    let stats = processed.stats;
    println!("   Found {} messages", stats.retained);

    write_to_format(&processed.records, &output_path, format)?;
    println!("✅ Records saved to {}", output_path.display());

    if let Some(chunks_path) = &args.chunks {
        write_chunks_jsonl(&processed.chunks, chunks_path)?;
        println!("✅ Chunks saved to {}", chunks_path.display());
    }

    println!();
    println!("📊 Summary:");
    println!("   Parsed:         {} messages", stats.parsed);
    if config.remove_media {
        println!("   Media removed:  {} messages", stats.media_removed);
    }
    println!("   Conversations:  {}", stats.conversations);
    println!("   Chunks:         {}", stats.chunks);
    if report.orphan_lines > 0 {
        println!("   Orphan lines:   {} (before first message, dropped)", report.orphan_lines);
    }
    println!("   Total time:     {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Parse using the in-memory parser
fn parse_regular(input: &Path) -> Result<(Vec<Message>, ParseReport, Duration), ChatprepError> {
    let parse_start = Instant::now();
    let (messages, report) = WhatsAppParser::new().parse_file_with_report(input)?;
    Ok((messages, report, parse_start.elapsed()))
}

/// Parse line by line. The first error aborts, as in the batch path.
#[cfg(feature = "streaming")]
fn parse_streaming(input: &Path) -> Result<(Vec<Message>, ParseReport, Duration), ChatprepError> {
    use chatprep::streaming::WhatsAppStreamingParser;

    let parse_start = Instant::now();
    let mut iter = WhatsAppStreamingParser::new().stream(input)?;

    let mut messages = Vec::new();
    for result in iter.by_ref() {
        messages.push(result?);
    }

    if let Some(pct) = iter.progress() {
        info!(bytes = iter.bytes_processed(), progress = pct, "stream complete");
    }
    Ok((messages, iter.report(), parse_start.elapsed()))
}

#[cfg(not(feature = "streaming"))]
fn parse_streaming(_input: &Path) -> Result<(Vec<Message>, ParseReport, Duration), ChatprepError> {
    Err(ChatprepError::invalid_config(
        "streaming",
        "this build was compiled without the 'streaming' feature",
    ))
}
