use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Validate a file of tenor strings, one per line.
///
/// Blank lines and lines starting with `#` are skipped.
#[derive(Parser)]
#[command(name = "tenor_corpus")]
struct Args {
    file: PathBuf,

    /// Write a JSON report of every rejected line to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Serialize)]
struct Rejection<'a> {
    line: usize,
    input: &'a str,
    #[serde(skip)]
    parse_error: tenor::ParseError,
    error: String,
    start: usize,
    end: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let corpus = fs::read_to_string(&args.file)?;

    let lines: Vec<(usize, &str)> = corpus
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();
    println!("Checking {} tenors from {}", lines.len(), args.file.display());

    let accepted = AtomicUsize::new(0);
    let start = Instant::now();

    let mut rejections: Vec<Rejection<'_>> = lines
        .par_iter()
        .filter_map(|&(line, input)| match tenor::parse(input) {
            Ok(_) => {
                accepted.fetch_add(1, Ordering::Relaxed);
                None
            }
            Err(err) => Some(Rejection {
                line,
                input,
                parse_error: err,
                error: err.kind.to_string(),
                start: err.span.start,
                end: err.span.end,
            }),
        })
        .collect();
    rejections.sort_by_key(|rejection| rejection.line);

    let elapsed = start.elapsed();

    for rejection in &rejections {
        println!(
            "line {}:\n{}",
            rejection.line,
            rejection.parse_error.to_human_readable(rejection.input.as_bytes())
        );
    }

    println!("Accepted: {}", accepted.load(Ordering::Relaxed));
    println!("Rejected: {}", rejections.len());
    println!("Time: {:?}", elapsed);

    if let Some(path) = &args.report {
        fs::write(path, serde_json::to_string_pretty(&rejections)?)?;
        println!("Report written to {}", path.display());
    }

    if !rejections.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
