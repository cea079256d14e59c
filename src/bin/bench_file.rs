use pprof::protos::Message;
use std::env;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::time::{Duration, Instant};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file>", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let corpus = fs::read_to_string(path)?;
    let inputs: Vec<&str> = corpus
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let bytes: usize = inputs.iter().map(|input| input.len()).sum();

    println!("Benchmarking: {}", path);
    println!("Tenors: {} ({:.2} KB)", inputs.len(), bytes as f64 / 1024.0);

    println!("Warming up...");
    for _ in 0..50 {
        for input in &inputs {
            let _ = std::hint::black_box(tenor::parse(input));
        }
    }

    let iterations = 200;
    println!("Running {} iterations...", iterations);

    let guard = pprof::ProfilerGuardBuilder::default()
        .frequency(1000)
        .blocklist(&["libc", "libgcc", "pthread", "vdso"])
        .build()?;

    let start = Instant::now();

    let mut accepted = 0usize;
    for _ in 0..iterations {
        for input in &inputs {
            if std::hint::black_box(tenor::parse(input)).is_ok() {
                accepted += 1;
            }
        }
    }

    let duration = start.elapsed();

    if let Ok(report) = guard.report().build() {
        let profile = report.pprof()?;
        let mut content = Vec::new();
        profile.write_to_vec(&mut content)?;
        File::create("profile.pb")?.write_all(&content)?;
        println!("Profile written to profile.pb");

        report.flamegraph(File::create("flamegraph.svg")?)?;
        println!("Flamegraph written to flamegraph.svg");
    };

    let parses = inputs.len() * iterations;
    let avg_time = average_per_parse(duration, parses);
    let throughput = (bytes as f64 * iterations as f64) / duration.as_secs_f64() / 1_024.0 / 1_024.0;

    println!("Accepted: {} of {}", accepted, parses);
    println!("Total time: {:?}", duration);
    println!("Average time per tenor: {:?}", avg_time);
    println!("Throughput: {:.2} MB/s", throughput);
    Ok(())
}

fn average_per_parse(total: Duration, parses: usize) -> Duration {
    total.div_f64(parses.max(1) as f64)
}
