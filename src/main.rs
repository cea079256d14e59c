use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tenor::{AddTenor, Tenor};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tenor")]
#[command(about = "Parse, compare and apply calendar tenors such as 1y6m", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse tenors and print their canonical form
    Parse {
        /// Emit a JSON array instead of text
        #[arg(long)]
        json: bool,

        #[arg(value_name = "TENOR", required = true)]
        inputs: Vec<String>,
    },
    /// Add a tenor to a date (YYYY-MM-DD)
    Add { date: NaiveDate, tenor: Tenor },
    /// Subtract a tenor from a date (YYYY-MM-DD)
    Sub { date: NaiveDate, tenor: Tenor },
    /// Compare two tenors by approximate day count, printing -1, 0 or 1
    Compare { left: Tenor, right: Tenor },
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    tenor: Option<Tenor>,
    total_days: Option<i64>,
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { json, inputs } => {
            if !run_parse(&inputs, json)? {
                std::process::exit(1);
            }
        }
        Command::Add { date, tenor } => {
            let shifted = date
                .checked_add_tenor(tenor)
                .ok_or_else(|| anyhow::anyhow!("{date} + {tenor} is out of range"))?;
            println!("{shifted}");
        }
        Command::Sub { date, tenor } => {
            let shifted = date
                .checked_sub_tenor(tenor)
                .ok_or_else(|| anyhow::anyhow!("{date} - {tenor} is out of range"))?;
            println!("{shifted}");
        }
        Command::Compare { left, right } => {
            println!("{}", Tenor::compare(&left, &right));
        }
    }

    Ok(())
}

/// Returns whether every input parsed.
fn run_parse(inputs: &[String], json: bool) -> anyhow::Result<bool> {
    let mut all_ok = true;
    let mut reports = Vec::with_capacity(inputs.len());

    for input in inputs {
        let result = tenor::parse(input);
        all_ok &= result.is_ok();

        if json {
            reports.push(match result {
                Ok(tenor) => Report {
                    input,
                    tenor: Some(tenor),
                    total_days: Some(tenor.total_days()),
                    error: None,
                },
                Err(err) => Report {
                    input,
                    tenor: None,
                    total_days: None,
                    error: Some(err.to_string()),
                },
            });
            continue;
        }

        match result {
            Ok(tenor) => println!("{input}\t{tenor}\t{} days", tenor.total_days()),
            Err(err) => eprintln!("{}", err.to_human_readable(input.as_bytes())),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(all_ok)
}
