//! Ostinato command-line tool.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use ostinato::{build_summary, RecurrenceSettings, TimeOfDay};

#[derive(Parser)]
#[command(name = "ostinato")]
#[command(about = "Compose recurrence rules and read them back in plain English")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the default settings document for a date
    Defaults {
        /// Anchor date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Derive the one-line summary from a settings document
    Summary {
        /// Settings JSON file ("-" or omitted: read stdin)
        file: Option<PathBuf>,
    },

    /// Print the half-hour time catalog, one label per line
    Times,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Defaults { date, compact } => {
            let settings = match date {
                Some(date) => RecurrenceSettings::for_date(parse_date(&date)?),
                None => RecurrenceSettings::for_today(),
            };
            let json = if compact {
                serde_json::to_string(&settings)?
            } else {
                serde_json::to_string_pretty(&settings)?
            };
            println!("{json}");
        }
        Command::Summary { file } => {
            let raw = read_input(file.as_deref())?;
            let settings: RecurrenceSettings =
                serde_json::from_str(&raw).context("malformed settings document")?;
            println!("{}", build_summary(&settings));
        }
        Command::Times => {
            for time in TimeOfDay::ALL {
                println!("{time}");
            }
        }
    }

    Ok(())
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::from_str(date).with_context(|| format!("invalid date: {date} (want YYYY-MM-DD)"))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("reading stdin")?;
            Ok(raw)
        }
    }
}
