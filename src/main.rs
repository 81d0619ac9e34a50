//! Idlewatch CLI
//!
//! Usage:
//!   idlewatch --replay session.jsonl          # Replay recorded ticks
//!   idlewatch < session.jsonl                 # Same, from stdin
//!   idlewatch --serve                         # HTTP API server
//!   idlewatch --replay session.jsonl --json   # JSON output

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use idlewatch::config::MonitorConfig;
use idlewatch::core::{run_server, MonitorEvent, SessionMonitor, TickOutcome};
use idlewatch::store::{JsonFileStore, KeyValueStore, MemoryStore};
use idlewatch::types::{AlertEvent, StateNotification, TickRecord};
use idlewatch::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "idlewatch",
    version = VERSION,
    about = "Idlewatch - live session monitor with one-shot idle and hazard alerts",
    long_about = "Idlewatch samples world signals once per tick, classifies what the\n\
                  player is doing and raises one alert per rising edge.\n\n\
                  Modes:\n  \
                  --replay FILE  Replay a JSON-lines tick recording (stdin if omitted)\n  \
                  --serve        HTTP API server mode\n\n\
                  Activities:\n  \
                  salvaging  - shipwreck salvaging and sorting\n  \
                  thieving   - pickpocketing wealthy citizens"
)]
struct Args {
    /// JSON-lines recording, one tick per line
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file for persisted counters (in-memory when omitted)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show changed fields and phase changes
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("idlewatch=info")),
        )
        .with_writer(io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let monitor = match build_monitor(&args) {
        Ok(monitor) => monitor,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    let result = if args.serve {
        run_server(&args.addr, monitor).await
    } else {
        run_replay(&args, monitor)
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn build_monitor(args: &Args) -> Result<SessionMonitor, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    let store: Arc<dyn KeyValueStore> = match &args.store {
        Some(path) => Arc::new(JsonFileStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };
    Ok(SessionMonitor::new(config, store))
}

/// Replay a recording line by line
fn run_replay(args: &Args, mut monitor: SessionMonitor) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn BufRead> = match &args.replay {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: TickRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping malformed tick");
                continue;
            }
        };
        for outcome in monitor.tick_record(&record, Utc::now()) {
            print_outcome(&outcome, args);
        }
    }
    Ok(())
}

fn print_outcome(outcome: &TickOutcome, args: &Args) {
    if args.json {
        for event in MonitorEvent::from_outcome(outcome) {
            println!("{}", serde_json::to_string(&event).unwrap_or_default());
        }
        return;
    }

    if args.verbose {
        if let Some(phase) = outcome.transition {
            println!(
                "{} {} → {}",
                "phase".dimmed(),
                outcome.activity,
                phase.to_string().bold()
            );
        }
    }
    if let Some(notification) = &outcome.notification {
        print_notification(notification, args);
    }
    for alert in &outcome.alerts {
        print_alert(alert, args.no_color);
    }
}

fn print_notification(notification: &StateNotification, args: &Args) {
    let state = &notification.state;
    if args.no_color {
        println!("{}", state.to_parseable_string());
    } else {
        println!("{}", state.to_terminal_string());
    }
    if args.verbose {
        println!("  {} {}", "changed:".dimmed(), notification.changed.join(", "));
    }
}

fn print_alert(alert: &AlertEvent, no_color: bool) {
    if no_color {
        println!("{}", alert.to_parseable_string());
        return;
    }
    let headline = format!("🔔 {}", alert.kind);
    println!("{} {}", headline.yellow().bold(), alert.detail.dimmed());
}
