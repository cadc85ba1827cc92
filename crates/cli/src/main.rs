use anyhow::{Context, Result};
use clap::Parser;
use quartet_core::{simulate, CancelFlag, SimConfig, SimError, SimReport};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_ENV: &str = "QUARTET_LOG";
const DEFAULT_LOG_FILTER: &str = "quartet=info,quartet_core=info";
const EXIT_FATAL: i32 = 1;
const EXIT_CONFIG: i32 = 2;

/// Estimates how often the four-card-window patience game clears the whole deck
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'n', long)]
    trials: Option<u64>,

    /// Number of suits in the deck
    #[arg(long)]
    suits: Option<u32>,

    /// Number of faces per suit
    #[arg(long)]
    faces: Option<u32>,

    /// Parallel workers (defaults to one per CPU)
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Seed a deterministic generator instead of reading the OS entropy device
    #[arg(short, long)]
    seed: Option<u64>,

    /// Entropy device to read from
    #[arg(long)]
    entropy_path: Option<PathBuf>,

    /// JSON file with any of the settings above; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of the result line
    #[arg(long)]
    json: bool,

    /// Stop after this many seconds and report the games finished so far
    #[arg(long)]
    time_limit: Option<u64>,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn load_config_file(path: &Path) -> Result<SimConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}

fn resolve_config(args: &Args) -> Result<SimConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => load_config_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(suits) = args.suits {
        config.suit_count = suits;
    }
    if let Some(faces) = args.faces {
        config.face_count = faces;
    }
    if let Some(workers) = args.workers {
        config.workers = Some(workers);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(path) = args.entropy_path.clone() {
        config.entropy_path = path;
    }
    Ok(config)
}

fn spawn_deadline(cancel: CancelFlag, limit: Duration) {
    std::thread::spawn(move || {
        std::thread::sleep(limit);
        warn!(secs = limit.as_secs(), "time limit reached, finishing current games");
        cancel.cancel();
    });
}

fn format_report(report: &SimReport, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(report).context("serialize report");
    }
    if report.is_partial() {
        return Ok(format!(
            "{report} (stopped early after {} of {} games)",
            report.completed, report.requested
        ));
    }
    Ok(report.to_string())
}

fn main() {
    let args = Args::parse();
    init_tracing();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err:#}");
            std::process::exit(EXIT_CONFIG);
        }
    };

    let cancel = CancelFlag::new();
    if let Some(secs) = args.time_limit {
        spawn_deadline(cancel.clone(), Duration::from_secs(secs));
    }

    let report = match simulate(&config, &cancel) {
        Ok(report) => report,
        Err(SimError::Config(err)) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(EXIT_CONFIG);
        }
        Err(err @ SimError::Entropy(_)) => {
            let err = anyhow::Error::new(err);
            eprintln!("fatal: {err:#}; no result reported");
            std::process::exit(EXIT_FATAL);
        }
    };

    match format_report(&report, args.json) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("output error: {err:#}");
            std::process::exit(EXIT_FATAL);
        }
    }
}
