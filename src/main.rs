//! Reads an interval stream and prints every coexistence group found in it.
//!
//! Usage: `coexist [INPUT] [--config FILE]`
//!
//! Intervals are read from INPUT, or stdin when it is missing or `-`. Each
//! closed group is written to stdout as one line of JSON. Logging goes to
//! stderr and is controlled by `log_filter` in the config or `RUST_LOG`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use coexist::config::EngineConfig;
use coexist::engine::CoexistenceEngine;
use coexist::event::{EventCollector, OverlapEvent};
use coexist::input::intervals;
use coexist::{CoexistError, Result};

struct Arguments {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_arguments() -> Result<Arguments> {
    let mut arguments = Arguments { input: None, config: None };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| CoexistError::Config("--config needs a file".into()))?;
                arguments.config = Some(PathBuf::from(path));
            }
            "-" => arguments.input = None,
            _ => arguments.input = Some(PathBuf::from(arg)),
        }
    }
    Ok(arguments)
}

fn enable_tracing(config: &EngineConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

// Writes the events collected so far as JSON lines.
fn write_events<W: Write>(out: &mut W, collector: &EventCollector<String>) -> Result<usize> {
    let events: Vec<OverlapEvent<String>> = collector.take()?;
    for event in &events {
        serde_json::to_writer(&mut *out, event)?;
        writeln!(out)?;
    }
    Ok(events.len())
}

fn run() -> Result<()> {
    let arguments = parse_arguments()?;
    let config = EngineConfig::load(arguments.config.as_deref())?;
    enable_tracing(&config);

    let reader: Box<dyn BufRead> = match &arguments.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let engine = CoexistenceEngine::<String>::with_config(config);
    let collector = Arc::new(EventCollector::<String>::new());
    engine.register_listener(collector.clone())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut reported = 0;
    let mut groups = 0;
    for interval in intervals(reader) {
        engine.report(interval?)?;
        reported += 1;
        groups += write_events(&mut out, &collector)?;
    }
    engine.close_reporting()?;
    groups += write_events(&mut out, &collector)?;
    out.flush()?;
    info!(intervals = reported, groups, "done");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "coexist failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
