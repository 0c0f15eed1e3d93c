//! Terminal effects runner (default binary).
//!
//! Picks an effect by name, runs it full-screen until a key is pressed (or the
//! optional duration elapses) and restores the terminal afterwards.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use term_fx::core::EffectRegistry;
use term_fx::engine::{EffectRunner, RunOutcome};
use term_fx::input::CrosstermInput;
use term_fx::term::CrosstermTerminal;
use term_fx::types::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "term-fx", version, about = "Terminal screensaver effects")]
struct Cli {
    /// effect to run (see --list)
    #[arg(required_unless_present = "list")]
    effect: Option<String>,

    /// effect arguments, e.g. a fire colour scheme
    args: Vec<String>,

    /// list available effects and exit
    #[arg(long)]
    list: bool,

    /// ms per frame (clamped to 10..=1000; default is per effect)
    #[arg(long)]
    interval_ms: Option<u32>,

    /// stop after this many ms instead of waiting for a key
    #[arg(long)]
    duration_ms: Option<u64>,

    /// fixed random seed (default: system entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// write tracing output to this file (filter via RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let registry = EffectRegistry::builtin();

    if cli.list {
        print_list(&registry);
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let Some(name) = cli.effect.as_deref() else {
        bail!("no effect given (try --list)");
    };
    let mut effect = registry.create(name, &cli.args)?;

    let options = RunOptions {
        frame_interval_ms: cli.interval_ms,
        duration_ms: cli.duration_ms,
        seed: cli.seed,
    };

    let mut runner = EffectRunner::new(CrosstermTerminal::new(), CrosstermInput::new());
    let report = runner.run(effect.as_mut(), options);

    match (report.outcome, report.error) {
        (RunOutcome::Aborted, Some(err)) => Err(err.context(format!("{} aborted", report.effect))),
        _ => Ok(()),
    }
}

fn print_list(registry: &EffectRegistry) {
    let width = registry.names().iter().map(|n| n.len()).max().unwrap_or(0);
    for entry in registry.entries() {
        let mut line = format!("{:<width$}  {}", entry.name, entry.description);
        if !entry.usage.is_empty() {
            line.push_str(&format!("  {}", entry.usage));
        }
        if !entry.aliases.is_empty() {
            line.push_str(&format!("  (alias: {})", entry.aliases.join(", ")));
        }
        println!("{line}");
    }
}

/// stdout belongs to the animation, so logs only ever go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
