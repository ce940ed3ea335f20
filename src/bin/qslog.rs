//! qslog Binary
//!
//! Runs the questionnaire against stdin/stdout.

use std::io;
use std::path::PathBuf;
use std::process;

use chrono::Local;
use clap::{ArgAction, Parser};
use qslog::input::{ParseContext, Prompter};
use qslog::{CommitGuard, Config, RunOptions, RunOutcome};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit status after an interrupt (128 + SIGINT)
const EXIT_INTERRUPTED: i32 = 130;

/// qslog
#[derive(Parser, Debug)]
#[command(name = "qslog")]
#[command(about = "Answer your recurring questions and append them to a CSV log")]
#[command(version)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Answer for every unlogged date up to today
    #[arg(long)]
    catch_up: bool,

    /// More log output on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging (stderr, so prompts on stdout stay clean)
    let default_filter = match args.verbose {
        0 => "warn",
        1 => "warn,qslog=info",
        _ => "warn,qslog=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    tracing::debug!("qslog v{}", qslog::VERSION);

    // Ctrl+C aborts collection without saving; an in-flight append finishes
    let guard = CommitGuard::new();
    let handler_guard = guard.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if handler_guard.interrupt() {
            eprintln!("\nInterrupted; no responses were saved.");
            process::exit(EXIT_INTERRUPTED);
        }
        eprintln!("\nInterrupted; finishing the log write first.");
    }) {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    let context = ParseContext::new();

    let config = match Config::load(&args.config).and_then(|config| {
        config.validate(&context.units)?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load {}: {}", args.config.display(), e);
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    tracing::info!(log = %config.log_path.display(), questions = config.questions.len(), "config loaded");

    let stdin = io::stdin();
    let mut prompter =
        Prompter::new(stdin.lock(), io::stdout()).with_skip_token(config.skip_token.clone());

    let options = RunOptions {
        catch_up: args.catch_up,
        today: Local::now().date_naive(),
    };

    match qslog::run(&config, &context, &mut prompter, &options, &guard) {
        Ok(RunOutcome::Cancelled) => {
            eprintln!("\nCancelled; no responses were saved.");
            process::exit(EXIT_INTERRUPTED);
        }
        Ok(outcome) => {
            tracing::info!(?outcome, "run finished");
            if guard.was_interrupted() {
                process::exit(EXIT_INTERRUPTED);
            }
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
