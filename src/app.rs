//! Application Flow
//!
//! One run of the questionnaire, from schema check to appended rows.
//!
//! ## Steps
//! 1. Normalize the log against the configured questions (may be declined)
//! 2. Pick the dates to answer for
//! 3. Collect one row per date
//! 4. Show the answers and ask to save
//! 5. Append the rows
//!
//! Nothing is written to the log after step 1 until the operator agrees to
//! save; end of input before then leaves the log as it was.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::collector::{ResponseCollector, DATE_FORMAT};
use crate::config::Config;
use crate::error::Result;
use crate::input::{ParseContext, Prompter};
use crate::logfile;
use crate::response::{Response, YesNo};
use crate::schema::{self, ConfirmOverwrite};

/// Per-run settings that do not come from the config file
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Answer for every unlogged date up to today instead of one date
    pub catch_up: bool,

    /// The current local date
    pub today: NaiveDate,
}

/// How a run ended (all of these are clean exits)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Rows were appended to the log
    Written { rows: usize, path: PathBuf },

    /// Operator declined the log normalization
    Declined,

    /// Operator chose not to save the answers
    Discarded,

    /// Catch-up found every date already logged
    NothingPending,

    /// Input ended before the answers were saved
    Cancelled,
}

/// Tells an interrupt handler whether a log write is in progress
///
/// An interrupt that arrives mid-write is recorded instead of acted on, so
/// the caller can honor it once the write has finished.
#[derive(Debug, Clone, Default)]
pub struct CommitGuard {
    committing: Arc<AtomicBool>,
    interrupted: Arc<AtomicBool>,
}

impl CommitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_committing(&self) -> bool {
        self.committing.load(Ordering::SeqCst)
    }

    /// Report an interrupt; `true` means it is safe to stop right away
    pub fn interrupt(&self) -> bool {
        if self.is_committing() {
            self.interrupted.store(true, Ordering::SeqCst);
            return false;
        }
        true
    }

    /// Whether an interrupt was deferred by a write in progress
    pub fn was_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Mark a log write in progress until the returned scope is dropped
    pub fn begin(&self) -> CommitScope<'_> {
        self.committing.store(true, Ordering::SeqCst);
        CommitScope(&self.committing)
    }
}

/// Clears the commit flag on drop
pub struct CommitScope<'a>(&'a AtomicBool);

impl Drop for CommitScope<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Run the questionnaire once
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    context: &ParseContext,
    prompter: &mut Prompter<R, W>,
    options: &RunOptions,
    guard: &CommitGuard,
) -> Result<RunOutcome> {
    match run_inner(config, context, prompter, options, guard) {
        Err(e) if e.is_cancellation() => {
            info!("input closed, nothing written");
            Ok(RunOutcome::Cancelled)
        }
        other => other,
    }
}

fn run_inner<R: BufRead, W: Write>(
    config: &Config,
    context: &ParseContext,
    prompter: &mut Prompter<R, W>,
    options: &RunOptions,
    guard: &CommitGuard,
) -> Result<RunOutcome> {
    // Step 1: Reconcile the log header with the question set
    let desired = config.desired_fields();
    let confirm: &mut dyn ConfirmOverwrite = &mut *prompter;
    let normalization = match schema::normalize(&config.log_path, &desired, Some(confirm))? {
        Some(normalization) => normalization,
        None => return Ok(RunOutcome::Declined),
    };

    // Step 2: Decide which dates to answer for
    let dates = if options.catch_up {
        let last = logfile::last_logged_date(&config.log_path)?;
        let dates = pending_dates(last, options.today, config.max_catch_up_days);
        if dates.is_empty() {
            prompter.say("Nothing to catch up on.")?;
            return Ok(RunOutcome::NothingPending);
        }
        dates
    } else {
        vec![choose_date(prompter, options.today)?]
    };

    prompter.say(format!(
        "\nType \"{}\" at any time to skip a question.\n",
        prompter.skip_token()
    ))?;

    // Step 3: Collect a row per date
    let collector = ResponseCollector::new(config, context);
    let mut rows = Vec::with_capacity(dates.len());
    for date in &dates {
        if dates.len() > 1 {
            prompter.say(format!("Answering questions for {}.\n", date.format(DATE_FORMAT)))?;
        }
        rows.push(collector.collect(prompter, *date, options.today)?);
    }

    // Step 4: Review
    show_responses(prompter, &rows)?;
    if !prompter.confirm("\nSave these responses?", YesNo::Yes)? {
        prompter.say("\nResponses discarded.")?;
        return Ok(RunOutcome::Discarded);
    }

    // Step 5: Append
    let written = {
        let _commit = guard.begin();
        logfile::append_rows(&config.log_path, &normalization, &rows)?
    };
    let responses: usize = rows.iter().map(Vec::len).sum();
    prompter.say(format!(
        "Wrote out {} responses to {}.",
        responses,
        config.log_path.display()
    ))?;

    Ok(RunOutcome::Written {
        rows: written,
        path: config.log_path.clone(),
    })
}

/// Dates after `last` up to `today`, at most `max_days` of the most recent
///
/// With nothing logged yet only `today` is pending.
pub fn pending_dates(last: Option<NaiveDate>, today: NaiveDate, max_days: u32) -> Vec<NaiveDate> {
    let last = match last {
        Some(last) => last,
        None => return vec![today],
    };

    let next = match last.succ_opt() {
        Some(next) => next,
        None => return Vec::new(),
    };
    // A window reaching past the calendar's start covers everything
    let window_start = today
        .checked_sub_signed(Duration::days(i64::from(max_days.max(1)) - 1))
        .unwrap_or(NaiveDate::MIN);
    let mut dates = Vec::new();
    let mut date = Some(std::cmp::max(next, window_start));
    while let Some(current) = date.filter(|d| *d <= today) {
        dates.push(current);
        date = current.succ_opt();
    }
    dates
}

/// Offer to answer for a different date than today
fn choose_date<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    today: NaiveDate,
) -> Result<NaiveDate> {
    prompter.say(format!("Answering questions for {}.", today.format(DATE_FORMAT)))?;
    if !prompter.confirm("Do you want to change the date?", YesNo::No)? {
        return Ok(today);
    }
    let date = prompter.ask_date("Please enter a date", today, false)?;
    Ok(date.unwrap_or(today))
}

fn show_responses<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    rows: &[Vec<Response>],
) -> Result<()> {
    prompter.say("Responses:")?;
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            prompter.say("")?;
        }
        for response in row {
            prompter.say(format!("- {}: {}", response.id, response.value))?;
        }
    }
    Ok(())
}
