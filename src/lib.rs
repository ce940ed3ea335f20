//! # qslog
//!
//! A personal questionnaire logger:
//! - Asks a configured set of questions for a date
//! - Parses typed answers (choices, yes/no, numbers, durations, quantities)
//! - Appends one row per date to a CSV log
//! - Keeps the log's columns in step with an evolving question set
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     config.yaml (Config)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ desired fields
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Schema Normalizer                        │
//! │        (header diff, atomic rewrite, filler for gaps)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ NormalizationResult
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Collector  │─ rows ──▶│ Log Writer  │
//!   │ (Prompter)  │          │  (append)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod response;
pub mod recurrence;
pub mod schema;
pub mod logfile;
pub mod input;
pub mod collector;
pub mod app;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{QsError, Result};
pub use config::Config;
pub use schema::{normalize, NormalizationResult};
pub use app::{run, CommitGuard, RunOptions, RunOutcome};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of qslog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
