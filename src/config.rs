//! Configuration for qslog
//!
//! The question set and log location, loaded from a YAML file.
//!
//! ```yaml
//! path: log.csv
//! questions:
//!   - id: mood
//!     prompt: How was your mood?
//!     type: choice
//!     choices:
//!       - { value: 1, label: bad }
//!       - { value: 2, label: good }
//!   - id: weight
//!     prompt: Weight?
//!     type: quantity
//!     unit: kg
//!     frequency: mon, thu
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{QsError, Result};
use crate::input::{UnitRegistry, DEFAULT_SKIP_TOKEN};
use crate::recurrence::Recurrence;
use crate::response::{Choice, YesNo};
use crate::schema::FieldName;

/// Column holding the day the answers were given
pub const RECORDED_FIELD: &str = "recorded";

/// Column holding the day the answers are about
pub const DATE_FIELD: &str = "date";

/// Most decimal places a quantity can be rounded to
pub const MAX_DECIMALS: u32 = 15;

/// Main configuration for a qslog run
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Log Configuration
    // -------------------------------------------------------------------------
    /// CSV file responses are appended to
    #[serde(rename = "path")]
    pub log_path: PathBuf,

    // -------------------------------------------------------------------------
    // Prompt Configuration
    // -------------------------------------------------------------------------
    /// Answer that leaves a question empty
    #[serde(default = "default_skip_token")]
    pub skip_token: String,

    /// Most days a catch-up run will ask about
    #[serde(default = "default_max_catch_up_days")]
    pub max_catch_up_days: u32,

    // -------------------------------------------------------------------------
    // Questions
    // -------------------------------------------------------------------------
    /// Asked in this order; ids become log columns
    pub questions: Vec<Question>,
}

/// One configured question
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
    /// Column name in the log
    pub id: String,

    /// Text shown to the operator
    pub prompt: String,

    /// Dates the question is due on
    #[serde(default)]
    pub frequency: Recurrence,

    /// What to do on dates the question is not due
    #[serde(default)]
    pub off_schedule: OffSchedule,

    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Question type with its type-specific parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionKind {
    #[serde(rename = "choice")]
    Choice { choices: Vec<Choice> },

    #[serde(rename = "yn")]
    YesNo {
        #[serde(default)]
        default: Option<YesNo>,
    },

    #[serde(rename = "int")]
    Integer,

    #[serde(rename = "float")]
    Float,

    /// Recorded in whole seconds
    #[serde(rename = "duration")]
    Duration,

    #[serde(rename = "quantity")]
    Quantity {
        unit: String,
        #[serde(default = "default_decimals")]
        decimals: u32,
    },
}

/// Handling of a question on a date its frequency does not cover
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffSchedule {
    /// Do not ask; the cell stays empty
    #[default]
    Skip,
    /// Ask anyway, marked as off schedule
    Ask,
}

fn default_skip_token() -> String {
    DEFAULT_SKIP_TOKEN.to_string()
}

fn default_max_catch_up_days() -> u32 {
    7
}

fn default_decimals() -> u32 {
    2
}

impl Question {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            frequency: Recurrence::Daily,
            off_schedule: OffSchedule::Skip,
            kind,
        }
    }

    pub fn with_frequency(mut self, frequency: Recurrence) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_off_schedule(mut self, policy: OffSchedule) -> Self {
        self.off_schedule = policy;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("log.csv"),
            skip_token: default_skip_token(),
            max_catch_up_days: default_max_catch_up_days(),
            questions: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load a config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            QsError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&text)
    }

    /// Parse a config from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Check the question set makes sense before anything touches the log
    pub fn validate(&self, units: &UnitRegistry) -> Result<()> {
        if self.skip_token.trim().is_empty() {
            return Err(QsError::Config("skip_token must not be empty".to_string()));
        }
        if self.max_catch_up_days == 0 {
            return Err(QsError::Config(
                "max_catch_up_days must be at least 1".to_string(),
            ));
        }
        if self.questions.is_empty() {
            return Err(QsError::Config("no questions configured".to_string()));
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            let id = question.id.as_str();
            if id.trim().is_empty() {
                return Err(QsError::Config("question with empty id".to_string()));
            }
            if id == RECORDED_FIELD || id == DATE_FIELD {
                return Err(QsError::Config(format!("question id '{}' is reserved", id)));
            }
            if !seen.insert(id) {
                return Err(QsError::Config(format!("duplicate question id '{}'", id)));
            }

            match &question.kind {
                QuestionKind::Choice { choices } if choices.is_empty() => {
                    return Err(QsError::Config(format!("question '{}' has no choices", id)));
                }
                QuestionKind::Quantity { decimals, .. } if *decimals > MAX_DECIMALS => {
                    return Err(QsError::Config(format!(
                        "question '{}' asks for {} decimals (at most {})",
                        id, decimals, MAX_DECIMALS
                    )));
                }
                QuestionKind::Quantity { unit, .. } if !units.is_defined(unit) => {
                    return Err(QsError::Config(format!(
                        "question '{}' uses unknown unit '{}'",
                        id, unit
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Columns this question set writes, in order
    pub fn desired_fields(&self) -> Vec<FieldName> {
        [RECORDED_FIELD, DATE_FIELD]
            .into_iter()
            .map(str::to_string)
            .chain(self.questions.iter().map(|q| q.id.clone()))
            .collect()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the skip token
    pub fn skip_token(mut self, token: impl Into<String>) -> Self {
        self.config.skip_token = token.into();
        self
    }

    /// Set the catch-up window (in days)
    pub fn max_catch_up_days(mut self, days: u32) -> Self {
        self.config.max_catch_up_days = days;
        self
    }

    /// Append a question
    pub fn question(mut self, question: Question) -> Self {
        self.config.questions.push(question);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
