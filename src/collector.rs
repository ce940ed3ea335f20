//! Response Collector
//!
//! Asks the configured questions for one date and gathers the answers.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{Config, OffSchedule, Question, QuestionKind, DATE_FIELD, RECORDED_FIELD};
use crate::error::Result;
use crate::input::{ParseContext, Prompter};
use crate::response::{Response, Value};

/// Date format used in the `recorded` and `date` columns
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Walks the question list for a date
pub struct ResponseCollector<'a> {
    config: &'a Config,
    context: &'a ParseContext,
}

impl<'a> ResponseCollector<'a> {
    pub fn new(config: &'a Config, context: &'a ParseContext) -> Self {
        Self { config, context }
    }

    /// Collect one row of responses about `date`, recorded on `recorded`
    ///
    /// Questions not due on `date` are left out unless their off-schedule
    /// policy says to ask anyway.
    pub fn collect<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        date: NaiveDate,
        recorded: NaiveDate,
    ) -> Result<Vec<Response>> {
        let mut responses = vec![
            Response::new(RECORDED_FIELD, Value::Text(recorded.format(DATE_FORMAT).to_string())),
            Response::new(DATE_FIELD, Value::Text(date.format(DATE_FORMAT).to_string())),
        ];

        let total = self.config.questions.len();
        for (i, question) in self.config.questions.iter().enumerate() {
            let due = question.frequency.is_due(date);
            if !due && question.off_schedule == OffSchedule::Skip {
                debug!(question = %question.id, %date, "not due, skipping");
                continue;
            }

            prompter.print(format!("({}/{}) ", i + 1, total))?;
            let value = self.ask(prompter, question, due)?;
            responses.push(Response::new(question.id.clone(), value));
            prompter.say("\n")?;
        }

        Ok(responses)
    }

    fn ask<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        question: &Question,
        due: bool,
    ) -> Result<Value> {
        let prompt = if due {
            question.prompt.clone()
        } else {
            format!("{} (off schedule)", question.prompt)
        };

        let value = match &question.kind {
            QuestionKind::Choice { choices } => prompter
                .ask_choice(&prompt, choices, true)?
                .map(|choice| choice.value.to_value()),
            QuestionKind::YesNo { default } => {
                prompter.ask_yes_no(&prompt, *default, true)?.map(Value::YesNo)
            }
            QuestionKind::Integer => prompter
                .ask_parsed::<i64>(&prompt, "int", true)?
                .map(Value::Integer),
            QuestionKind::Float => prompter
                .ask_parsed::<f64>(&prompt, "float", true)?
                .map(Value::Float),
            QuestionKind::Duration => prompter
                .ask_duration(&prompt, &self.context.durations, true)?
                .map(|seconds| Value::Integer(seconds as i64)),
            QuestionKind::Quantity { unit, decimals } => prompter
                .ask_quantity(&prompt, &self.context.units, unit, *decimals, true)?
                .map(Value::Quantity),
        };

        Ok(value.into())
    }
}
