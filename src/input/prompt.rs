//! Prompter
//!
//! Line-based question/answer exchange over any reader and writer.
//!
//! Each `ask_*` method prints the question, reads one line, and either
//! returns a parsed answer, returns `None` for the skip token, or prints the
//! question again. End of input surfaces as `QsError::Cancelled`.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{QsError, Result};
use crate::response::{Choice, YesNo};
use crate::schema::{ConfirmOverwrite, SchemaDiff};

use super::parse::{parse_date, round_to, DurationParser};
use super::units::UnitRegistry;

/// Answer that leaves a skippable question empty
pub const DEFAULT_SKIP_TOKEN: &str = "skip";

/// Interactive prompter
pub struct Prompter<R, W> {
    input: R,
    output: W,
    skip_token: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            skip_token: DEFAULT_SKIP_TOKEN.to_string(),
        }
    }

    /// Use a different skip token
    pub fn with_skip_token(mut self, token: impl Into<String>) -> Self {
        self.skip_token = token.into();
        self
    }

    pub fn skip_token(&self) -> &str {
        &self.skip_token
    }

    /// Print a line
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print without a newline
    pub fn print(&mut self, text: impl Display) -> Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Give back the reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    // =========================================================================
    // Typed Questions
    // =========================================================================

    /// Ask a `y`/`n` question
    ///
    /// With a default, an empty answer picks it and the default letter is
    /// shown upper-cased (`Y/n>`).
    pub fn ask_yes_no(
        &mut self,
        prompt: &str,
        default: Option<YesNo>,
        skippable: bool,
    ) -> Result<Option<YesNo>> {
        let marker = match default {
            Some(YesNo::Yes) => "Y/n",
            Some(YesNo::No) => "y/N",
            None => "y/n",
        };
        let text = format!("{}\n{}> ", prompt, marker);

        self.ask_until(&text, skippable, |answer| {
            let answer = answer.trim();
            if answer.is_empty() {
                return default;
            }
            YesNo::from_token(answer)
        })
    }

    /// Non-skippable yes/no with a default; `true` for yes
    pub fn confirm(&mut self, prompt: &str, default: YesNo) -> Result<bool> {
        let answer = self.ask_yes_no(prompt, Some(default), false)?;
        Ok(answer.unwrap_or(default) == YesNo::Yes)
    }

    /// Ask to pick one of `choices` by typing its value
    pub fn ask_choice<'c>(
        &mut self,
        prompt: &str,
        choices: &'c [Choice],
        skippable: bool,
    ) -> Result<Option<&'c Choice>> {
        let mut text = String::from(prompt);
        for choice in choices {
            text.push_str(&format!("\n{}) {}", choice.value, choice.label));
        }
        text.push_str("\nchoice> ");

        self.ask_until(&text, skippable, |answer| {
            choices.iter().find(|c| c.value.matches(answer))
        })
    }

    /// Ask for anything with a `FromStr` impl (integers, floats)
    pub fn ask_parsed<T: FromStr>(
        &mut self,
        prompt: &str,
        label: &str,
        skippable: bool,
    ) -> Result<Option<T>> {
        let text = format!("{}\n{}> ", prompt, label);
        self.ask_until(&text, skippable, |answer| answer.trim().parse::<T>().ok())
    }

    /// Ask for a calendar date
    pub fn ask_date(
        &mut self,
        prompt: &str,
        today: NaiveDate,
        skippable: bool,
    ) -> Result<Option<NaiveDate>> {
        let text = format!("{}\ndate> ", prompt);
        self.ask_until(&text, skippable, |answer| parse_date(answer, today))
    }

    /// Ask for a duration, answered in whole seconds
    pub fn ask_duration(
        &mut self,
        prompt: &str,
        durations: &DurationParser,
        skippable: bool,
    ) -> Result<Option<u64>> {
        let text = format!("{}\nduration> ", prompt);
        self.ask_until(&text, skippable, |answer| durations.parse(answer))
    }

    /// Ask for a quantity, converted to `unit` and rounded to `decimals`
    pub fn ask_quantity(
        &mut self,
        prompt: &str,
        units: &UnitRegistry,
        unit: &str,
        decimals: u32,
        skippable: bool,
    ) -> Result<Option<f64>> {
        let text = format!("{}\nquantity ({})> ", prompt, unit);
        self.ask_until(&text, skippable, |answer| {
            units
                .to_unit(answer, unit)
                .ok()
                .map(|magnitude| round_to(magnitude, decimals))
        })
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Re-ask `text` until `parse` accepts the answer or it is skipped
    fn ask_until<T>(
        &mut self,
        text: &str,
        skippable: bool,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        loop {
            let answer = match self.read_answer(text)? {
                Some(answer) => answer,
                None => continue,
            };
            if skippable && answer.trim() == self.skip_token {
                return Ok(None);
            }
            if let Some(value) = parse(&answer) {
                return Ok(Some(value));
            }
        }
    }

    /// Print `text`, read one line, strip the line ending
    ///
    /// A line that is not UTF-8 comes back as `None` and is asked again.
    fn read_answer(&mut self, text: &str) -> Result<Option<String>> {
        self.print(text)?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(QsError::Cancelled);
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }

        match String::from_utf8(line) {
            Ok(answer) => Ok(Some(answer)),
            Err(_) => {
                debug!("answer is not valid UTF-8, asking again");
                Ok(None)
            }
        }
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for Prompter<R, W> {
    fn confirm_overwrite(&mut self, path: &Path, diff: &SchemaDiff) -> Result<bool> {
        self.say(format!(
            "Need to normalize {}\n- Unique to existing fieldnames: {}\n- Unique to new fieldnames: {}",
            path.display(),
            diff.removed.join(", "),
            diff.added.join(", "),
        ))?;

        let proceed = self.confirm("Proceed?", YesNo::Yes)?;
        self.say("")?;
        Ok(proceed)
    }
}
