//! Blocking prompt loops for console input.
//!
//! # Responsibility
//! - Re-ask until an answer satisfies its field constraint.
//! - Keep the store free of malformed values on the interactive path.
//!
//! # Invariants
//! - Answers are trimmed before checks.
//! - End of input surfaces as `ErrorKind::UnexpectedEof`, never as a retry.

use chrono::{Datelike, NaiveDate};
use std::io::{self, BufRead, ErrorKind, Write};
use taskman_core::{Priority, TaskId, TaskStore};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Prompt reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one trimmed answer; blank answers are returned as empty strings.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    pub fn non_empty(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let value = self.ask(prompt)?;
            if !value.is_empty() {
                return Ok(value);
            }
            writeln!(self.output, "Field cannot be empty")?;
        }
    }

    pub fn date(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let value = self.ask(prompt)?;
            if is_valid_date(&value) {
                return Ok(value);
            }
            writeln!(self.output, "Date must be a valid YYYY-MM-DD date")?;
        }
    }

    /// Like [`Self::date`], but a blank answer means "skip".
    pub fn optional_date(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            let value = self.ask(prompt)?;
            if value.is_empty() {
                return Ok(None);
            }
            if is_valid_date(&value) {
                return Ok(Some(value));
            }
            writeln!(self.output, "Date must be a valid YYYY-MM-DD date")?;
        }
    }

    pub fn priority(&mut self, prompt: &str) -> io::Result<Priority> {
        loop {
            let value = self.ask(prompt)?;
            if let Some(priority) = Priority::from_label(&value) {
                return Ok(priority);
            }
            writeln!(self.output, "{}", priority_hint())?;
        }
    }

    pub fn optional_priority(&mut self, prompt: &str) -> io::Result<Option<Priority>> {
        loop {
            let value = self.ask(prompt)?;
            if value.is_empty() {
                return Ok(None);
            }
            if let Some(priority) = Priority::from_label(&value) {
                return Ok(Some(priority));
            }
            writeln!(self.output, "{}", priority_hint())?;
        }
    }

    /// Reads a positive integer id, or `None` for a blank answer.
    pub fn optional_task_id(&mut self, prompt: &str) -> io::Result<Option<TaskId>> {
        loop {
            let value = self.ask(prompt)?;
            if value.is_empty() {
                return Ok(None);
            }
            match parse_task_id(&value) {
                Some(id) => return Ok(Some(id)),
                None => writeln!(self.output, "Please enter a positive whole number")?,
            }
        }
    }

    /// Reads an id naming a task currently in `store`.
    ///
    /// Callers must check the store is not empty first.
    pub fn existing_task_id(&mut self, store: &TaskStore, prompt: &str) -> io::Result<TaskId> {
        loop {
            let value = self.non_empty(prompt)?;
            let Some(id) = parse_task_id(&value) else {
                writeln!(self.output, "Please enter a positive whole number")?;
                continue;
            };
            if store.get(id).is_some() {
                return Ok(id);
            }
            writeln!(self.output, "Task with ID {id} does not exist")?;
        }
    }
}

/// Returns whether `value` is a real calendar date written as `YYYY-MM-DD`.
pub fn is_valid_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits = [&bytes[..4], &bytes[5..7], &bytes[8..]];
    if !digits.iter().all(|part| part.iter().all(u8::is_ascii_digit)) {
        return false;
    }
    // Year 0 parses in chrono but is not a calendar year.
    NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok_and(|date| date.year() >= 1)
}

fn parse_task_id(value: &str) -> Option<TaskId> {
    value.parse::<TaskId>().ok().filter(|id| *id > 0)
}

fn priority_hint() -> String {
    let labels: Vec<_> = Priority::ALL.iter().map(|p| p.as_str()).collect();
    format!("Priority must be one of: {}", labels.join(", "))
}
