//! Line-oriented prompts for the interactive menu
//!
//! Reads from any `BufRead` and writes prompts to any `Write`, so sessions
//! can be driven from a terminal or from a script.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use super::errors::{CliError, CliResult};
use crate::catalog::bounded;

/// Format accepted for due dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Prompting reader/writer pair
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for everything that is not a prompt
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ask(&mut self, prompt: &str) -> CliResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.next_line()
    }

    /// Next input line without its line terminator
    fn next_line(&mut self) -> CliResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::end_of_input());
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Read one line, truncated to a field of `capacity` bytes.
    pub fn read_line(&mut self, prompt: &str, capacity: usize) -> CliResult<String> {
        let line = self.ask(prompt)?;
        Ok(bounded(&line, capacity))
    }

    /// Read an integer in `min..=max`, asking again until one is given.
    pub fn read_int(&mut self, prompt: &str, min: i64, max: i64) -> CliResult<i64> {
        loop {
            let line = self.ask(prompt)?;
            let value = match line.trim().parse::<i64>() {
                Ok(value) => value,
                Err(_) => {
                    writeln!(self.output, "Invalid input. Please enter a number.")?;
                    continue;
                }
            };

            if value < min || value > max {
                writeln!(self.output, "Please enter a value between {} and {}.", min, max)?;
                continue;
            }

            return Ok(value);
        }
    }

    /// Read a calendar date as `YYYY-MM-DD`, asking again until one is given.
    pub fn read_date(&mut self, prompt: &str) -> CliResult<String> {
        loop {
            let line = self.ask(prompt)?;
            match NaiveDate::parse_from_str(line.trim(), DATE_FORMAT) {
                Ok(date) => return Ok(date.format(DATE_FORMAT).to_string()),
                Err(_) => {
                    writeln!(self.output, "Invalid date. Please use YYYY-MM-DD.")?;
                }
            }
        }
    }

    /// Wait for the operator to press ENTER.
    pub fn press_enter(&mut self) -> CliResult<()> {
        self.ask("\nPress ENTER to continue...")?;
        Ok(())
    }
}
