// hvac/src/cli/report.rs
use std::io::{self, Write};

use colored::Colorize;
use hvac_common::model::FieldMatch;
use hvac_core::{leading_number, CycleOutcome, Reporter};
use tracing::debug;

/// Writes one human-readable report per cycle: readings to `out`, fetch
/// failures to `err`.
pub struct ConsoleReporter<O, E> {
    out: O,
    err: E,
    /// Print the start of the page when the labels are missing.
    show_preview: bool,
}

impl ConsoleReporter<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            show_preview: false,
        }
    }

    pub fn with_preview(mut self, show_preview: bool) -> Self {
        self.show_preview = show_preview;
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_outcome(&mut self, outcome: &CycleOutcome) -> io::Result<()> {
        match outcome {
            CycleOutcome::Readings { temp, humidity } => {
                writeln!(self.out, "{}", field_line(temp))?;
                writeln!(self.out, "{}", field_line(humidity))?;
                self.out.flush()
            }
            CycleOutcome::FieldsAbsent { body_len, preview } => {
                writeln!(self.out, "{}", "Could not find temp/rh fields".yellow())?;
                if self.show_preview {
                    writeln!(
                        self.out,
                        "{} {}",
                        format!("Page preview ({body_len} bytes):").as_str().dimmed(),
                        preview
                    )?;
                } else {
                    debug!("Page was {} bytes, starting with: {}", body_len, preview);
                }
                self.out.flush()
            }
            CycleOutcome::FetchFailed(e) => {
                writeln!(self.err, "{} {}", "Failed to fetch page:".red().bold(), e)?;
                self.err.flush()
            }
        }
    }
}

impl<O: Write, E: Write> Reporter for ConsoleReporter<O, E> {
    fn report(&mut self, cycle: u64, outcome: &CycleOutcome) {
        debug!("Reporting cycle {}", cycle);
        if let Err(e) = self.write_outcome(outcome) {
            debug!("Could not write report for cycle {}: {}", cycle, e);
        }
    }
}

fn field_line(field: &FieldMatch) -> String {
    let prefix = format!("Raw {:<4} context:", field.label);
    let mut line = format!("{} {}", prefix.as_str().bold(), field.excerpt);
    if let Some(value) = leading_number(&field.excerpt, &field.label) {
        let hint = format!("(~{value})");
        line.push_str(&format!(" {}", hint.as_str().dimmed()));
    }
    line
}
