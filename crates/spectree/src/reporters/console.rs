//! Compact glyph-per-example output.

use std::io::{self, Stdout, Write};

use colored::{ColoredString, Colorize};

use super::Stenographer;
use super::render::{paint, write_suite_header, write_summary};
use crate::error::ReportError;
use crate::summary::{SpecSummary, SuiteStart, SuiteSummary};

/// Stenographer printing one glyph per example and details for failures.
///
/// `•` marks a pass, `P` a pending example and `S` a skipped one. Failures
/// break the line and print the full example text, failing phase, message
/// and declaration site.
pub struct ConsoleStenographer<W> {
    writer: W,
    color: bool,
}

impl ConsoleStenographer<Stdout> {
    /// Write to standard output.
    #[must_use]
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleStenographer<W> {
    /// Write to an arbitrary sink.
    #[must_use]
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    /// Release the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn glyph(
        &mut self,
        glyph: &str,
        style: impl FnOnce(&str) -> ColoredString,
    ) -> Result<(), ReportError> {
        let painted = paint(self.color, glyph, style);
        write!(self.writer, "{painted}")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Stenographer for ConsoleStenographer<W> {
    fn announce_suite(&mut self, suite: &SuiteStart, succinct: bool) -> Result<(), ReportError> {
        write_suite_header(&mut self.writer, suite, self.color, succinct)?;
        Ok(())
    }

    fn announce_success(&mut self, spec: &SpecSummary, _succinct: bool) -> Result<(), ReportError> {
        if spec.flaked() {
            return self.glyph("•", |t| t.yellow());
        }
        self.glyph("•", |t| t.green())
    }

    fn announce_failure(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError> {
        let heading = paint(
            self.color,
            &format!("• {} [{}]", spec.state().label(), spec.full_text()),
            |t| t.red().bold(),
        );
        writeln!(self.writer)?;
        writeln!(self.writer, "{heading}")?;
        if let Some(failure) = spec.failure() {
            writeln!(self.writer, "  in {}: {}", failure.phase().label(), failure.message())?;
        }
        if !succinct {
            writeln!(self.writer, "  {}", spec.location())?;
        }
        Ok(())
    }

    fn announce_pending(
        &mut self,
        _spec: &SpecSummary,
        _succinct: bool,
    ) -> Result<(), ReportError> {
        self.glyph("P", |t| t.yellow())
    }

    fn announce_skipped(
        &mut self,
        _spec: &SpecSummary,
        _succinct: bool,
    ) -> Result<(), ReportError> {
        self.glyph("S", |t| t.cyan())
    }

    fn summarize(&mut self, summary: &SuiteSummary, _succinct: bool) -> Result<(), ReportError> {
        write_summary(&mut self.writer, summary, self.color, false)?;
        Ok(())
    }
}
