//! Step-by-step Gherkin output.
//!
//! Features and scenarios are printed once, when the first step inside them
//! completes, and each step follows on its own line indented beneath its
//! enclosing groups:
//!
//! ```text
//! Feature: Do Something
//!   So that I can accomplish some business value
//!
//!   Scenario: Success
//!     ✓ Given I try something
//!     ✓ And I try harder
//!     ✓ Then it works
//! ```

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use spectree::reporters::{Stenographer, paint, write_suite_header, write_summary};
use spectree::{NodeId, ReportError, SpecState, SpecSummary, SuiteStart, SuiteSummary};

const INDENT: &str = "  ";

/// Stenographer printing Gherkin prose with a marker per step.
///
/// Markers: `✓` passed, `✗` failed or timed out, `-` pending, `~` skipped.
pub struct GherkinStenographer<W> {
    writer: W,
    color: bool,
    enable_flakes: bool,
    open_groups: Vec<OpenGroup>,
}

/// A group whose label has been printed. Summaries built by hand carry no
/// ids, so the label alone identifies them.
#[derive(PartialEq, Eq)]
struct OpenGroup {
    id: Option<NodeId>,
    text: String,
}

impl<W: Write> GherkinStenographer<W> {
    /// Write to an arbitrary sink.
    ///
    /// `enable_flakes` adds a note beneath steps that passed only after a
    /// retry.
    #[must_use]
    pub fn new(writer: W, color: bool, enable_flakes: bool) -> Self {
        Self {
            writer,
            color,
            enable_flakes,
            open_groups: Vec::new(),
        }
    }

    /// Release the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        paint(self.color, text, style)
    }

    /// Print the labels of groups `spec` entered since the previous step.
    fn enter_groups(&mut self, spec: &SpecSummary) -> io::Result<()> {
        let ids = spec.group_ids();
        let groups: Vec<OpenGroup> = spec
            .group_texts()
            .iter()
            .enumerate()
            .map(|(depth, text)| OpenGroup {
                id: ids.get(depth).copied(),
                text: text.clone(),
            })
            .collect();
        let shared = self
            .open_groups
            .iter()
            .zip(&groups)
            .take_while(|(open, group)| open == group)
            .count();
        self.open_groups.truncate(shared);
        for (depth, group) in groups.into_iter().enumerate().skip(shared) {
            let indent = INDENT.repeat(depth);
            let mut lines = group.text.lines();
            if let Some(title) = lines.next() {
                let title = self.paint(title, |t| t.bold());
                writeln!(self.writer, "{indent}{title}")?;
            }
            let mut narrative = false;
            for line in lines {
                writeln!(self.writer, "{indent}{line}")?;
                narrative = true;
            }
            if narrative {
                writeln!(self.writer)?;
            }
            self.open_groups.push(group);
        }
        Ok(())
    }

    fn step(
        &mut self,
        spec: &SpecSummary,
        marker: &str,
        style: impl FnOnce(&str) -> ColoredString,
        succinct: bool,
    ) -> io::Result<()> {
        self.enter_groups(spec)?;
        let indent = INDENT.repeat(self.open_groups.len());
        let line = self.paint(&format!("{marker} {}", spec.text()), style);
        if succinct || spec.attempts() == 0 {
            writeln!(self.writer, "{indent}{line}")?;
        } else {
            let timing = self.paint(
                &format!("({:.3}s)", spec.run_time().as_secs_f64()),
                |t| t.dimmed(),
            );
            writeln!(self.writer, "{indent}{line} {timing}")?;
        }
        self.writer.flush()
    }

    fn detail(&mut self, text: &str) -> io::Result<()> {
        let indent = INDENT.repeat(self.open_groups.len() + 1);
        writeln!(self.writer, "{indent}{text}")
    }
}

impl<W: Write> Stenographer for GherkinStenographer<W> {
    fn announce_suite(&mut self, suite: &SuiteStart, succinct: bool) -> Result<(), ReportError> {
        self.open_groups.clear();
        write_suite_header(&mut self.writer, suite, self.color, succinct)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn announce_success(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError> {
        self.step(spec, "✓", |t| t.green(), succinct)?;
        if self.enable_flakes && spec.flaked() {
            let note = self.paint(
                &format!("flaked: passed on attempt {}", spec.attempts()),
                |t| t.yellow(),
            );
            self.detail(&note)?;
        }
        Ok(())
    }

    fn announce_failure(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError> {
        self.step(spec, "✗", |t| t.red().bold(), succinct)?;
        if let Some(failure) = spec.failure() {
            let verdict = if spec.state() == SpecState::TimedOut {
                "timed out"
            } else {
                "failed"
            };
            let message = self.paint(
                &format!("{verdict} in {}: {}", failure.phase().label(), failure.message()),
                |t| t.red(),
            );
            self.detail(&message)?;
        }
        if !succinct {
            self.detail(&spec.location().to_string())?;
        }
        Ok(())
    }

    fn announce_pending(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError> {
        self.step(spec, "-", |t| t.yellow(), succinct)?;
        Ok(())
    }

    fn announce_skipped(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError> {
        self.step(spec, "~", |t| t.cyan(), succinct)?;
        if let Some(reason) = spec.failure().filter(|failure| !failure.message().is_empty()) {
            let note = self.paint(&format!("skipped: {}", reason.message()), |t| t.cyan());
            self.detail(&note)?;
        }
        Ok(())
    }

    fn summarize(&mut self, summary: &SuiteSummary, _succinct: bool) -> Result<(), ReportError> {
        write_summary(&mut self.writer, summary, self.color, self.enable_flakes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
