//! The rendering contract behind [`DefaultReporter`](super::DefaultReporter).

use crate::error::ReportError;
use crate::summary::{SpecSummary, SuiteStart, SuiteSummary};

/// Renders suite progress as text.
///
/// Every announcement may fail on I/O; the calling reporter logs the error
/// and carries on.
pub trait Stenographer {
    /// Announce the suite before any example runs.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when output cannot be written.
    fn announce_suite(&mut self, suite: &SuiteStart, succinct: bool) -> Result<(), ReportError>;

    /// Announce an example about to run. Silent by default.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when output cannot be written.
    fn announce_spec_will_run(&mut self, spec: &SpecSummary) -> Result<(), ReportError> {
        let _ = spec;
        Ok(())
    }

    /// Announce a passing example.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when output cannot be written.
    fn announce_success(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError>;

    /// Announce a failed or timed out example.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when output cannot be written.
    fn announce_failure(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError>;

    /// Announce a pending example.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when output cannot be written.
    fn announce_pending(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError>;

    /// Announce a skipped example.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when output cannot be written.
    fn announce_skipped(&mut self, spec: &SpecSummary, succinct: bool) -> Result<(), ReportError>;

    /// Summarise the finished suite.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when output cannot be written.
    fn summarize(&mut self, summary: &SuiteSummary, succinct: bool) -> Result<(), ReportError>;
}
