//! Reporter plumbing.
//!
//! The runner talks to [`Reporter`]s. [`DefaultReporter`] adapts the reporter
//! callbacks onto a [`Stenographer`], which owns the actual text rendering.
//! [`ForwardingReporter`] streams the same callbacks to a remote server.

mod console;
mod forwarding;
mod render;
mod stenographer;

pub use console::ConsoleStenographer;
pub use forwarding::ForwardingReporter;
pub use render::{paint, write_suite_header, write_summary};
pub use stenographer::Stenographer;

use log::warn;

use crate::config::SuiteConfig;
use crate::error::ReportError;
use crate::summary::{SpecState, SpecSummary, SuiteStart, SuiteSummary};

/// Receives run progress from the runner.
pub trait Reporter {
    /// Called once before any example runs.
    fn suite_will_begin(&mut self, suite: &SuiteStart);
    /// Called before each example, including ones that will not execute.
    fn spec_will_run(&mut self, spec: &SpecSummary);
    /// Called after each example with its final state.
    fn spec_did_complete(&mut self, spec: &SpecSummary);
    /// Called once after every example completed.
    fn suite_did_end(&mut self, summary: &SuiteSummary);
}

/// Output options shared by stenographer-driven reporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReporterConfig {
    /// Disable colourised output.
    pub no_color: bool,
    /// Keep output to a minimum.
    pub succinct: bool,
}

impl From<&SuiteConfig> for ReporterConfig {
    fn from(config: &SuiteConfig) -> Self {
        Self {
            no_color: config.no_color(),
            succinct: config.succinct(),
        }
    }
}

/// Reporter that renders progress through a [`Stenographer`].
///
/// Write failures are logged and never abort the run.
///
/// # Examples
///
/// ```
/// use spectree::reporters::{ConsoleStenographer, DefaultReporter, ReporterConfig};
/// use spectree::{FailureRecorder, Mode, Suite, run_specs_with_reporters};
///
/// let mut output = Vec::new();
/// let reporter = DefaultReporter::new(
///     ReporterConfig { no_color: true, succinct: false },
///     ConsoleStenographer::new(&mut output, false),
/// );
///
/// let mut suite = Suite::new();
/// suite.it("works", Mode::Normal, || {});
/// let mut handle = FailureRecorder::default();
/// assert!(run_specs_with_reporters(&mut suite, &mut handle, "demo", vec![Box::new(reporter)]));
/// assert!(String::from_utf8_lossy(&output).contains("Running Suite: demo"));
/// ```
pub struct DefaultReporter<S> {
    config: ReporterConfig,
    stenographer: S,
}

impl<S: Stenographer> DefaultReporter<S> {
    /// Wrap a stenographer.
    #[must_use]
    pub fn new(config: ReporterConfig, stenographer: S) -> Self {
        Self {
            config,
            stenographer,
        }
    }

    /// Release the stenographer, e.g. to inspect buffered output.
    #[must_use]
    pub fn into_stenographer(self) -> S {
        self.stenographer
    }

    fn log_failure(result: Result<(), ReportError>) {
        if let Err(error) = result {
            warn!("reporter output failed: {error}");
        }
    }
}

impl<S: Stenographer> Reporter for DefaultReporter<S> {
    fn suite_will_begin(&mut self, suite: &SuiteStart) {
        Self::log_failure(self.stenographer.announce_suite(suite, self.config.succinct));
    }

    fn spec_will_run(&mut self, spec: &SpecSummary) {
        if self.config.succinct {
            return;
        }
        Self::log_failure(self.stenographer.announce_spec_will_run(spec));
    }

    fn spec_did_complete(&mut self, spec: &SpecSummary) {
        let succinct = self.config.succinct;
        let result = match spec.state() {
            SpecState::Passed => self.stenographer.announce_success(spec, succinct),
            SpecState::Failed | SpecState::TimedOut => {
                self.stenographer.announce_failure(spec, succinct)
            }
            SpecState::Pending => self.stenographer.announce_pending(spec, succinct),
            SpecState::Skipped => self.stenographer.announce_skipped(spec, succinct),
        };
        Self::log_failure(result);
    }

    fn suite_did_end(&mut self, summary: &SuiteSummary) {
        Self::log_failure(self.stenographer.summarize(summary, self.config.succinct));
    }
}
