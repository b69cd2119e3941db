//! Suite entry points.
//!
//! [`run_specs`] is the default: it installs the console reporter and, when a
//! stream host is configured, the forwarding reporter as well.
//! [`run_specs_with_reporters`] runs with exactly the reporters supplied.

use log::{debug, warn};

use crate::config::{self, SuiteConfig};
use crate::reporters::{
    ConsoleStenographer, DefaultReporter, ForwardingReporter, Reporter, ReporterConfig,
};
use crate::runner::SpecRunner;
use crate::summary::SuiteSummary;
use crate::tree::Suite;

/// Receives the verdict of a failed suite.
///
/// Implemented by whatever stands in for the host test framework. Inside a
/// `#[test]` function [`PanickingHandle`] turns a failed suite into a failed
/// test.
pub trait TestHandle {
    /// Called once when the suite did not succeed.
    fn fail(&mut self, summary: &SuiteSummary);
}

/// Handle that panics when the suite fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanickingHandle;

impl TestHandle for PanickingHandle {
    fn fail(&mut self, summary: &SuiteSummary) {
        panic!(
            "suite {:?} failed: {} of {} specs failed",
            summary.description(),
            summary.failed(),
            summary.total()
        );
    }
}

/// Handle that records failures for later inspection.
///
/// # Examples
///
/// ```
/// use spectree::{FailureRecorder, Mode, Suite, run_specs_with_reporters};
///
/// let mut suite = Suite::new();
/// suite.it("fails", Mode::Normal, || panic!("boom"));
/// let mut handle = FailureRecorder::default();
/// assert!(!run_specs_with_reporters(&mut suite, &mut handle, "failing", Vec::new()));
/// assert_eq!(handle.failures(), 1);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FailureRecorder {
    failures: u32,
}

impl FailureRecorder {
    /// Whether any suite reported through this handle failed.
    #[must_use]
    pub const fn failed(&self) -> bool {
        self.failures > 0
    }

    /// Number of failed suites reported through this handle.
    #[must_use]
    pub const fn failures(&self) -> u32 {
        self.failures
    }
}

impl TestHandle for FailureRecorder {
    fn fail(&mut self, _summary: &SuiteSummary) {
        self.failures += 1;
    }
}

/// Run a suite with the default reporters and the process-wide
/// configuration.
///
/// Returns `true` when every executed example passed.
pub fn run_specs(suite: &mut Suite<'_>, handle: &mut dyn TestHandle, description: &str) -> bool {
    run_specs_with_config(suite, handle, description, &config::global())
}

/// Run a suite with the default reporters and an explicit configuration.
///
/// The console reporter always runs. When `config` names a stream host, a
/// [`ForwardingReporter`] connected to it runs as well; a failed connection
/// is logged and the run continues without it.
pub fn run_specs_with_config(
    suite: &mut Suite<'_>,
    handle: &mut dyn TestHandle,
    description: &str,
    config: &SuiteConfig,
) -> bool {
    let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(DefaultReporter::new(
        ReporterConfig::from(config),
        ConsoleStenographer::stdout(!config.no_color()),
    ))];
    if let Some(host) = config.stream_host() {
        match ForwardingReporter::connect(host) {
            Ok(forwarding) => reporters.push(Box::new(forwarding)),
            Err(error) => warn!("remote reporting disabled: {error}"),
        }
    }
    run_specs_with_reporters_and_config(suite, handle, description, config, reporters)
}

/// Run a suite with exactly the given reporters and the process-wide
/// configuration.
pub fn run_specs_with_reporters<'r>(
    suite: &mut Suite<'_>,
    handle: &mut dyn TestHandle,
    description: &str,
    reporters: Vec<Box<dyn Reporter + 'r>>,
) -> bool {
    run_specs_with_reporters_and_config(suite, handle, description, &config::global(), reporters)
}

/// Run a suite with exactly the given reporters and an explicit
/// configuration.
pub fn run_specs_with_reporters_and_config<'r>(
    suite: &mut Suite<'_>,
    handle: &mut dyn TestHandle,
    description: &str,
    config: &SuiteConfig,
    reporters: Vec<Box<dyn Reporter + 'r>>,
) -> bool {
    debug!(
        "running {description:?} with {} reporter(s)",
        reporters.len()
    );
    let summary = SpecRunner::new(description, config, reporters).run(suite);
    if !summary.succeeded() {
        handle.fail(&summary);
    }
    summary.succeeded()
}
