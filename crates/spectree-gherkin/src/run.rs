//! Suite entry points that install the Gherkin reporter.

use std::io::{self, Write};

use log::debug;
use spectree::reporters::{DefaultReporter, ReporterConfig};
use spectree::{Suite, SuiteConfig, TestHandle, config};

use crate::stenographer::GherkinStenographer;

/// Build the reporter that renders a run as Gherkin prose into `writer`.
///
/// Colour follows `no_color`; flake notes are enabled when more than one
/// attempt is allowed.
#[must_use]
pub fn build_gherkin_reporter<W: Write>(
    config: &SuiteConfig,
    writer: W,
) -> DefaultReporter<GherkinStenographer<W>> {
    DefaultReporter::new(
        ReporterConfig::from(config),
        GherkinStenographer::new(writer, !config.no_color(), config.flake_attempts() > 1),
    )
}

/// Run a suite, printing Gherkin output to standard output.
///
/// Call this from a `#[test]` function with a [`TestHandle`] such as
/// [`PanickingHandle`](spectree::PanickingHandle). Returns `true` when every
/// executed step passed.
pub fn run_gherkin_specs(
    suite: &mut Suite<'_>,
    handle: &mut dyn TestHandle,
    description: &str,
) -> bool {
    run_gherkin_specs_with_writer(suite, handle, description, io::stdout())
}

/// Run a suite, writing Gherkin output to `writer`.
///
/// The process-wide configuration is read once. When a stream host is
/// configured the engine's default run takes over, forwarding to the remote
/// server itself, and `writer` is unused. Otherwise the Gherkin reporter is
/// the only reporter installed.
///
/// # Examples
///
/// ```
/// use spectree_gherkin::{FailureRecorder, Gherkin, Suite, run_gherkin_specs_with_writer};
///
/// let mut suite = Suite::new();
/// suite.feature("Greeting", "", |feature| {
///     feature.then("it says hello", || assert_eq!("hello".len(), 5));
/// });
///
/// let mut output = Vec::new();
/// let mut handle = FailureRecorder::default();
/// let passed = run_gherkin_specs_with_writer(&mut suite, &mut handle, "greetings", &mut output);
/// assert!(passed);
/// assert!(String::from_utf8_lossy(&output).contains("Then it says hello"));
/// ```
pub fn run_gherkin_specs_with_writer<W: Write>(
    suite: &mut Suite<'_>,
    handle: &mut dyn TestHandle,
    description: &str,
    writer: W,
) -> bool {
    let config = config::global();
    if let Some(host) = config.stream_host() {
        debug!("stream host {host} configured; using the default reporters");
        return spectree::run_specs_with_config(suite, handle, description, &config);
    }
    debug!("installing the gherkin reporter for {description:?}");
    let reporter = build_gherkin_reporter(&config, writer);
    spectree::run_specs_with_reporters_and_config(
        suite,
        handle,
        description,
        &config,
        vec![Box::new(reporter)],
    )
}
