//! Streams reporter callbacks to a remote server.
//!
//! Each callback becomes one JSON object on its own line, tagged with an
//! `event` field:
//!
//! ```text
//! {"event":"suite_will_begin","suite":{...}}
//! {"event":"spec_will_run","spec":{...}}
//! {"event":"spec_did_complete","spec":{...}}
//! {"event":"suite_did_end","summary":{...}}
//! ```

use std::io::{BufWriter, Write};
use std::net::TcpStream;

use log::{debug, warn};
use serde::Serialize;

use super::Reporter;
use crate::error::ReportError;
use crate::summary::{SpecSummary, SuiteStart, SuiteSummary};

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    SuiteWillBegin { suite: &'a SuiteStart },
    SpecWillRun { spec: &'a SpecSummary },
    SpecDidComplete { spec: &'a SpecSummary },
    SuiteDidEnd { summary: &'a SuiteSummary },
}

/// Reporter writing newline-delimited JSON events to a sink.
///
/// # Examples
///
/// ```
/// use spectree::reporters::ForwardingReporter;
/// use spectree::{FailureRecorder, Mode, Suite, run_specs_with_reporters};
///
/// let mut output = Vec::new();
/// let mut suite = Suite::new();
/// suite.it("streams", Mode::Normal, || {});
/// let mut handle = FailureRecorder::default();
/// let reporter = ForwardingReporter::new(&mut output);
/// assert!(run_specs_with_reporters(&mut suite, &mut handle, "remote", vec![Box::new(reporter)]));
///
/// let text = String::from_utf8_lossy(&output);
/// assert_eq!(text.lines().count(), 4);
/// assert!(text.contains(r#""event":"suite_did_end""#));
/// ```
pub struct ForwardingReporter<W: Write> {
    writer: BufWriter<W>,
}

impl ForwardingReporter<TcpStream> {
    /// Connect to a reporting server at `host` (`host:port`).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Connect`] when the server cannot be reached.
    pub fn connect(host: &str) -> Result<Self, ReportError> {
        let stream = TcpStream::connect(host).map_err(|source| ReportError::Connect {
            host: host.to_owned(),
            source,
        })?;
        debug!("forwarding reports to {host}");
        Ok(Self::new(stream))
    }
}

impl<W: Write> ForwardingReporter<W> {
    /// Forward events to an arbitrary sink.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    fn forward(&mut self, event: &Event<'_>) {
        if let Err(error) = self.try_forward(event) {
            warn!("failed to forward report event: {error}");
        }
    }

    fn try_forward(&mut self, event: &Event<'_>) -> Result<(), ReportError> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Reporter for ForwardingReporter<W> {
    fn suite_will_begin(&mut self, suite: &SuiteStart) {
        self.forward(&Event::SuiteWillBegin { suite });
    }

    fn spec_will_run(&mut self, spec: &SpecSummary) {
        self.forward(&Event::SpecWillRun { spec });
    }

    fn spec_did_complete(&mut self, spec: &SpecSummary) {
        self.forward(&Event::SpecDidComplete { spec });
    }

    fn suite_did_end(&mut self, summary: &SuiteSummary) {
        self.forward(&Event::SuiteDidEnd { summary });
    }
}
