//! Result records produced by a run.
//!
//! The runner fills one [`SpecSummary`] per example and folds them into a
//! [`SuiteSummary`]. Reporters receive both by reference.

use std::time::Duration;

use serde::Serialize;

use crate::location::CodeLocation;
use crate::tree::NodeId;

/// Final state of a single example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecState {
    /// Every hook and the body completed.
    Passed,
    /// A hook or the body panicked.
    Failed,
    /// The body completed after its declared timeout elapsed.
    TimedOut,
    /// The example or an enclosing group is pending.
    Pending,
    /// The example was skipped by mode, by focus, or at runtime.
    Skipped,
}

impl SpecState {
    /// Return the lowercase label for the state.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::TimedOut => "timed out",
            Self::Pending => "pending",
            Self::Skipped => "skipped",
        }
    }

    /// Whether the state counts as a failure.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::TimedOut)
    }
}

/// Part of an example's execution where a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A `before_each` hook.
    BeforeEach,
    /// A `just_before_each` hook.
    JustBeforeEach,
    /// The example body.
    Body,
    /// An `after_each` hook.
    AfterEach,
}

impl Phase {
    /// Return a readable label for the phase.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BeforeEach => "before_each",
            Self::JustBeforeEach => "just_before_each",
            Self::Body => "body",
            Self::AfterEach => "after_each",
        }
    }
}

/// Why an example failed or was skipped at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecFailure {
    message: String,
    phase: Phase,
}

impl SpecFailure {
    /// Construct a failure record.
    #[must_use]
    pub fn new(message: impl Into<String>, phase: Phase) -> Self {
        Self {
            message: message.into(),
            phase,
        }
    }

    /// Failure or skip message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Phase in which the failure happened.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }
}

/// Outcome of one example.
///
/// # Examples
///
/// ```
/// use spectree::{CodeLocation, SpecState, SpecSummary};
///
/// let summary = SpecSummary::new(
///     vec!["a stack".into(), "pops".into()],
///     CodeLocation::new("tests/stack.rs", 4),
///     SpecState::Passed,
/// );
/// assert_eq!(summary.text(), "pops");
/// assert_eq!(summary.full_text(), "a stack pops");
/// assert!(!summary.flaked());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecSummary {
    component_texts: Vec<String>,
    #[serde(skip)]
    group_ids: Vec<NodeId>,
    location: CodeLocation,
    state: SpecState,
    failure: Option<SpecFailure>,
    run_time: Duration,
    attempts: u32,
}

impl SpecSummary {
    /// Create a summary with no failure, zero run time and no attempts.
    #[must_use]
    pub fn new(component_texts: Vec<String>, location: CodeLocation, state: SpecState) -> Self {
        Self {
            component_texts,
            group_ids: Vec::new(),
            location,
            state,
            failure: None,
            run_time: Duration::ZERO,
            attempts: 0,
        }
    }

    /// Labels of the enclosing groups followed by the example's own label.
    #[must_use]
    pub fn component_texts(&self) -> &[String] {
        &self.component_texts
    }

    /// Labels of the enclosing groups only.
    #[must_use]
    pub fn group_texts(&self) -> &[String] {
        self.component_texts
            .split_last()
            .map(|(_, groups)| groups)
            .unwrap_or_default()
    }

    /// Ids of the enclosing groups, outermost first, matching
    /// [`group_texts`](Self::group_texts). Empty for summaries built by hand.
    #[must_use]
    pub fn group_ids(&self) -> &[NodeId] {
        &self.group_ids
    }

    /// Attach the ids of the enclosing groups.
    #[must_use]
    pub fn with_group_ids(mut self, group_ids: Vec<NodeId>) -> Self {
        self.group_ids = group_ids;
        self
    }

    /// The example's own label.
    #[must_use]
    pub fn text(&self) -> &str {
        self.component_texts.last().map_or("", String::as_str)
    }

    /// All labels joined with spaces.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.component_texts.join(" ")
    }

    /// Where the example was declared.
    #[must_use]
    pub const fn location(&self) -> CodeLocation {
        self.location
    }

    /// Final state.
    #[must_use]
    pub const fn state(&self) -> SpecState {
        self.state
    }

    /// Failure details for failed, timed out or runtime-skipped examples.
    #[must_use]
    pub fn failure(&self) -> Option<&SpecFailure> {
        self.failure.as_ref()
    }

    /// Wall time spent across all attempts.
    #[must_use]
    pub const fn run_time(&self) -> Duration {
        self.run_time
    }

    /// Number of attempts made; zero for examples that never ran.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether the example passed only after a retry.
    #[must_use]
    pub const fn flaked(&self) -> bool {
        matches!(self.state, SpecState::Passed) && self.attempts > 1
    }

    pub(crate) fn settle(&mut self, state: SpecState, failure: Option<SpecFailure>) {
        self.state = state;
        self.failure = failure;
    }

    pub(crate) fn set_attempts(&mut self, attempts: u32) {
        self.attempts = attempts;
    }

    pub(crate) fn set_run_time(&mut self, run_time: Duration) {
        self.run_time = run_time;
    }
}

/// Information announced before any example runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteStart {
    description: String,
    total_specs: usize,
    specs_to_run: usize,
    programmatic_focus: bool,
}

impl SuiteStart {
    /// Construct the announcement.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        total_specs: usize,
        specs_to_run: usize,
        programmatic_focus: bool,
    ) -> Self {
        Self {
            description: description.into(),
            total_specs,
            specs_to_run,
            programmatic_focus,
        }
    }

    /// Suite description passed to the entry point.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Every registered example.
    #[must_use]
    pub const fn total_specs(&self) -> usize {
        self.total_specs
    }

    /// Examples that will execute after focus, pending and skip are applied.
    #[must_use]
    pub const fn specs_to_run(&self) -> usize {
        self.specs_to_run
    }

    /// Whether a focused node narrowed the run.
    #[must_use]
    pub const fn programmatic_focus(&self) -> bool {
        self.programmatic_focus
    }
}

/// Aggregate outcome of a suite run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use spectree::{CodeLocation, SpecState, SpecSummary, SuiteSummary};
///
/// let mut summary = SuiteSummary::new("suite", false);
/// let location = CodeLocation::new("tests/suite.rs", 1);
/// summary.record(&SpecSummary::new(vec!["a".into()], location, SpecState::Passed));
/// summary.record(&SpecSummary::new(vec!["b".into()], location, SpecState::Pending));
/// summary.finish(Duration::from_millis(3), false);
/// assert_eq!(summary.total(), 2);
/// assert_eq!(summary.passed(), 1);
/// assert_eq!(summary.pending(), 1);
/// assert!(summary.succeeded());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    description: String,
    total: usize,
    passed: usize,
    failed: usize,
    pending: usize,
    skipped: usize,
    flaked: usize,
    run_time: Duration,
    programmatic_focus: bool,
    succeeded: bool,
}

impl SuiteSummary {
    /// Start an empty tally.
    #[must_use]
    pub fn new(description: impl Into<String>, programmatic_focus: bool) -> Self {
        Self {
            description: description.into(),
            total: 0,
            passed: 0,
            failed: 0,
            pending: 0,
            skipped: 0,
            flaked: 0,
            run_time: Duration::ZERO,
            programmatic_focus,
            succeeded: false,
        }
    }

    /// Fold one example outcome into the tally.
    pub fn record(&mut self, spec: &SpecSummary) {
        self.total += 1;
        match spec.state() {
            SpecState::Passed => self.passed += 1,
            SpecState::Failed | SpecState::TimedOut => self.failed += 1,
            SpecState::Pending => self.pending += 1,
            SpecState::Skipped => self.skipped += 1,
        }
        if spec.flaked() {
            self.flaked += 1;
        }
    }

    /// Close the tally and compute overall success.
    pub fn finish(&mut self, run_time: Duration, fail_on_pending: bool) {
        self.run_time = run_time;
        self.succeeded = self.failed == 0 && !(fail_on_pending && self.pending > 0);
    }

    /// Suite description passed to the entry point.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Every registered example.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Examples that executed, whether they passed or failed.
    #[must_use]
    pub const fn ran(&self) -> usize {
        self.passed + self.failed
    }

    /// Examples that passed.
    #[must_use]
    pub const fn passed(&self) -> usize {
        self.passed
    }

    /// Examples that failed or timed out.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    /// Examples reported pending.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Examples reported skipped.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Examples that passed only after a retry.
    #[must_use]
    pub const fn flaked(&self) -> usize {
        self.flaked
    }

    /// Wall time of the whole run.
    #[must_use]
    pub const fn run_time(&self) -> Duration {
        self.run_time
    }

    /// Whether a focused node narrowed the run.
    #[must_use]
    pub const fn programmatic_focus(&self) -> bool {
        self.programmatic_focus
    }

    /// Whether the run counts as a success.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }
}
