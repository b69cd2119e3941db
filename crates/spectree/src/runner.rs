//! Sequential execution of a suite tree.
//!
//! The runner first plans the run (which examples execute, which are pending
//! or skipped, whether focus applies), then executes examples in declaration
//! order, notifying every reporter along the way.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::config::SuiteConfig;
use crate::mode::Mode;
use crate::panic::panic_message;
use crate::reporters::Reporter;
use crate::skip::SkipRequest;
use crate::summary::{Phase, SpecFailure, SpecState, SpecSummary, SuiteStart, SuiteSummary};
use crate::tree::{HookKind, NodeId, NodeKind, Suite};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Run,
    Pending,
    Skipped,
}

struct PlannedSpec {
    id: NodeId,
    disposition: Disposition,
}

struct Plan {
    specs: Vec<PlannedSpec>,
    programmatic_focus: bool,
}

enum Interruption {
    Failed(SpecFailure),
    TimedOut(SpecFailure),
    Skipped(SpecFailure),
}

/// Runs a suite and reports progress.
///
/// # Examples
///
/// ```
/// use spectree::{Mode, SpecRunner, Suite, SuiteConfig};
///
/// let mut suite = Suite::new();
/// suite.describe("maths", Mode::Normal, |group| {
///     group.it("adds", Mode::Normal, || assert_eq!(2 + 2, 4));
///     group.it("is pending", Mode::Pending, || unreachable!("pending examples never run"));
/// });
///
/// let summary = SpecRunner::new("maths", &SuiteConfig::default(), Vec::new()).run(&mut suite);
/// assert_eq!(summary.passed(), 1);
/// assert_eq!(summary.pending(), 1);
/// assert!(summary.succeeded());
/// ```
pub struct SpecRunner<'r> {
    description: String,
    flake_attempts: u32,
    fail_on_pending: bool,
    reporters: Vec<Box<dyn Reporter + 'r>>,
}

impl<'r> SpecRunner<'r> {
    /// Prepare a run with the given reporters.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        config: &SuiteConfig,
        reporters: Vec<Box<dyn Reporter + 'r>>,
    ) -> Self {
        Self {
            description: description.into(),
            flake_attempts: config.flake_attempts().max(1),
            fail_on_pending: config.fail_on_pending(),
            reporters,
        }
    }

    /// Execute every planned example and return the suite summary.
    pub fn run(mut self, suite: &mut Suite<'_>) -> SuiteSummary {
        let plan = plan(suite);
        let specs_to_run = plan
            .specs
            .iter()
            .filter(|spec| spec.disposition == Disposition::Run)
            .count();
        let start = SuiteStart::new(
            self.description.clone(),
            plan.specs.len(),
            specs_to_run,
            plan.programmatic_focus,
        );
        debug!(
            "running suite {:?}: {specs_to_run} of {} examples",
            self.description,
            plan.specs.len()
        );
        for reporter in &mut self.reporters {
            reporter.suite_will_begin(&start);
        }

        let started = Instant::now();
        let mut totals = SuiteSummary::new(self.description.clone(), plan.programmatic_focus);
        for planned in &plan.specs {
            let Some(node) = suite.node(planned.id) else {
                continue;
            };
            let group_ids = suite
                .ancestors(planned.id)
                .into_iter()
                .filter(|group| *group != Suite::ROOT)
                .collect();
            let mut spec = SpecSummary::new(
                suite.component_texts(planned.id),
                node.location(),
                SpecState::Pending,
            )
            .with_group_ids(group_ids);
            for reporter in &mut self.reporters {
                reporter.spec_will_run(&spec);
            }
            match planned.disposition {
                Disposition::Run => self.execute(suite, planned.id, &mut spec),
                Disposition::Pending => spec.settle(SpecState::Pending, None),
                Disposition::Skipped => spec.settle(SpecState::Skipped, None),
            }
            totals.record(&spec);
            for reporter in &mut self.reporters {
                reporter.spec_did_complete(&spec);
            }
        }
        totals.finish(started.elapsed(), self.fail_on_pending);

        for reporter in &mut self.reporters {
            reporter.suite_did_end(&totals);
        }
        totals
    }

    fn execute(&self, suite: &mut Suite<'_>, id: NodeId, spec: &mut SpecSummary) {
        let groups = suite.ancestors(id);
        let timeout = suite.node(id).and_then(crate::tree::Node::timeout);
        let started = Instant::now();
        for attempt in 1..=self.flake_attempts {
            spec.set_attempts(attempt);
            trace!("attempt {attempt} of {:?}", spec.full_text());
            match run_attempt(suite, &groups, id, timeout) {
                Ok(()) => {
                    spec.settle(SpecState::Passed, None);
                    break;
                }
                Err(Interruption::Skipped(reason)) => {
                    spec.settle(SpecState::Skipped, Some(reason));
                    break;
                }
                Err(Interruption::Failed(failure)) => {
                    spec.settle(SpecState::Failed, Some(failure));
                }
                Err(Interruption::TimedOut(failure)) => {
                    spec.settle(SpecState::TimedOut, Some(failure));
                }
            }
        }
        spec.set_run_time(started.elapsed());
    }
}

fn is_focused(suite: &Suite<'_>, id: NodeId) -> bool {
    suite.node(id).is_some_and(|node| node.mode() == Mode::Focused)
}

/// Focused groups that enclose another focused node. The innermost focus
/// wins, so these groups plan as unfocused.
fn overridden_focus(suite: &Suite<'_>) -> HashSet<NodeId> {
    suite
        .node_ids()
        .filter(|id| is_focused(suite, *id))
        .flat_map(|id| suite.ancestors(id))
        .filter(|ancestor| is_focused(suite, *ancestor))
        .collect()
}

fn plan(suite: &Suite<'_>) -> Plan {
    let overridden = overridden_focus(suite);
    let mut candidates = Vec::new();
    for id in suite.examples() {
        let path: Vec<(NodeId, Mode)> = suite
            .ancestors(id)
            .into_iter()
            .chain(std::iter::once(id))
            .filter_map(|node_id| suite.node(node_id).map(|node| (node_id, node.mode())))
            .collect();
        let has = |mode: Mode| path.iter().any(|(_, node_mode)| *node_mode == mode);
        let disposition = if has(Mode::Pending) {
            Disposition::Pending
        } else if has(Mode::Skipped) {
            Disposition::Skipped
        } else {
            Disposition::Run
        };
        let focused = path
            .iter()
            .any(|(node_id, mode)| *mode == Mode::Focused && !overridden.contains(node_id));
        candidates.push((id, disposition, focused));
    }

    let programmatic_focus = candidates
        .iter()
        .any(|(_, disposition, focused)| *disposition == Disposition::Run && *focused);
    let specs = candidates
        .into_iter()
        .map(|(id, disposition, focused)| {
            let disposition = if programmatic_focus && disposition == Disposition::Run && !focused
            {
                Disposition::Skipped
            } else {
                disposition
            };
            PlannedSpec { id, disposition }
        })
        .collect();
    Plan {
        specs,
        programmatic_focus,
    }
}

fn run_attempt(
    suite: &mut Suite<'_>,
    groups: &[NodeId],
    id: NodeId,
    timeout: Option<Duration>,
) -> Result<(), Interruption> {
    let mut outcome = groups
        .iter()
        .try_for_each(|group| run_hooks(suite, *group, HookKind::BeforeEach, Phase::BeforeEach));
    if outcome.is_ok() {
        outcome = groups.iter().try_for_each(|group| {
            run_hooks(suite, *group, HookKind::JustBeforeEach, Phase::JustBeforeEach)
        });
    }
    if outcome.is_ok() {
        outcome = run_body(suite, id, timeout);
    }
    for group in groups.iter().rev() {
        let after = run_hooks(suite, *group, HookKind::AfterEach, Phase::AfterEach);
        if outcome.is_ok() {
            outcome = after;
        }
    }
    outcome
}

fn run_hooks(
    suite: &mut Suite<'_>,
    group: NodeId,
    kind: HookKind,
    phase: Phase,
) -> Result<(), Interruption> {
    let Some(node) = suite.node_mut(group) else {
        return Ok(());
    };
    let NodeKind::Group { hooks, .. } = &mut node.kind else {
        return Ok(());
    };
    let mut outcome = Ok(());
    for hook in hooks.list_mut(kind) {
        let result = guarded(&mut **hook, phase);
        // after_each hooks all run; earlier phases stop at the first failure.
        if outcome.is_ok() {
            outcome = result;
        }
        if outcome.is_err() && phase != Phase::AfterEach {
            break;
        }
    }
    outcome
}

fn run_body(
    suite: &mut Suite<'_>,
    id: NodeId,
    timeout: Option<Duration>,
) -> Result<(), Interruption> {
    let Some(node) = suite.node_mut(id) else {
        return Ok(());
    };
    let NodeKind::Example { body, .. } = &mut node.kind else {
        return Ok(());
    };
    let started = Instant::now();
    guarded(&mut **body, Phase::Body)?;
    let elapsed = started.elapsed();
    match timeout {
        Some(limit) if elapsed > limit => Err(Interruption::TimedOut(SpecFailure::new(
            format!(
                "timed out after {:.3}s (limit {:.3}s)",
                elapsed.as_secs_f64(),
                limit.as_secs_f64()
            ),
            Phase::Body,
        ))),
        _ => Ok(()),
    }
}

fn guarded<F: FnMut() + ?Sized>(callback: &mut F, phase: Phase) -> Result<(), Interruption> {
    panic::catch_unwind(AssertUnwindSafe(callback)).map_err(|payload| {
        match payload.downcast::<SkipRequest>() {
            Ok(request) => Interruption::Skipped(SpecFailure::new(
                request.into_message().unwrap_or_default(),
                phase,
            )),
            Err(payload) => {
                Interruption::Failed(SpecFailure::new(panic_message(payload.as_ref()), phase))
            }
        }
    })
}
