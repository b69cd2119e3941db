//! Behavioural tests for the suite entry points.

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};

use rstest::{fixture, rstest};
use serial_test::serial;
use spectree::reporters::{ConsoleStenographer, DefaultReporter, ReporterConfig};
use spectree::{
    FailureRecorder, Mode, PanickingHandle, Reporter, SpecSummary, Suite, SuiteConfig,
    SuiteStart, SuiteSummary, config, run_specs, run_specs_with_config, run_specs_with_reporters,
    run_specs_with_reporters_and_config,
};

struct EventLog<'l> {
    events: &'l RefCell<Vec<String>>,
}

impl Reporter for EventLog<'_> {
    fn suite_will_begin(&mut self, suite: &SuiteStart) {
        self.events
            .borrow_mut()
            .push(format!("begin {}", suite.description()));
    }

    fn spec_will_run(&mut self, spec: &SpecSummary) {
        self.events
            .borrow_mut()
            .push(format!("will run {}", spec.full_text()));
    }

    fn spec_did_complete(&mut self, spec: &SpecSummary) {
        self.events
            .borrow_mut()
            .push(format!("{} {}", spec.state().label(), spec.full_text()));
    }

    fn suite_did_end(&mut self, summary: &SuiteSummary) {
        self.events
            .borrow_mut()
            .push(format!("end succeeded={}", summary.succeeded()));
    }
}

#[fixture]
fn quiet_config() -> SuiteConfig {
    SuiteConfig::default().with_no_color(true).with_succinct(true)
}

#[rstest]
fn reporters_see_every_example_in_order(quiet_config: SuiteConfig) {
    let events = RefCell::new(Vec::new());
    let mut suite = Suite::new();
    suite.describe("a list", Mode::Normal, |group| {
        group.it("pushes", Mode::Normal, || {});
        group.it("pops", Mode::Pending, || {});
    });
    let mut handle = FailureRecorder::default();
    let passed = run_specs_with_reporters_and_config(
        &mut suite,
        &mut handle,
        "lists",
        &quiet_config,
        vec![Box::new(EventLog { events: &events })],
    );
    assert!(passed);
    assert!(!handle.failed());
    assert_eq!(
        events.into_inner(),
        [
            "begin lists",
            "will run a list pushes",
            "passed a list pushes",
            "will run a list pops",
            "pending a list pops",
            "end succeeded=true",
        ]
    );
}

#[rstest]
fn failed_suites_notify_the_handle_once(quiet_config: SuiteConfig) {
    let mut suite = Suite::new();
    suite.it("first failure", Mode::Normal, || panic!("one"));
    suite.it("second failure", Mode::Normal, || panic!("two"));
    let mut handle = FailureRecorder::default();
    let passed = run_specs_with_reporters_and_config(
        &mut suite,
        &mut handle,
        "fails",
        &quiet_config,
        Vec::new(),
    );
    assert!(!passed);
    assert_eq!(handle.failures(), 1);
}

#[rstest]
fn panicking_handle_fails_the_host_test(quiet_config: SuiteConfig) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut suite = Suite::new();
        suite.it("fails", Mode::Normal, || panic!("boom"));
        run_specs_with_reporters_and_config(
            &mut suite,
            &mut PanickingHandle,
            "doomed",
            &quiet_config,
            Vec::new(),
        )
    }));
    let Err(payload) = result else {
        panic!("a failed suite should panic through PanickingHandle");
    };
    let message = spectree::panic_message(payload.as_ref());
    assert!(message.contains("doomed"), "unexpected message: {message}");
    assert!(message.contains("1 of 1"), "unexpected message: {message}");
}

#[rstest]
fn console_reporter_renders_a_run(quiet_config: SuiteConfig) {
    let counter = Cell::new(0);
    let mut output = Vec::new();
    {
        let reporter = DefaultReporter::new(
            ReporterConfig::from(&quiet_config),
            ConsoleStenographer::new(&mut output, false),
        );
        let mut suite = Suite::new();
        suite.describe("arithmetic", Mode::Normal, |group| {
            group.it("starts at one", Mode::Normal, || counter.set(1));
            group.it("adds three", Mode::Normal, || counter.set(counter.get() + 3));
            group.it("equals four", Mode::Normal, || assert_eq!(counter.get(), 4));
        });
        let mut handle = FailureRecorder::default();
        assert!(run_specs_with_reporters_and_config(
            &mut suite,
            &mut handle,
            "arithmetic",
            &quiet_config,
            vec![Box::new(reporter)],
        ));
    }
    let text = String::from_utf8_lossy(&output);
    assert!(text.starts_with("Running Suite: arithmetic\n•••\n"), "{text}");
    assert!(text.contains("SUCCESS! -- 3 Passed | 0 Failed | 0 Pending | 0 Skipped"));
}

#[test]
#[serial]
fn entry_points_read_the_global_override() {
    config::set_global_override(SuiteConfig::default().with_fail_on_pending(true));
    let mut suite = Suite::new();
    suite.it("later", Mode::Pending, || {});
    let mut handle = FailureRecorder::default();
    let passed = run_specs_with_reporters(&mut suite, &mut handle, "pending", Vec::new());
    config::clear_global_override();
    assert!(!passed);
    assert!(handle.failed());
}

#[test]
#[serial]
fn default_run_survives_an_unreachable_stream_host() {
    let config = SuiteConfig::default()
        .with_no_color(true)
        .with_succinct(true)
        .with_stream_host("127.0.0.1:1");
    let mut suite = Suite::new();
    suite.it("still runs", Mode::Normal, || {});
    let mut handle = FailureRecorder::default();
    assert!(run_specs_with_config(&mut suite, &mut handle, "remote", &config));
    assert!(!handle.failed());
}

#[test]
#[serial]
fn run_specs_uses_the_default_reporters() {
    config::set_global_override(SuiteConfig::default().with_no_color(true).with_succinct(true));
    let mut suite = Suite::new();
    suite.it("passes", Mode::Normal, || {});
    let mut handle = FailureRecorder::default();
    let passed = run_specs(&mut suite, &mut handle, "defaults");
    config::clear_global_override();
    assert!(passed);
}
