//! Unit tests for the Gherkin stenographer.

use std::time::Duration;

use rstest::{fixture, rstest};
use spectree::reporters::Stenographer;
use spectree::{CodeLocation, Mode, SpecState, SpecSummary, Suite, SuiteConfig, SuiteStart};

use super::GherkinStenographer;
use crate::dsl::Gherkin;
use crate::run::build_gherkin_reporter;

fn step(groups: &[&str], text: &str, state: SpecState) -> SpecSummary {
    let mut texts: Vec<String> = groups.iter().map(|group| (*group).to_owned()).collect();
    texts.push(text.to_owned());
    SpecSummary::new(texts, CodeLocation::new("tests/login.rs", 12), state)
}

#[fixture]
fn stenographer() -> GherkinStenographer<Vec<u8>> {
    GherkinStenographer::new(Vec::new(), false, true)
}

fn output(stenographer: GherkinStenographer<Vec<u8>>) -> String {
    String::from_utf8(stenographer.into_inner())
        .unwrap_or_else(|error| panic!("output should be UTF-8: {error}"))
}

#[rstest]
fn groups_are_printed_once_and_steps_are_indented(
    mut stenographer: GherkinStenographer<Vec<u8>>,
) {
    let feature = "Feature: Login\n  As a user\n  I sign in\n";
    let results = [
        step(&[feature, "Scenario: Valid"], "Given a user", SpecState::Passed),
        step(&[feature, "Scenario: Valid"], "Then it works", SpecState::Pending),
        step(&[feature, "Scenario: Locked"], "Given a locked user", SpecState::Skipped),
    ];
    for result in &results {
        let outcome = match result.state() {
            SpecState::Passed => stenographer.announce_success(result, true),
            SpecState::Pending => stenographer.announce_pending(result, true),
            _ => stenographer.announce_skipped(result, true),
        };
        assert!(outcome.is_ok());
    }
    assert_eq!(
        output(stenographer),
        "Feature: Login\n  \
         As a user\n  \
         I sign in\n\
         \n  \
         Scenario: Valid\n    \
         ✓ Given a user\n    \
         - Then it works\n  \
         Scenario: Locked\n    \
         ~ Given a locked user\n"
    );
}

#[test]
fn failures_show_the_phase_and_message() {
    let mut buffer = Vec::new();
    let mut handle = spectree::FailureRecorder::default();
    {
        let config = SuiteConfig::default().with_no_color(true).with_succinct(true);
        let reporter = build_gherkin_reporter(&config, &mut buffer);
        let mut suite = Suite::new();
        suite.scenario("Broken", |scenario| {
            scenario.then("it fails", || panic!("expected 4, got 3"));
        });
        assert!(!spectree::run_specs_with_reporters_and_config(
            &mut suite,
            &mut handle,
            "failing",
            &config,
            vec![Box::new(reporter)],
        ));
    }
    assert!(handle.failed());
    let text = String::from_utf8_lossy(&buffer);
    assert!(
        text.contains(
            "Scenario: Broken\n  ✗ Then it fails\n    failed in body: expected 4, got 3\n"
        ),
        "{text}"
    );
    assert!(
        text.contains("FAIL! -- 0 Passed | 1 Failed | 0 Pending | 0 Skipped"),
        "{text}"
    );
}

#[rstest]
fn verbose_failures_show_the_declaration_site(mut stenographer: GherkinStenographer<Vec<u8>>) {
    let failed = step(&["Scenario: Broken"], "Then it fails", SpecState::TimedOut);
    assert!(stenographer.announce_failure(&failed, false).is_ok());
    assert_eq!(
        output(stenographer),
        "Scenario: Broken\n  ✗ Then it fails\n    tests/login.rs:12\n"
    );
}

#[rstest]
fn suite_header_reports_the_plan(mut stenographer: GherkinStenographer<Vec<u8>>) {
    let start = SuiteStart::new("Login Suite", 5, 3, false);
    assert!(stenographer.announce_suite(&start, false).is_ok());
    assert_eq!(
        output(stenographer),
        "Running Suite: Login Suite\nWill run 3 of 5 specs\n\n"
    );
}

#[test]
fn flaky_steps_are_noted_when_enabled() {
    let mut buffer = Vec::new();
    {
        let config = SuiteConfig::default()
            .with_no_color(true)
            .with_succinct(true)
            .with_flake_attempts(2);
        let reporter = build_gherkin_reporter(&config, &mut buffer);
        let mut attempts = 0;
        let mut suite = Suite::new();
        suite.given("a flaky service", move || {
            attempts += 1;
            assert!(attempts > 1, "first call fails");
        });
        let mut handle = spectree::FailureRecorder::default();
        assert!(spectree::run_specs_with_reporters_and_config(
            &mut suite,
            &mut handle,
            "flakes",
            &config,
            vec![Box::new(reporter)],
        ));
    }
    let text = String::from_utf8_lossy(&buffer);
    assert!(text.contains("✓ Given a flaky service\n  flaked: passed on attempt 2\n"), "{text}");
    assert!(text.contains("| 1 Flaked"), "{text}");
}

#[test]
fn colour_wraps_markers_in_escape_codes() {
    colored::control::set_override(true);
    let mut stenographer = GherkinStenographer::new(Vec::new(), true, false);
    let passed = step(&[], "Given colour", SpecState::Passed);
    assert!(stenographer.announce_success(&passed, true).is_ok());
    colored::control::unset_override();
    let rendered = output(stenographer);
    assert!(rendered.contains("\u{1b}["), "{rendered:?}");
    assert!(rendered.contains("✓ Given colour"));
}

#[test]
fn runtime_skips_show_their_reason() {
    let mut buffer = Vec::new();
    {
        let config = SuiteConfig::default().with_no_color(true).with_succinct(true);
        let reporter = build_gherkin_reporter(&config, &mut buffer);
        let mut suite = Suite::new();
        suite.step_with(
            crate::StepKeyword::When,
            Mode::Normal,
            "the network is down",
            Some(Duration::from_secs(5)),
            || spectree::skip("offline"),
        );
        let mut handle = spectree::FailureRecorder::default();
        assert!(spectree::run_specs_with_reporters_and_config(
            &mut suite,
            &mut handle,
            "skips",
            &config,
            vec![Box::new(reporter)],
        ));
    }
    let text = String::from_utf8_lossy(&buffer);
    assert!(text.contains("~ When the network is down\n  skipped: offline\n"), "{text}");
}

#[test]
fn same_named_scenarios_each_get_a_header() {
    let mut buffer = Vec::new();
    {
        let config = SuiteConfig::default().with_no_color(true).with_succinct(true);
        let reporter = build_gherkin_reporter(&config, &mut buffer);
        let mut suite = Suite::new();
        suite.feature("Retries", "", |feature| {
            feature.scenario("Retry", |scenario| {
                scenario.given("first attempt", || {});
            });
            feature.scenario("Retry", |scenario| {
                scenario.given("second attempt", || {});
            });
        });
        let mut handle = spectree::FailureRecorder::default();
        assert!(spectree::run_specs_with_reporters_and_config(
            &mut suite,
            &mut handle,
            "retries",
            &config,
            vec![Box::new(reporter)],
        ));
    }
    let text = String::from_utf8_lossy(&buffer);
    assert_eq!(text.matches("Scenario: Retry").count(), 2, "{text}");
    assert!(
        text.contains(
            "Feature: Retries\n  \
             Scenario: Retry\n    \
             ✓ Given first attempt\n  \
             Scenario: Retry\n    \
             ✓ Given second attempt\n"
        ),
        "{text}"
    );
}
