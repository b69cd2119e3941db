//! Unit tests for the Gherkin declaration trait.

use std::time::Duration;

use rstest::rstest;
use spectree::{Group, Mode, Suite};

use super::Gherkin;
use crate::keyword::StepKeyword;

fn registered(suite: &Suite<'_>) -> Vec<(String, Mode)> {
    let mut ids = suite.examples();
    let mut stack = vec![Suite::ROOT];
    while let Some(id) = stack.pop() {
        let Some(node) = suite.node(id) else { continue };
        if node.is_group() {
            if id != Suite::ROOT {
                ids.push(id);
            }
            stack.extend(node.children().iter().copied());
        }
    }
    ids.sort();
    ids.into_iter()
        .filter_map(|id| suite.node(id))
        .map(|node| (node.text().to_owned(), node.mode()))
        .collect()
}

#[test]
fn features_and_scenarios_register_labelled_groups() {
    let mut suite = Suite::new();
    let registered_feature = suite.feature("Login", "As a user\n  I sign in", |feature| {
        feature.scenario("Valid password", |scenario| {
            scenario.given("a user", || {});
            scenario.when("they sign in", || {});
            scenario.then("they see the dashboard", || {});
            scenario.and("a welcome", || {});
            scenario.but("no warning", || {});
        });
    });
    assert!(registered_feature);
    assert_eq!(
        registered(&suite),
        [
            ("Feature: Login\n  As a user\n  I sign in\n".to_owned(), Mode::Normal),
            ("Scenario: Valid password".to_owned(), Mode::Normal),
            ("Given a user".to_owned(), Mode::Normal),
            ("When they sign in".to_owned(), Mode::Normal),
            ("Then they see the dashboard".to_owned(), Mode::Normal),
            ("And a welcome".to_owned(), Mode::Normal),
            ("But no warning".to_owned(), Mode::Normal),
        ]
    );
}

#[rstest]
#[case::normal(Mode::Normal)]
#[case::focused(Mode::Focused)]
#[case::pending(Mode::Pending)]
#[case::skipped(Mode::Skipped)]
fn feature_variants_route_to_their_mode(#[case] mode: Mode) {
    let mut suite = Suite::new();
    let declared = match mode {
        Mode::Normal => suite.feature("F", "", |_| {}),
        Mode::Focused => suite.ffeature("F", "", |_| {}),
        Mode::Pending => suite.pfeature("F", "", |_| {}),
        Mode::Skipped => suite.xfeature("F", "", |_| {}),
    };
    assert!(declared);
    assert_eq!(registered(&suite), [("Feature: F".to_owned(), mode)]);
}

#[rstest]
#[case::normal(Mode::Normal)]
#[case::focused(Mode::Focused)]
#[case::pending(Mode::Pending)]
#[case::skipped(Mode::Skipped)]
fn scenario_variants_route_to_their_mode(#[case] mode: Mode) {
    let mut suite = Suite::new();
    let declared = match mode {
        Mode::Normal => suite.scenario("S", |_| {}),
        Mode::Focused => suite.fscenario("S", |_| {}),
        Mode::Pending => suite.pscenario("S", |_| {}),
        Mode::Skipped => suite.xscenario("S", |_| {}),
    };
    assert!(declared);
    assert_eq!(registered(&suite), [("Scenario: S".to_owned(), mode)]);
}

fn declare_every_step_variant(group: &mut Group<'_, '_>) {
    group.given("g", || {});
    group.fgiven("fg", || {});
    group.pgiven("pg", || {});
    group.xgiven("xg", || {});
    group.when("w", || {});
    group.fwhen("fw", || {});
    group.pwhen("pw", || {});
    group.xwhen("xw", || {});
    group.then("t", || {});
    group.fthen("ft", || {});
    group.pthen("pt", || {});
    group.xthen("xt", || {});
    group.and("a", || {});
    group.fand("fa", || {});
    group.pand("pa", || {});
    group.xand("xa", || {});
    group.but("b", || {});
    group.fbut("fb", || {});
    group.pbut("pb", || {});
    group.xbut("xb", || {});
}

#[test]
fn every_step_variant_routes_to_its_mode() {
    let mut suite = Suite::new();
    suite.scenario("all steps", declare_every_step_variant);
    let steps: Vec<(String, Mode)> = registered(&suite).into_iter().skip(1).collect();
    let expected: Vec<(String, Mode)> = StepKeyword::ALL
        .into_iter()
        .flat_map(|keyword| {
            let stem: String = keyword.as_str().to_ascii_lowercase().chars().take(1).collect();
            [
                (format!("{}{stem}", keyword.prefix()), Mode::Normal),
                (format!("{}f{stem}", keyword.prefix()), Mode::Focused),
                (format!("{}p{stem}", keyword.prefix()), Mode::Pending),
                (format!("{}x{stem}", keyword.prefix()), Mode::Skipped),
            ]
        })
        .collect();
    assert_eq!(steps, expected);
}

#[test]
fn declarations_on_the_suite_root_record_the_caller_location() {
    let mut suite = Suite::new();
    let line = line!() + 1;
    suite.given("at the root", || {});
    let Some(id) = suite.examples().first().copied() else {
        panic!("the step should be registered");
    };
    let location = suite.node(id).map(spectree::Node::location);
    assert_eq!(location.map(|l| l.line()), Some(line));
    assert_eq!(location.map(|l| l.file()), Some(file!()));
}

#[test]
fn timed_steps_forward_the_timeout() {
    let mut suite = Suite::new();
    suite.step_within(StepKeyword::Then, "it is quick", Duration::from_secs(2), || {});
    suite.step_with(StepKeyword::When, Mode::Pending, "later", None, || {});
    let timeouts: Vec<_> = suite
        .examples()
        .into_iter()
        .filter_map(|id| suite.node(id))
        .map(|node| (node.text().to_owned(), node.timeout()))
        .collect();
    assert_eq!(
        timeouts,
        [
            ("Then it is quick".to_owned(), Some(Duration::from_secs(2))),
            ("When later".to_owned(), None),
        ]
    );
}
