//! Unit tests for suite tree registration.

use std::time::Duration;

use rstest::{fixture, rstest};

use super::{Suite, NodeId};
use crate::mode::Mode;

#[fixture]
fn nested_suite() -> Suite<'static> {
    let mut suite = Suite::new();
    suite.describe("outer", Mode::Normal, |outer| {
        outer.it("first", Mode::Normal, || {});
        outer.describe("inner", Mode::Pending, |inner| {
            inner.it("second", Mode::Focused, || {});
        });
        outer.it("third", Mode::Skipped, || {});
    });
    suite.it("top level", Mode::Normal, || {});
    suite
}

fn text_of(suite: &Suite<'_>, id: NodeId) -> String {
    suite
        .node(id)
        .map(|node| node.text().to_owned())
        .unwrap_or_default()
}

#[test]
fn new_suite_only_holds_the_root() {
    let suite = Suite::new();
    assert!(suite.is_empty());
    let Some(root) = suite.node(Suite::ROOT) else {
        panic!("root node should exist");
    };
    assert!(root.is_group());
    assert_eq!(root.parent(), None);
    assert!(suite.examples().is_empty());
}

#[rstest]
fn examples_follow_declaration_order(nested_suite: Suite<'static>) {
    let texts: Vec<_> = nested_suite
        .examples()
        .into_iter()
        .map(|id| text_of(&nested_suite, id))
        .collect();
    assert_eq!(texts, ["first", "second", "third", "top level"]);
    assert_eq!(nested_suite.len(), 6);
}

#[rstest]
fn component_texts_skip_the_root(nested_suite: Suite<'static>) {
    let examples = nested_suite.examples();
    let Some(second) = examples.get(1) else {
        panic!("expected a second example");
    };
    assert_eq!(
        nested_suite.component_texts(*second),
        ["outer", "inner", "second"]
    );
    let Some(top) = examples.last() else {
        panic!("expected a top-level example");
    };
    assert_eq!(nested_suite.component_texts(*top), ["top level"]);
}

#[rstest]
fn modes_are_recorded_per_node(nested_suite: Suite<'static>) {
    let modes: Vec<_> = nested_suite
        .examples()
        .into_iter()
        .filter_map(|id| nested_suite.node(id).map(super::Node::mode))
        .collect();
    assert_eq!(
        modes,
        [Mode::Normal, Mode::Focused, Mode::Skipped, Mode::Normal]
    );
}

#[rstest]
fn ancestors_run_outermost_first(nested_suite: Suite<'static>) {
    let examples = nested_suite.examples();
    let Some(second) = examples.get(1) else {
        panic!("expected a second example");
    };
    let ancestors: Vec<_> = nested_suite
        .ancestors(*second)
        .into_iter()
        .map(|id| text_of(&nested_suite, id))
        .collect();
    assert_eq!(ancestors, ["", "outer", "inner"]);
}

#[test]
fn declarations_capture_the_caller_location() {
    let mut suite = Suite::new();
    let line = line!() + 1;
    suite.it("located", Mode::Normal, || {});
    let Some(id) = suite.examples().first().copied() else {
        panic!("example should be registered");
    };
    let Some(node) = suite.node(id) else {
        panic!("node should exist");
    };
    assert!(node.location().file().ends_with("tests.rs"));
    assert_eq!(node.location().line(), line);
}

#[test]
fn timeouts_are_stored_on_examples_only() {
    let mut suite = Suite::new();
    suite.describe("group", Mode::Normal, |group| {
        group.it_with_timeout("slow", Mode::Normal, Duration::from_millis(5), || {});
    });
    let Some(id) = suite.examples().first().copied() else {
        panic!("example should be registered");
    };
    assert_eq!(
        suite.node(id).and_then(super::Node::timeout),
        Some(Duration::from_millis(5))
    );
    let group = suite.ancestors(id).last().copied();
    assert_eq!(
        group.and_then(|group| suite.node(group)).and_then(super::Node::timeout),
        None
    );
}

#[test]
fn declarations_report_success() {
    let mut suite = Suite::new();
    assert!(suite.describe("group", Mode::Normal, |group| {
        assert!(group.it("example", Mode::Normal, || {}));
    }));
}
