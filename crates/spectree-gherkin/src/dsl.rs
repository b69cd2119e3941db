//! Gherkin-named declarations for spectree suites.
//!
//! [`Gherkin`] is implemented for both the [`Suite`] root and nested
//! [`Group`] scopes. Each declaration builds its label and forwards to the
//! engine primitive of the requested [`Mode`].

use std::time::Duration;

use spectree::{Group, Mode, Suite};

use crate::keyword::StepKeyword;
use crate::label::{feature_label, scenario_label, step_label};

macro_rules! step_aliases {
    ($keyword:ident, $normal:ident, $focused:ident, $pending:ident, $skipped:ident) => {
        #[doc = concat!("Register a `", stringify!($keyword), "` step.")]
        #[track_caller]
        fn $normal(&mut self, text: &str, body: impl FnMut() + 'a) -> bool {
            self.step_with(StepKeyword::$keyword, Mode::Normal, text, None, body)
        }

        #[doc = concat!("Register a focused `", stringify!($keyword), "` step.")]
        #[track_caller]
        fn $focused(&mut self, text: &str, body: impl FnMut() + 'a) -> bool {
            self.step_with(StepKeyword::$keyword, Mode::Focused, text, None, body)
        }

        #[doc = concat!("Register a pending `", stringify!($keyword), "` step.")]
        #[track_caller]
        fn $pending(&mut self, text: &str, body: impl FnMut() + 'a) -> bool {
            self.step_with(StepKeyword::$keyword, Mode::Pending, text, None, body)
        }

        #[doc = concat!("Register a skipped `", stringify!($keyword), "` step.")]
        #[track_caller]
        fn $skipped(&mut self, text: &str, body: impl FnMut() + 'a) -> bool {
            self.step_with(StepKeyword::$keyword, Mode::Skipped, text, None, body)
        }
    };
}

/// Feature, scenario and step declarations.
///
/// Every method returns the engine's registration flag unchanged.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
///
/// use spectree_gherkin::{FailureRecorder, Gherkin, Suite, run_specs_with_reporters};
///
/// let value = Cell::new(0);
/// let mut suite = Suite::new();
/// suite.feature("Counting", "As a counter\nI add numbers", |feature| {
///     feature.scenario("Adding", |scenario| {
///         scenario.given("I start at one", || value.set(1));
///         scenario.and("I add three", || value.set(value.get() + 3));
///         scenario.then("I have four", || assert_eq!(value.get(), 4));
///     });
/// });
///
/// let mut handle = FailureRecorder::default();
/// assert!(run_specs_with_reporters(&mut suite, &mut handle, "counting", Vec::new()));
/// ```
pub trait Gherkin<'a> {
    /// Register a feature group in `mode`, with `description` padded beneath
    /// the title.
    fn feature_with(
        &mut self,
        mode: Mode,
        text: &str,
        description: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool;

    /// Register a scenario group in `mode`.
    fn scenario_with(
        &mut self,
        mode: Mode,
        text: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool;

    /// Register a step example in `mode`, optionally bounded by `timeout`.
    fn step_with(
        &mut self,
        keyword: StepKeyword,
        mode: Mode,
        text: &str,
        timeout: Option<Duration>,
        body: impl FnMut() + 'a,
    ) -> bool;

    /// Register a feature.
    #[track_caller]
    fn feature(
        &mut self,
        text: &str,
        description: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.feature_with(Mode::Normal, text, description, body)
    }

    /// Register a focused feature.
    #[track_caller]
    fn ffeature(
        &mut self,
        text: &str,
        description: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.feature_with(Mode::Focused, text, description, body)
    }

    /// Register a pending feature.
    #[track_caller]
    fn pfeature(
        &mut self,
        text: &str,
        description: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.feature_with(Mode::Pending, text, description, body)
    }

    /// Register a skipped feature.
    #[track_caller]
    fn xfeature(
        &mut self,
        text: &str,
        description: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.feature_with(Mode::Skipped, text, description, body)
    }

    /// Register a scenario.
    #[track_caller]
    fn scenario(&mut self, text: &str, body: impl FnOnce(&mut Group<'_, 'a>)) -> bool {
        self.scenario_with(Mode::Normal, text, body)
    }

    /// Register a focused scenario.
    #[track_caller]
    fn fscenario(&mut self, text: &str, body: impl FnOnce(&mut Group<'_, 'a>)) -> bool {
        self.scenario_with(Mode::Focused, text, body)
    }

    /// Register a pending scenario.
    #[track_caller]
    fn pscenario(&mut self, text: &str, body: impl FnOnce(&mut Group<'_, 'a>)) -> bool {
        self.scenario_with(Mode::Pending, text, body)
    }

    /// Register a skipped scenario.
    #[track_caller]
    fn xscenario(&mut self, text: &str, body: impl FnOnce(&mut Group<'_, 'a>)) -> bool {
        self.scenario_with(Mode::Skipped, text, body)
    }

    /// Register a step that fails as timed out when its body overruns
    /// `timeout`.
    #[track_caller]
    fn step_within(
        &mut self,
        keyword: StepKeyword,
        text: &str,
        timeout: Duration,
        body: impl FnMut() + 'a,
    ) -> bool {
        self.step_with(keyword, Mode::Normal, text, Some(timeout), body)
    }

    step_aliases!(Given, given, fgiven, pgiven, xgiven);
    step_aliases!(When, when, fwhen, pwhen, xwhen);
    step_aliases!(Then, then, fthen, pthen, xthen);
    step_aliases!(And, and, fand, pand, xand);
    step_aliases!(But, but, fbut, pbut, xbut);
}

impl<'a> Gherkin<'a> for Group<'_, 'a> {
    #[track_caller]
    fn feature_with(
        &mut self,
        mode: Mode,
        text: &str,
        description: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.describe(feature_label(text, description), mode, body)
    }

    #[track_caller]
    fn scenario_with(
        &mut self,
        mode: Mode,
        text: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.describe(scenario_label(text), mode, body)
    }

    #[track_caller]
    fn step_with(
        &mut self,
        keyword: StepKeyword,
        mode: Mode,
        text: &str,
        timeout: Option<Duration>,
        body: impl FnMut() + 'a,
    ) -> bool {
        let label = step_label(keyword, text);
        match timeout {
            Some(limit) => self.it_with_timeout(label, mode, limit, body),
            None => self.it(label, mode, body),
        }
    }
}

impl<'a> Gherkin<'a> for Suite<'a> {
    #[track_caller]
    fn feature_with(
        &mut self,
        mode: Mode,
        text: &str,
        description: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.root().feature_with(mode, text, description, body)
    }

    #[track_caller]
    fn scenario_with(
        &mut self,
        mode: Mode,
        text: &str,
        body: impl FnOnce(&mut Group<'_, 'a>),
    ) -> bool {
        self.root().scenario_with(mode, text, body)
    }

    #[track_caller]
    fn step_with(
        &mut self,
        keyword: StepKeyword,
        mode: Mode,
        text: &str,
        timeout: Option<Duration>,
        body: impl FnMut() + 'a,
    ) -> bool {
        self.root().step_with(keyword, mode, text, timeout, body)
    }
}

#[cfg(test)]
mod tests;
