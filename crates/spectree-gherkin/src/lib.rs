//! Gherkin naming for spectree suites.
//!
//! Features, scenarios and `Given`/`When`/`Then`/`And`/`But` steps are plain
//! spectree groups and examples whose labels carry the Gherkin keyword. The
//! [`Gherkin`] trait adds the declarations to a [`Suite`] and to every nested
//! [`Group`]; [`run_gherkin_specs`] runs the suite with a reporter that prints
//! the result as readable prose.
//!
//! # Examples
//!
//! ```
//! use std::cell::Cell;
//!
//! use spectree_gherkin::{Gherkin, PanickingHandle, Suite, run_gherkin_specs};
//!
//! let value = Cell::new(0);
//! let mut suite = Suite::new();
//! suite.feature(
//!     "Do Something",
//!     "So that I can accomplish some business value,
//!      As an actor,
//!      I can perform some action",
//!     |feature| {
//!         feature.scenario("Success", |scenario| {
//!             scenario.given("I try something", || value.set(value.get() + 1));
//!             scenario.and("I try harder", || value.set(value.get() + 3));
//!             scenario.then("it works", || assert_eq!(value.get(), 4));
//!         });
//!     },
//! );
//!
//! assert!(run_gherkin_specs(&mut suite, &mut PanickingHandle, "Gherkin Suite"));
//! ```

mod dsl;
mod keyword;
mod label;
mod run;
mod stenographer;

pub use dsl::Gherkin;
pub use keyword::StepKeyword;
pub use label::{
    FEATURE, PADDING, SCENARIO, feature_label, pad_multiline_description, scenario_label,
    step_label,
};
pub use run::{build_gherkin_reporter, run_gherkin_specs, run_gherkin_specs_with_writer};
pub use stenographer::GherkinStenographer;

pub use spectree::{
    FailureRecorder, Group, Mode, PanickingHandle, Suite, SuiteConfig, TestHandle, run_specs,
    run_specs_with_reporters, skip,
};
