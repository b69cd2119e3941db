//! Minimal spec-tree test engine.
//!
//! Suites are declared through an explicit [`Suite`] builder: groups and
//! examples are registered into an arena in declaration order, each tagged
//! with a [`Mode`]. Nothing runs until one of the `run_specs*` entry points
//! walks the tree, drives the registered [`Reporter`]s and returns whether
//! every executed example passed.
//!
//! # Examples
//!
//! ```
//! use std::cell::Cell;
//!
//! use spectree::{FailureRecorder, Mode, Suite, run_specs_with_reporters};
//!
//! let counter = Cell::new(0);
//! let mut suite = Suite::new();
//! suite.describe("a counter", Mode::Normal, |group| {
//!     group.it("starts at one", Mode::Normal, || counter.set(1));
//!     group.it("has been incremented", Mode::Normal, || assert_eq!(counter.get(), 1));
//! });
//!
//! let mut handle = FailureRecorder::default();
//! assert!(run_specs_with_reporters(&mut suite, &mut handle, "counter", Vec::new()));
//! assert!(!handle.failed());
//! ```

pub mod config;
mod entry;
mod error;
mod location;
mod mode;
mod panic;
pub mod reporters;
mod runner;
mod skip;
mod summary;
mod tree;

pub use config::SuiteConfig;
pub use entry::{
    FailureRecorder, PanickingHandle, TestHandle, run_specs, run_specs_with_config,
    run_specs_with_reporters, run_specs_with_reporters_and_config,
};
pub use error::{ConfigError, ReportError};
pub use location::CodeLocation;
pub use mode::Mode;
pub use panic::panic_message;
pub use reporters::Reporter;
pub use runner::SpecRunner;
pub use skip::{SkipRequest, skip};
pub use summary::{Phase, SpecFailure, SpecState, SpecSummary, SuiteStart, SuiteSummary};
pub use tree::{Group, Node, NodeId, Suite};
