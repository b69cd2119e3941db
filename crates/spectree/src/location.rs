//! Source locations recorded when nodes are declared.

use std::fmt;
use std::panic::Location;

use serde::Serialize;

/// File and line where a group or example was declared.
///
/// # Examples
///
/// ```
/// use spectree::CodeLocation;
///
/// let location = CodeLocation::caller();
/// assert!(location.file().ends_with(".rs"));
/// assert!(location.line() > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeLocation {
    file: &'static str,
    line: u32,
}

impl CodeLocation {
    /// Construct a location from explicit values.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Capture the location of the caller.
    ///
    /// Declaration methods are `#[track_caller]`, so the captured location is
    /// the user's call site rather than the engine's.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    /// Source file path.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// One-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
