//! Execution modes shared by groups and examples.

use std::fmt;

use serde::Serialize;

/// How a registered group or example takes part in a run.
///
/// A mode applies to the node it is set on and to everything nested beneath
/// it. When both apply, `Pending` takes precedence over `Skipped`.
///
/// # Examples
///
/// ```
/// use spectree::Mode;
///
/// assert_eq!(Mode::default(), Mode::Normal);
/// assert_eq!(Mode::Focused.as_str(), "focused");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Run as part of the suite.
    #[default]
    Normal,
    /// Run exclusively: unfocused examples are skipped while any focus exists.
    Focused,
    /// Registered but not run; reported as pending.
    Pending,
    /// Registered but not run; reported as skipped.
    Skipped,
}

impl Mode {
    /// Return the lowercase label for the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Focused => "focused",
            Self::Pending => "pending",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
