//! Runtime skipping from inside hooks and example bodies.
//!
//! [`skip`] unwinds with a [`SkipRequest`] payload. The runner intercepts the
//! unwind, marks the example as skipped and runs the remaining `after_each`
//! hooks. `resume_unwind` bypasses the panic hook, so a skip prints nothing.

use std::panic;

/// Marker carried by the unwind that requests the current example be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRequest {
    message: Option<String>,
}

impl SkipRequest {
    /// Create a new skip request with an optional message.
    #[must_use]
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }

    /// Borrow the message supplied when skipping, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Consume the request, returning the original message.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message
    }
}

/// Skip the currently running example.
///
/// Must be called from a hook or example body executed by the runner; called
/// anywhere else it unwinds like an ordinary panic.
///
/// # Examples
///
/// ```
/// use spectree::{Mode, SpecRunner, Suite, SuiteConfig};
///
/// let mut suite = Suite::new();
/// suite.it("needs a database", Mode::Normal, || spectree::skip("no database"));
///
/// let summary = SpecRunner::new("skips", &SuiteConfig::default(), Vec::new()).run(&mut suite);
/// assert_eq!(summary.skipped(), 1);
/// assert!(summary.succeeded());
/// ```
pub fn skip(message: impl Into<String>) -> ! {
    let message = message.into();
    let message = (!message.is_empty()).then_some(message);
    panic::resume_unwind(Box::new(SkipRequest::new(message)))
}
