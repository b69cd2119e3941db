//! Label construction for features, scenarios and steps.
//!
//! Every builder here is a pure function of its inputs.

use crate::keyword::StepKeyword;

/// Prefix of a feature label.
pub const FEATURE: &str = "Feature: ";
/// Prefix of a scenario label.
pub const SCENARIO: &str = "Scenario: ";
/// Indent placed before every description line.
pub const PADDING: &str = "  ";

/// Append an indented narrative beneath `text`.
///
/// An empty `description` leaves `text` untouched. Otherwise every line of
/// the description is trimmed, indented with [`PADDING`] and terminated by a
/// newline, and the block is placed on the line after `text`. Blank lines
/// keep their indent.
///
/// # Examples
///
/// ```
/// use spectree_gherkin::pad_multiline_description;
///
/// assert_eq!(pad_multiline_description("Login", ""), "Login");
/// assert_eq!(
///     pad_multiline_description("Login", "  As a user,\n\tI can sign in  "),
///     "Login\n  As a user,\n  I can sign in\n",
/// );
/// ```
#[must_use]
pub fn pad_multiline_description(text: &str, description: &str) -> String {
    if description.is_empty() {
        return text.to_owned();
    }
    let mut padded = String::with_capacity(text.len() + description.len() + 1);
    padded.push_str(text);
    padded.push('\n');
    for line in description.lines() {
        padded.push_str(PADDING);
        padded.push_str(line.trim());
        padded.push('\n');
    }
    padded
}

/// Build a feature label, padding any narrative beneath the title.
#[must_use]
pub fn feature_label(text: &str, description: &str) -> String {
    format!("{FEATURE}{}", pad_multiline_description(text, description))
}

/// Build a scenario label.
#[must_use]
pub fn scenario_label(text: &str) -> String {
    format!("{SCENARIO}{text}")
}

/// Build a step label such as `Given a user`.
#[must_use]
pub fn step_label(keyword: StepKeyword, text: &str) -> String {
    format!("{}{text}", keyword.prefix())
}
