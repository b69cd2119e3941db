//! Step keywords and their label prefixes.

use std::fmt;

/// Keyword introducing a step example.
///
/// `And` and `But` are labels only; they run exactly like the primary
/// keywords and carry no extra semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action.
    When,
    /// Assert the expected outcome.
    Then,
    /// Continue the previous step.
    And,
    /// Contrast the previous step.
    But,
}

impl StepKeyword {
    /// Every keyword in Gherkin order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use spectree_gherkin::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::But.as_str(), "But");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Return the label prefix, the keyword followed by one space.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Given => "Given ",
            Self::When => "When ",
            Self::Then => "Then ",
            Self::And => "And ",
            Self::But => "But ",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StepKeyword::Given, "Given")]
    #[case(StepKeyword::When, "When")]
    #[case(StepKeyword::Then, "Then")]
    #[case(StepKeyword::And, "And")]
    #[case(StepKeyword::But, "But")]
    fn displays_the_keyword(#[case] keyword: StepKeyword, #[case] expected: &str) {
        assert_eq!(keyword.to_string(), expected);
    }

    #[test]
    fn prefixes_end_with_a_single_space() {
        for keyword in StepKeyword::ALL {
            assert_eq!(keyword.prefix(), format!("{keyword} "));
        }
    }
}
