//! Structured trip preferences used to enrich free-text queries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Budget label the UI uses to mean "no budget given".
pub const BUDGET_NOT_SPECIFIED: &str = "Not specified";

/// Per-call travel preferences.
///
/// Every field is optional; blank values are treated exactly like absent
/// ones when the augmented prompt is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TravelContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
}

impl TravelContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_dates(mut self, dates: impl Into<String>) -> Self {
        self.dates = Some(dates.into());
        self
    }

    /// Sets the budget, mapping the UI's "Not specified" option to `None`.
    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = normalize_budget(budget.into());
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Destination with surrounding whitespace removed, if not blank.
    pub fn destination(&self) -> Option<&str> {
        non_blank(self.destination.as_deref())
    }

    pub fn dates(&self) -> Option<&str> {
        non_blank(self.dates.as_deref())
    }

    pub fn budget(&self) -> Option<&str> {
        non_blank(self.budget.as_deref())
    }

    /// Non-blank interests in their original order.
    pub fn interests(&self) -> impl Iterator<Item = &str> {
        self.interests
            .iter()
            .filter_map(|interest| non_blank(Some(interest.as_str())))
    }

    /// True when no field would contribute to an augmented prompt.
    pub fn is_empty(&self) -> bool {
        self.destination().is_none()
            && self.dates().is_none()
            && self.budget().is_none()
            && self.interests().next().is_none()
    }
}

/// Maps the "Not specified" UI option (and blanks) to `None`.
pub fn normalize_budget(budget: String) -> Option<String> {
    let trimmed = budget.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(BUDGET_NOT_SPECIFIED) {
        None
    } else {
        Some(budget)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
