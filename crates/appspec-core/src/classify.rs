//! Transcript classification
//!
//! Maps free text to a fallback template category by keyword presence.
//! The rules are a declarative, ordered table so categories and
//! keywords extend by data changes alone. First match wins; anything
//! unmatched (including the empty string) is `Generic`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse template category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Invoicing, clients, quotes
    Sales,
    /// Todos and task tracking
    Tasks,
    /// Anything else
    Generic,
}

impl Category {
    /// Stable tag used in request presets and response envelopes
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sales => "sales",
            Category::Tasks => "tasks",
            Category::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(Category::Sales),
            "tasks" => Ok(Category::Tasks),
            "generic" => Ok(Category::Generic),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Preset tag did not name a known category
#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// One classification rule: any keyword hit selects the category
struct Rule {
    category: Category,
    keywords: &'static [&'static str],
}

/// Ordered rule table; sales is checked before tasks by contract.
/// Keywords are lowercase and cover English and Hebrew.
const RULES: &[Rule] = &[
    Rule {
        category: Category::Sales,
        keywords: &[
            "invoice", "client", "quote", "payment", "billing",
            "חשבונית", "לקוח", "הצעת", "תשלום",
        ],
    },
    Rule {
        category: Category::Tasks,
        keywords: &["todo", "to-do", "task", "משימה", "מטלה"],
    },
];

/// Classify a transcript into a template category
///
/// Total over all inputs: exactly one category is returned for any
/// string, with `Generic` as the default.
#[must_use]
pub fn classify(transcript: &str) -> Category {
    let folded = transcript.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| folded.contains(kw)))
        .map(|rule| rule.category)
        .unwrap_or(Category::Generic)
}
