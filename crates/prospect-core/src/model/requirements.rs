use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Immutable input record for one retrieval cycle.
///
/// Produced by an external extraction collaborator; this engine only reads
/// it. Term sequences keep the extractor's order, category hints are a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequirementsView {
    /// Free-text description of what the buyer wants to accomplish.
    #[serde(default)]
    pub use_case: String,
    #[serde(default)]
    pub technical_terms: Vec<String>,
    #[serde(default)]
    pub business_terms: Vec<String>,
    #[serde(default)]
    pub category_hints: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl RequirementsView {
    /// Natural-language query for the vector backend, concatenating use-case,
    /// technical, business, category, and industry fragments.
    #[must_use]
    pub fn semantic_query(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !self.use_case.is_empty() {
            parts.push(self.use_case.clone());
        }
        parts.extend(self.technical_terms.iter().filter(|t| !t.is_empty()).cloned());
        parts.extend(self.business_terms.iter().filter(|t| !t.is_empty()).cloned());
        if !self.category_hints.is_empty() {
            let cats: Vec<&str> = self.category_hints.iter().map(String::as_str).collect();
            parts.push(format!("Products needed: {}", cats.join(", ")));
        }
        if let Some(industry) = self.industry.as_deref().filter(|i| !i.is_empty()) {
            parts.push(format!("Industry: {industry}"));
        }

        parts.join(" ")
    }

    /// Term-matching query for the keyword backend: technical, business, and
    /// category terms joined with spaces.
    #[must_use]
    pub fn keyword_query(&self) -> String {
        let mut terms: Vec<&str> = Vec::new();
        terms.extend(self.technical_terms.iter().map(String::as_str));
        terms.extend(self.business_terms.iter().map(String::as_str));
        terms.extend(self.category_hints.iter().map(String::as_str));
        terms.retain(|t| !t.is_empty());
        terms.join(" ")
    }

    /// True when neither backend would receive a usable query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.semantic_query().is_empty() && self.keyword_query().is_empty()
    }
}
