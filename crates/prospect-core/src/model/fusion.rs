use serde::{Deserialize, Serialize};

use crate::model::candidate::{Candidate, SearchSource};

/// One entry from the secondary "solutions" semantic channel.
///
/// Solutions come from the vector backend only; there is no keyword leg for
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub semantic_score: f32,
}

/// Outcome of one backend leg, kept for observability.
///
/// A failed or timed-out backend contributes zero results and carries its
/// error text here instead of failing the fuse call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SourceReport {
    /// Result cap the backend was asked for.
    pub requested: usize,
    /// Hits the backend actually returned (before merge-time dedup).
    pub returned: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceReport {
    #[must_use]
    pub const fn ok(requested: usize, returned: usize) -> Self {
        Self {
            requested,
            returned,
            error: None,
        }
    }

    #[must_use]
    pub const fn failed(requested: usize, error: String) -> Self {
        Self {
            requested,
            returned: 0,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SourceReports {
    pub keyword: SourceReport,
    pub vector: SourceReport,
    pub solutions: SourceReport,
}

/// Ranked, deduplicated output of one fusion cycle.
///
/// Always well-formed: an empty candidate list with confidence 0 is a valid,
/// non-error outcome, so the surrounding conversation can continue when
/// retrieval infrastructure is degraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FusionResult {
    /// Sorted descending by `hybrid_score`, one entry per distinct id.
    pub candidates: Vec<Candidate>,
    pub solutions: Vec<Solution>,
    pub sources: SourceReports,
    /// Overall retrieval confidence in `[0, 1]`.
    pub confidence: f32,
}

impl FusionResult {
    /// Count of fused candidates contributed by both backends.
    #[must_use]
    pub fn dual_source_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.source == SearchSource::Both)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.solutions.is_empty()
    }
}
