use serde::{Deserialize, Serialize};

/// Which backend(s) contributed a fused candidate.
///
/// `Both` is the high-value case: an item two independent retrieval methods
/// judged relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    KeywordOnly,
    VectorOnly,
    Both,
}

impl SearchSource {
    /// Wire name matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeywordOnly => "keyword_only",
            Self::VectorOnly => "vector_only",
            Self::Both => "both",
        }
    }
}

/// One retrievable product after fusion.
///
/// Exactly one `Candidate` exists per distinct `id`; `source` reflects which
/// backend(s) contributed it. `keyword_score` is backend-native and not
/// bounded to `[0, 1]`; `semantic_score` is a cosine-similarity-like value in
/// `[0, 1]`.
///
/// `hybrid_score` for keyword-only candidates stays on the keyword backend's
/// native scale. The two backends' raw relevance units are not commensurable
/// without index-specific statistics, so no re-normalization is attempted;
/// callers sorting across the whole list accept the mixed scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Opaque stable identifier; candidates without one never reach fusion.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Price in integer minor-currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_minor: Option<i64>,
    /// Backend-native keyword relevance; 0 when not found by keyword search.
    pub keyword_score: f32,
    /// Semantic similarity in `[0, 1]`; 0 when not found by vector search.
    pub semantic_score: f32,
    pub source: SearchSource,
    /// Combined relevance used for ranking (see `prospect-search` fusion).
    pub hybrid_score: f32,
}
