//! Search-backend client traits and raw hit types.
//!
//! Clients are stateless connection wrappers injected by the caller; the
//! engine never instantiates singletons. Failures stay at this boundary as
//! [`SearchError`] values and degrade to empty result sets in the fuser.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use prospect_core::RequirementsView;

mod chroma;
mod elastic;

pub use chroma::ChromaVectorClient;
pub use elastic::ElasticKeywordClient;

/// Client-boundary error taxonomy. Every variant is recoverable: the fuser
/// records it and continues with whatever the other backend returned.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend call timed out after {0}ms")]
    Timeout(u64),

    #[error("bad backend response: {0}")]
    BadResponse(String),
}

/// Raw hit from the keyword backend. `score` is backend-native relevance,
/// not bounded to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price_minor: Option<i64>,
    pub score: f32,
}

/// Raw hit from the vector backend. `score` is a similarity in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Populated from solution-collection metadata; absent for products.
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub price_minor: Option<i64>,
    pub score: f32,
}

/// Keyword/inverted-index retrieval (BM25-style scoring).
#[async_trait]
pub trait KeywordSearch: Send + Sync {
    /// Return at most `limit` scored hits for the requirements' keyword
    /// query. Hits may arrive without an id; the fuser drops those.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] when the backend is unreachable, responds
    /// with a non-success status, or returns an unparseable body.
    async fn search(
        &self,
        requirements: &RequirementsView,
        limit: usize,
    ) -> Result<Vec<KeywordHit>, SearchError>;
}

/// Vector/semantic-similarity retrieval with optional metadata filters.
#[async_trait]
pub trait VectorSearch: Send + Sync {
    /// Return at most `limit` hits for a free-text semantic query. `filters`
    /// are equality constraints on metadata fields; an empty map means no
    /// filtering.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] when the backend is unreachable, responds
    /// with a non-success status, or returns an unparseable body.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        filters: &BTreeMap<String, String>,
    ) -> Result<Vec<VectorHit>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_messages_name_the_failure() {
        let err = SearchError::Timeout(8000);
        assert_eq!(err.to_string(), "backend call timed out after 8000ms");

        let err = SearchError::Unavailable("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn hit_optional_fields_default_on_deserialize() {
        let hit: KeywordHit =
            serde_json::from_str(r#"{"id":"P1","name":"Tower server","score":7.5}"#)
                .expect("deserialize");
        assert_eq!(hit.id, "P1");
        assert!(hit.category.is_none());
        assert!(hit.price_minor.is_none());
    }
}
