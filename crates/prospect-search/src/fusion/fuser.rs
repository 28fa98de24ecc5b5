//! Concurrent orchestration of the retrieval backends.
//!
//! One fuse cycle fires the keyword leg, the vector leg, and the optional
//! solutions leg concurrently, each under its own timeout, then merges
//! whatever came back. A failed or slow backend degrades that leg to an
//! empty result set with its error recorded in the source report; the cycle
//! itself never fails.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use prospect_core::{
    ErrorCode, FusionConfig, FusionResult, RequirementsView, Solution, SourceReport, SourceReports,
};

use crate::clients::{KeywordHit, KeywordSearch, SearchError, VectorHit, VectorSearch};
use crate::confidence;
use crate::fusion::merge::merge_hits;

/// Hybrid retrieval engine over injected backend clients.
///
/// Holds no connection state of its own; clients are shared trait objects so
/// callers can pool or reuse them across fusers.
pub struct Fuser {
    keyword: Arc<dyn KeywordSearch>,
    vector: Arc<dyn VectorSearch>,
    solutions: Option<Arc<dyn VectorSearch>>,
    config: FusionConfig,
}

impl Fuser {
    #[must_use]
    pub const fn new(
        keyword: Arc<dyn KeywordSearch>,
        vector: Arc<dyn VectorSearch>,
        config: FusionConfig,
    ) -> Self {
        Self {
            keyword,
            vector,
            solutions: None,
            config,
        }
    }

    /// Enable the secondary solutions channel, queried against the given
    /// vector client (typically a different collection than products).
    #[must_use]
    pub fn with_solutions(mut self, solutions: Arc<dyn VectorSearch>) -> Self {
        self.solutions = Some(solutions);
        self
    }

    /// Run one retrieval cycle. Infallible: backend failures surface in
    /// `sources`, not as an error.
    pub async fn fuse(&self, requirements: &RequirementsView) -> FusionResult {
        if requirements.is_empty() {
            debug!("requirements carry no searchable terms; skipping backends");
            return FusionResult::default();
        }

        let semantic_query = requirements.semantic_query();
        let budget = Duration::from_millis(self.config.backend_timeout_ms);

        let (keyword, vector, solutions) = tokio::join!(
            self.keyword_leg(requirements, budget),
            self.vector_leg(&semantic_query, requirements, budget),
            self.solutions_leg(&semantic_query, requirements, budget),
        );
        let (keyword_hits, keyword_report) = keyword;
        let (vector_hits, vector_report) = vector;
        let (solution_hits, solutions_report) = solutions;

        let candidates = merge_hits(
            &keyword_hits,
            &vector_hits,
            self.config.keyword_weight,
            self.config.semantic_weight,
            self.config.max_results,
        );
        let solutions = collect_solutions(solution_hits);
        let confidence = confidence::estimate(&candidates, &solutions);

        let result = FusionResult {
            candidates,
            solutions,
            sources: SourceReports {
                keyword: keyword_report,
                vector: vector_report,
                solutions: solutions_report,
            },
            confidence,
        };
        info!(
            candidates = result.candidates.len(),
            dual_source = result.dual_source_count(),
            solutions = result.solutions.len(),
            confidence = result.confidence,
            "fusion cycle complete"
        );
        result
    }

    async fn keyword_leg(
        &self,
        requirements: &RequirementsView,
        budget: Duration,
    ) -> (Vec<KeywordHit>, SourceReport) {
        let requested = self.config.keyword_limit;
        if requirements.keyword_query().is_empty() {
            return (Vec::new(), SourceReport::ok(requested, 0));
        }
        let outcome = timeout(budget, self.keyword.search(requirements, requested)).await;
        settle("keyword", requested, self.config.backend_timeout_ms, outcome)
    }

    async fn vector_leg(
        &self,
        semantic_query: &str,
        requirements: &RequirementsView,
        budget: Duration,
    ) -> (Vec<VectorHit>, SourceReport) {
        let requested = self.config.vector_limit;
        if semantic_query.is_empty() {
            return (Vec::new(), SourceReport::ok(requested, 0));
        }
        let filters = product_filters(requirements);
        let outcome = timeout(budget, self.vector.search(semantic_query, requested, &filters)).await;
        settle("vector", requested, self.config.backend_timeout_ms, outcome)
    }

    async fn solutions_leg(
        &self,
        semantic_query: &str,
        requirements: &RequirementsView,
        budget: Duration,
    ) -> (Vec<VectorHit>, SourceReport) {
        let Some(client) = self.solutions.as_ref() else {
            return (Vec::new(), SourceReport::default());
        };
        let requested = self.config.solution_limit;
        if semantic_query.is_empty() {
            return (Vec::new(), SourceReport::ok(requested, 0));
        }
        let filters = solution_filters(requirements);
        let outcome = timeout(budget, client.search(semantic_query, requested, &filters)).await;
        settle(
            "solutions",
            requested,
            self.config.backend_timeout_ms,
            outcome,
        )
    }
}

/// Metadata filters for the product vector search. A category filter is only
/// applied when the requirements point at exactly one category; ambiguous
/// hints would over-constrain recall.
fn product_filters(requirements: &RequirementsView) -> BTreeMap<String, String> {
    let mut filters = BTreeMap::new();
    if requirements.category_hints.len() == 1
        && let Some(hint) = requirements.category_hints.iter().next()
    {
        filters.insert("category".to_string(), hint.clone());
    }
    filters
}

/// Metadata filters for the solutions search: restrict by industry when one
/// is known.
fn solution_filters(requirements: &RequirementsView) -> BTreeMap<String, String> {
    let mut filters = BTreeMap::new();
    if let Some(industry) = requirements.industry.as_deref().filter(|i| !i.is_empty()) {
        filters.insert("industry".to_string(), industry.to_string());
    }
    filters
}

/// Map one leg's outcome into hits plus a source report, logging failures.
fn settle<T>(
    backend: &'static str,
    requested: usize,
    timeout_ms: u64,
    outcome: Result<Result<Vec<T>, SearchError>, tokio::time::error::Elapsed>,
) -> (Vec<T>, SourceReport) {
    match outcome {
        Ok(Ok(hits)) => {
            let report = SourceReport::ok(requested, hits.len());
            (hits, report)
        }
        Ok(Err(err)) => {
            let code = match &err {
                SearchError::Timeout(_) => ErrorCode::BackendTimeout,
                SearchError::Unavailable(_) | SearchError::BadResponse(_) => {
                    ErrorCode::BackendUnavailable
                }
            };
            warn!(code = %code, backend, error = %err, "backend leg failed; continuing without it");
            (Vec::new(), SourceReport::failed(requested, err.to_string()))
        }
        Err(_) => {
            let err = SearchError::Timeout(timeout_ms);
            warn!(
                code = %ErrorCode::BackendTimeout,
                backend,
                error = %err,
                "backend leg timed out; continuing without it"
            );
            (Vec::new(), SourceReport::failed(requested, err.to_string()))
        }
    }
}

/// Convert raw solution hits into solution entries, dropping id-less rows.
fn collect_solutions(hits: Vec<VectorHit>) -> Vec<Solution> {
    hits.into_iter()
        .filter(|hit| {
            if hit.id.is_empty() {
                warn!(
                    code = %ErrorCode::MalformedCandidate,
                    name = %hit.name,
                    backend = "solutions",
                    "dropping solution without id"
                );
                return false;
            }
            true
        })
        .map(|hit| Solution {
            id: hit.id,
            name: hit.name,
            industry: hit.industry,
            semantic_score: hit.score,
        })
        .collect()
}
