//! Keyword search adapter for an Elasticsearch-style backend.
//!
//! Builds a `bool`/`multi_match` query from the requirements view and reads
//! hits back with their backend-native BM25 relevance scores.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

use prospect_core::{BackendConfig, RequirementsView};

use super::{KeywordHit, KeywordSearch, SearchError};

/// Fields the keyword query matches against, with boosts favoring the
/// product name over descriptive text.
const MATCH_FIELDS: [&str; 5] = ["name^3", "description^2", "features", "use_cases", "tags"];

pub struct ElasticKeywordClient {
    http: reqwest::Client,
    base_url: String,
    index: String,
    timeout: Duration,
}

impl ElasticKeywordClient {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &BackendConfig, timeout: Duration) -> Self {
        Self {
            http,
            base_url: config.elasticsearch_url.trim_end_matches('/').to_string(),
            index: config.products_index.clone(),
            timeout,
        }
    }

    fn build_query(requirements: &RequirementsView, limit: usize) -> Value {
        let mut bool_query = json!({
            "must": [{
                "multi_match": {
                    "query": requirements.keyword_query(),
                    "fields": MATCH_FIELDS,
                }
            }]
        });

        if !requirements.category_hints.is_empty() {
            let categories: Vec<&str> =
                requirements.category_hints.iter().map(String::as_str).collect();
            bool_query["filter"] = json!([{ "terms": { "category": categories } }]);
        }

        json!({ "query": { "bool": bool_query }, "size": limit })
    }
}

#[async_trait]
impl KeywordSearch for ElasticKeywordClient {
    async fn search(
        &self,
        requirements: &RequirementsView,
        limit: usize,
    ) -> Result<Vec<KeywordHit>, SearchError> {
        let url = format!("{}/{}/_search", self.base_url, self.index);
        let body = Self::build_query(requirements, limit);
        debug!(%url, "issuing keyword search");

        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::BadResponse(format!("{status}: {body}")));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| SearchError::BadResponse(e.to_string()))?;

        parse_search_response(&text)
    }
}

/// Parse the `_search` response body into keyword hits.
///
/// The document id is taken from `_source.id` when present, falling back to
/// the Elasticsearch `_id`; hits scoreless due to constant-score filters get
/// 0.
fn parse_search_response(body: &str) -> Result<Vec<KeywordHit>, SearchError> {
    let parsed: EsResponse =
        serde_json::from_str(body).map_err(|e| SearchError::BadResponse(e.to_string()))?;

    let hits = parsed
        .hits
        .hits
        .into_iter()
        .map(|hit| {
            let id = hit
                .source
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or(hit.doc_id);
            KeywordHit {
                id,
                name: hit.source.name.unwrap_or_default(),
                category: hit.source.category,
                price_minor: hit.source.price_minor,
                score: hit.score.unwrap_or(0.0),
            }
        })
        .collect();

    Ok(hits)
}

#[derive(Deserialize)]
struct EsResponse {
    hits: EsHits,
}

#[derive(Deserialize)]
struct EsHits {
    #[serde(default)]
    hits: Vec<EsHit>,
}

#[derive(Deserialize)]
struct EsHit {
    #[serde(rename = "_id", default)]
    doc_id: String,
    #[serde(rename = "_score", default)]
    score: Option<f32>,
    #[serde(rename = "_source", default)]
    source: EsSource,
}

#[derive(Deserialize, Default)]
struct EsSource {
    id: Option<String>,
    name: Option<String>,
    category: Option<String>,
    price_minor: Option<i64>,
}
