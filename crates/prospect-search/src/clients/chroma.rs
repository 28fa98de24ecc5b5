//! Vector search adapter for a Chroma-style backend.
//!
//! Queries a named collection with free text and converts the returned
//! cosine distances to similarities in `[0, 1]`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use super::{SearchError, VectorHit, VectorSearch};

pub struct ChromaVectorClient {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    timeout: Duration,
}

impl ChromaVectorClient {
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        collection: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            timeout,
        }
    }

    fn build_query(query: &str, limit: usize, filters: &BTreeMap<String, String>) -> Value {
        let mut body = json!({
            "query_texts": [query],
            "n_results": limit,
        });

        if !filters.is_empty() {
            let where_clause: Map<String, Value> = filters
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            body["where"] = Value::Object(where_clause);
        }

        body
    }
}

#[async_trait]
impl VectorSearch for ChromaVectorClient {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        filters: &BTreeMap<String, String>,
    ) -> Result<Vec<VectorHit>, SearchError> {
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/api/v1/collections/{}/query",
            self.base_url, self.collection
        );
        let body = Self::build_query(query, limit, filters);
        debug!(%url, "issuing vector search");

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

        parse_query_response(&text)
    }
}

/// Parse a collection-query response into vector hits.
///
/// The backend returns parallel arrays nested one level per query text; we
/// always send a single query, so only the first inner array of each field
/// matters. Distance converts to similarity as `1 - distance`, clamped to
/// `[0, 1]`.
fn parse_query_response(body: &str) -> Result<Vec<VectorHit>, SearchError> {
    let parsed: ChromaResponse =
        serde_json::from_str(body).map_err(|e| SearchError::BadResponse(e.to_string()))?;

    let ids = parsed.ids.into_iter().next().unwrap_or_default();
    let distances = parsed.distances.into_iter().next().unwrap_or_default();
    let metadatas = parsed.metadatas.into_iter().next().unwrap_or_default();

    let hits = ids
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let meta = metadatas.get(i);
            let distance = distances.get(i).copied().unwrap_or(1.0);
            VectorHit {
                id,
                name: meta
                    .and_then(|m| m.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                category: meta
                    .and_then(|m| m.get("category"))
                    .and_then(Value::as_str)
                    .map(ToString::to_string),
                industry: meta
                    .and_then(|m| m.get("industry"))
                    .and_then(Value::as_str)
                    .map(ToString::to_string),
                price_minor: meta.and_then(|m| m.get("price_minor")).and_then(Value::as_i64),
                score: (1.0 - distance).clamp(0.0, 1.0),
            }
        })
        .collect();

    Ok(hits)
}

#[derive(Deserialize)]
struct ChromaResponse {
    #[serde(default)]
    ids: Vec<Vec<String>>,
    #[serde(default)]
    distances: Vec<Vec<f32>>,
    #[serde(default)]
    metadatas: Vec<Vec<Map<String, Value>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_converts_distance_to_similarity() {
        let body = r#"{
            "ids": [["P1", "P2"]],
            "distances": [[0.1, 0.35]],
            "metadatas": [[
                {"name": "GPU workstation", "category": "workstation", "price_minor": 899900},
                {"name": "NAS appliance"}
            ]]
        }"#;

        let hits = parse_query_response(body).expect("parse");
        assert_eq!(hits.len(), 2);
        assert!((hits[0].score - 0.9).abs() < 1e-6);
        assert!((hits[1].score - 0.65).abs() < 1e-6);
        assert_eq!(hits[0].name, "GPU workstation");
        assert_eq!(hits[0].price_minor, Some(899_900));
        assert!(hits[1].category.is_none());
    }

    #[test]
    fn parse_clamps_out_of_range_distances() {
        let body = r#"{"ids":[["P1","P2"]],"distances":[[-0.2, 1.8]],"metadatas":[[{},{}]]}"#;
        let hits = parse_query_response(body).expect("parse");
        assert!((hits[0].score - 1.0).abs() < 1e-6);
        assert!(hits[1].score.abs() < f32::EPSILON);
    }

    #[test]
    fn parse_handles_empty_result_set() {
        let hits = parse_query_response(r#"{"ids":[[]],"distances":[[]],"metadatas":[[]]}"#)
            .expect("parse");
        assert!(hits.is_empty());
    }

    #[test]
    fn build_query_includes_filters_when_present() {
        let filters: BTreeMap<String, String> =
            [("industry".to_string(), "media".to_string())].into_iter().collect();
        let body = ChromaVectorClient::build_query("render farm", 10, &filters);
        assert_eq!(body["where"]["industry"], "media");
        assert_eq!(body["n_results"], 10);

        let body = ChromaVectorClient::build_query("render farm", 10, &BTreeMap::new());
        assert!(body.get("where").is_none());
    }
}
