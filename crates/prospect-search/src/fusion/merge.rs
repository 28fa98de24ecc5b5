//! Identity-based merge of keyword and vector hits.
//!
//! # Scoring
//!
//! - found by both backends: `hybrid = keyword_weight * keyword_score +
//!   semantic_weight * semantic_score` (defaults 0.4 / 0.6)
//! - vector only: `hybrid = semantic_score`
//! - keyword only: `hybrid = keyword_score`, left on its native scale. The
//!   two backends' raw relevance units are not commensurable without
//!   index-specific statistics, so no re-normalization is attempted.
//!
//! # Ordering
//!
//! Descending by hybrid score. On exact ties, keyword-sourced candidates
//! (including dual-sourced ones) come before vector-only candidates, and
//! within a backend the backend's original relative order is preserved. The
//! ordering depends only on scores and input positions, never on response
//! arrival order.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use prospect_core::{Candidate, ErrorCode, SearchSource};

use crate::clients::{KeywordHit, VectorHit};

/// Sort key for exact score ties: keyword-sourced before vector-only, then
/// the originating backend's rank.
type TieKey = (u8, usize);

struct Merged {
    candidate: Candidate,
    tie_key: TieKey,
}

/// Merge two backend result sets into a ranked, deduplicated candidate list.
///
/// Hits without an id are dropped and logged as malformed; duplicate ids
/// within a single backend's result set keep only the first occurrence.
/// The output is truncated to `max_results`.
#[must_use]
#[allow(clippy::option_if_let_else)] // both arms mutate `merged`
pub fn merge_hits(
    keyword: &[KeywordHit],
    vector: &[VectorHit],
    keyword_weight: f32,
    semantic_weight: f32,
    max_results: usize,
) -> Vec<Candidate> {
    let mut merged: Vec<Merged> = Vec::with_capacity(keyword.len() + vector.len());
    let mut by_id: BTreeMap<&str, usize> = BTreeMap::new();

    for (rank, hit) in keyword.iter().enumerate() {
        if hit.id.is_empty() {
            warn!(
                code = %ErrorCode::MalformedCandidate,
                name = %hit.name,
                backend = "keyword",
                "dropping candidate without id"
            );
            continue;
        }
        let Entry::Vacant(slot) = by_id.entry(&hit.id) else {
            continue;
        };
        slot.insert(merged.len());
        merged.push(Merged {
            candidate: Candidate {
                id: hit.id.clone(),
                name: hit.name.clone(),
                category: hit.category.clone(),
                price_minor: hit.price_minor,
                keyword_score: hit.score,
                semantic_score: 0.0,
                source: SearchSource::KeywordOnly,
                hybrid_score: hit.score,
            },
            tie_key: (0, rank),
        });
    }

    let mut seen_vector: BTreeSet<&str> = BTreeSet::new();
    for (rank, hit) in vector.iter().enumerate() {
        if hit.id.is_empty() {
            warn!(
                code = %ErrorCode::MalformedCandidate,
                name = %hit.name,
                backend = "vector",
                "dropping candidate without id"
            );
            continue;
        }
        if !seen_vector.insert(&hit.id) {
            continue;
        }

        if let Some(&idx) = by_id.get(hit.id.as_str()) {
            // Independently judged relevant by both methods: combine scores.
            let entry = &mut merged[idx].candidate;
            entry.source = SearchSource::Both;
            entry.semantic_score = hit.score;
            entry.hybrid_score =
                keyword_weight.mul_add(entry.keyword_score, semantic_weight * hit.score);
            if entry.name.is_empty() {
                entry.name = hit.name.clone();
            }
            if entry.category.is_none() {
                entry.category = hit.category.clone();
            }
            if entry.price_minor.is_none() {
                entry.price_minor = hit.price_minor;
            }
        } else {
            merged.push(Merged {
                candidate: Candidate {
                    id: hit.id.clone(),
                    name: hit.name.clone(),
                    category: hit.category.clone(),
                    price_minor: hit.price_minor,
                    keyword_score: 0.0,
                    semantic_score: hit.score,
                    source: SearchSource::VectorOnly,
                    hybrid_score: hit.score,
                },
                tie_key: (1, rank),
            });
        }
    }

    merged.sort_by(|a, b| {
        b.candidate
            .hybrid_score
            .partial_cmp(&a.candidate.hybrid_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.tie_key.cmp(&b.tie_key))
    });
    merged.truncate(max_results);

    merged.into_iter().map(|m| m.candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(id: &str, score: f32) -> KeywordHit {
        KeywordHit {
            id: id.into(),
            name: format!("kw {id}"),
            category: None,
            price_minor: None,
            score,
        }
    }

    fn vec_hit(id: &str, score: f32) -> VectorHit {
        VectorHit {
            id: id.into(),
            name: format!("vec {id}"),
            category: None,
            industry: None,
            price_minor: None,
            score,
        }
    }

    #[test]
    fn dual_sourced_candidate_combines_scores() {
        // Keyword: P1 at 8.0. Vector: P1 at 0.9, P2 at 0.95.
        let fused = merge_hits(&[kw("P1", 8.0)], &[vec_hit("P1", 0.9), vec_hit("P2", 0.95)], 0.4, 0.6, 20);

        assert_eq!(fused.len(), 2);
        // P1: 0.4*8.0 + 0.6*0.9 = 3.74, ranks above P2 at 0.95.
        assert_eq!(fused[0].id, "P1");
        assert_eq!(fused[0].source, SearchSource::Both);
        assert!((fused[0].hybrid_score - 3.74).abs() < 1e-6);
        assert_eq!(fused[1].id, "P2");
        assert_eq!(fused[1].source, SearchSource::VectorOnly);
        assert!((fused[1].hybrid_score - 0.95).abs() < 1e-6);
    }

    #[test]
    fn source_tagging_reflects_contributing_backends() {
        let fused = merge_hits(
            &[kw("A", 2.0), kw("B", 1.0)],
            &[vec_hit("B", 0.5), vec_hit("C", 0.4)],
            0.4,
            0.6,
            20,
        );

        let by_id = |id: &str| fused.iter().find(|c| c.id == id).expect("candidate");
        assert_eq!(by_id("A").source, SearchSource::KeywordOnly);
        assert_eq!(by_id("B").source, SearchSource::Both);
        assert_eq!(by_id("C").source, SearchSource::VectorOnly);
        assert!(by_id("A").semantic_score.abs() < f32::EPSILON);
        assert!(by_id("C").keyword_score.abs() < f32::EPSILON);
    }

    #[test]
    fn missing_ids_are_dropped_entirely() {
        let fused = merge_hits(&[kw("", 9.0), kw("A", 1.0)], &[vec_hit("", 0.99)], 0.4, 0.6, 20);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].id, "A");
    }

    #[test]
    fn within_backend_duplicates_keep_first_occurrence() {
        let fused = merge_hits(&[kw("A", 5.0), kw("A", 1.0)], &[], 0.4, 0.6, 20);
        assert_eq!(fused.len(), 1);
        assert!((fused[0].keyword_score - 5.0).abs() < 1e-6);

        let fused = merge_hits(&[], &[vec_hit("B", 0.9), vec_hit("B", 0.2)], 0.4, 0.6, 20);
        assert_eq!(fused.len(), 1);
        assert!((fused[0].semantic_score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn exact_ties_put_keyword_results_first_in_backend_order() {
        // Three candidates scoring exactly 0.5.
        let fused = merge_hits(
            &[kw("K2", 0.5), kw("K9", 0.5)],
            &[vec_hit("V1", 0.5)],
            0.4,
            0.6,
            20,
        );
        let ids: Vec<&str> = fused.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["K2", "K9", "V1"]);
    }

    #[test]
    fn truncates_to_max_results() {
        let keyword: Vec<KeywordHit> = (0..30).map(|i| kw(&format!("P{i}"), 30.0 - i as f32)).collect();
        let fused = merge_hits(&keyword, &[], 0.4, 0.6, 20);
        assert_eq!(fused.len(), 20);
        assert_eq!(fused[0].id, "P0");
    }

    #[test]
    fn both_empty_fuses_to_empty() {
        assert!(merge_hits(&[], &[], 0.4, 0.6, 20).is_empty());
    }

    #[test]
    fn vector_metadata_backfills_missing_keyword_fields() {
        let sparse = KeywordHit {
            id: "P1".into(),
            name: String::new(),
            category: None,
            price_minor: None,
            score: 4.0,
        };
        let rich = VectorHit {
            id: "P1".into(),
            name: "Edge server".into(),
            category: Some("server".into()),
            industry: None,
            price_minor: Some(120_000),
            score: 0.8,
        };
        let fused = merge_hits(&[sparse], &[rich], 0.4, 0.6, 20);
        assert_eq!(fused[0].name, "Edge server");
        assert_eq!(fused[0].category.as_deref(), Some("server"));
        assert_eq!(fused[0].price_minor, Some(120_000));
    }
}
