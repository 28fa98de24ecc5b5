//! Property coverage for the merge step and the confidence estimate.

use std::collections::BTreeSet;

use proptest::prelude::*;

use prospect_core::SearchSource;
use prospect_search::{KeywordHit, VectorHit, estimate, merge_hits};

const KEYWORD_WEIGHT: f32 = 0.4;
const SEMANTIC_WEIGHT: f32 = 0.6;

fn keyword_hits() -> impl Strategy<Value = Vec<KeywordHit>> {
    prop::collection::vec(
        ("P[0-9]", 0.0_f32..20.0).prop_map(|(id, score)| KeywordHit {
            name: format!("product {id}"),
            id,
            category: None,
            price_minor: None,
            score,
        }),
        0..12,
    )
}

fn vector_hits() -> impl Strategy<Value = Vec<VectorHit>> {
    prop::collection::vec(
        ("P[0-9]", 0.0_f32..=1.0).prop_map(|(id, score)| VectorHit {
            name: format!("product {id}"),
            id,
            category: None,
            industry: None,
            price_minor: None,
            score,
        }),
        0..12,
    )
}

fn distinct_ids<'a, I: Iterator<Item = &'a str>>(ids: I) -> BTreeSet<&'a str> {
    ids.collect()
}

proptest! {
    #[test]
    fn fused_ids_are_exactly_the_union(
        keyword in keyword_hits(),
        vector in vector_hits(),
    ) {
        let fused = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, usize::MAX);

        let expected: BTreeSet<&str> = distinct_ids(
            keyword
                .iter()
                .map(|h| h.id.as_str())
                .chain(vector.iter().map(|h| h.id.as_str())),
        );
        let actual: BTreeSet<&str> = distinct_ids(fused.iter().map(|c| c.id.as_str()));

        prop_assert_eq!(&actual, &expected);
        // One candidate per distinct id.
        prop_assert_eq!(fused.len(), expected.len());
    }

    #[test]
    fn fused_list_is_sorted_by_descending_hybrid_score(
        keyword in keyword_hits(),
        vector in vector_hits(),
    ) {
        let fused = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, usize::MAX);
        for pair in fused.windows(2) {
            prop_assert!(pair[0].hybrid_score >= pair[1].hybrid_score);
        }
    }

    #[test]
    fn source_tags_reflect_backend_membership(
        keyword in keyword_hits(),
        vector in vector_hits(),
    ) {
        let keyword_ids = distinct_ids(keyword.iter().map(|h| h.id.as_str()));
        let vector_ids = distinct_ids(vector.iter().map(|h| h.id.as_str()));

        let fused = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, usize::MAX);
        for candidate in &fused {
            let expected = match (
                keyword_ids.contains(candidate.id.as_str()),
                vector_ids.contains(candidate.id.as_str()),
            ) {
                (true, true) => SearchSource::Both,
                (true, false) => SearchSource::KeywordOnly,
                (false, true) => SearchSource::VectorOnly,
                (false, false) => unreachable!("candidate id came from neither input"),
            };
            prop_assert_eq!(candidate.source, expected);
        }
    }

    #[test]
    fn dual_sourced_scores_follow_the_weighted_sum(
        keyword in keyword_hits(),
        vector in vector_hits(),
    ) {
        let fused = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, usize::MAX);
        for candidate in fused.iter().filter(|c| c.source == SearchSource::Both) {
            // Within-backend duplicates keep the first occurrence.
            let kw = keyword
                .iter()
                .find(|h| h.id == candidate.id)
                .map_or(0.0, |h| h.score);
            let sem = vector
                .iter()
                .find(|h| h.id == candidate.id)
                .map_or(0.0, |h| h.score);
            let expected = KEYWORD_WEIGHT.mul_add(kw, SEMANTIC_WEIGHT * sem);
            prop_assert!((candidate.hybrid_score - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn merge_is_deterministic(
        keyword in keyword_hits(),
        vector in vector_hits(),
    ) {
        let first = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, usize::MAX);
        let second = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, usize::MAX);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn truncation_keeps_the_top_of_the_ranking(
        keyword in keyword_hits(),
        vector in vector_hits(),
        max in 0_usize..8,
    ) {
        let full = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, usize::MAX);
        let truncated = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, max);

        prop_assert!(truncated.len() <= max);
        prop_assert_eq!(&truncated[..], &full[..truncated.len()]);
    }

    #[test]
    fn confidence_stays_in_the_unit_interval(
        keyword in keyword_hits(),
        vector in vector_hits(),
    ) {
        let fused = merge_hits(&keyword, &vector, KEYWORD_WEIGHT, SEMANTIC_WEIGHT, usize::MAX);
        let confidence = estimate(&fused, &[]);
        prop_assert!((0.0..=1.0).contains(&confidence));
    }
}
