//! Scalar retrieval-confidence estimate for one fusion cycle.
//!
//! Confidence is additive over four signals and clamped to `[0, 1]`:
//! any product candidates at all, any solution matches, cross-backend
//! agreement (dual-sourced candidates, saturating at 5), and strong semantic
//! matches (similarity above 0.8, saturating at 3). The value is advisory
//! telemetry for the caller; nothing downstream branches on it.

use prospect_core::{Candidate, SearchSource, Solution};

const ANY_PRODUCTS: f32 = 0.4;
const ANY_SOLUTIONS: f32 = 0.2;
const AGREEMENT_MAX: f32 = 0.3;
const AGREEMENT_SATURATION: usize = 5;
const STRONG_MAX: f32 = 0.2;
const STRONG_SATURATION: usize = 3;
/// Semantic similarity above this counts as a strong match.
const STRONG_SEMANTIC: f32 = 0.8;

/// Estimate retrieval confidence from a fused candidate list and the
/// solutions channel. Deterministic in its inputs.
#[must_use]
pub fn estimate(candidates: &[Candidate], solutions: &[Solution]) -> f32 {
    let products_term = if candidates.is_empty() { 0.0 } else { ANY_PRODUCTS };
    let solutions_term = if solutions.is_empty() { 0.0 } else { ANY_SOLUTIONS };

    let dual = candidates
        .iter()
        .filter(|c| c.source == SearchSource::Both)
        .count();
    let agreement_term = AGREEMENT_MAX * (dual as f32 / AGREEMENT_SATURATION as f32).min(1.0);

    let strong = candidates
        .iter()
        .filter(|c| c.semantic_score > STRONG_SEMANTIC)
        .count();
    let strong_term = STRONG_MAX * (strong as f32 / STRONG_SATURATION as f32).min(1.0);

    (products_term + solutions_term + agreement_term + strong_term).clamp(0.0, 1.0)
}
