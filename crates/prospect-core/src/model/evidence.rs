use serde::{Deserialize, Serialize};

const MAX_SCORE: u8 = 100;

/// Per-turn readiness snapshot from the external conversation analyzer.
///
/// Scores are 0-100; anything out of range is clamped rather than rejected,
/// so malformed evidence always resolves to the safe not-ready default
/// downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConversationEvidence {
    #[serde(default)]
    pub business_context_score: u8,
    #[serde(default)]
    pub technical_requirements_score: u8,
    #[serde(default)]
    pub decision_readiness_score: u8,
    #[serde(default)]
    pub explicit_quote_request: bool,
    #[serde(default)]
    pub turn_count: u32,
}

impl ConversationEvidence {
    /// Copy with all scores clamped to 0..=100.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let clamped = |score: u8, field: &str| {
            if score > MAX_SCORE {
                tracing::warn!(field, score, "evidence score out of range, clamping to 100");
                MAX_SCORE
            } else {
                score
            }
        };

        Self {
            business_context_score: clamped(self.business_context_score, "business_context_score"),
            technical_requirements_score: clamped(
                self.technical_requirements_score,
                "technical_requirements_score",
            ),
            decision_readiness_score: clamped(
                self.decision_readiness_score,
                "decision_readiness_score",
            ),
            ..self
        }
    }
}
