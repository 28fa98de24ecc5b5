//! Conjunctive quote-readiness gate.
//!
//! Stateless: every turn recomputes the stage from that turn's evidence, so
//! the stage can regress when the buyer reopens discovery. Retrieval
//! confidence rides along as advisory telemetry and never unlocks the gate
//! on its own.

use serde::{Deserialize, Serialize};
use tracing::debug;

use prospect_core::{ConversationEvidence, GateConfig};

use crate::stage::Stage;

/// Turn count at which a not-yet-ready conversation counts as deep
/// discovery rather than initial discovery.
const DEEP_DISCOVERY_TURNS: u32 = 2;

/// The five independent readiness checks. Every one must hold before a
/// quote is unlocked; there is no partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[allow(clippy::struct_excessive_bools)] // the record IS five independent flags
pub struct CriteriaMet {
    pub explicit_request: bool,
    pub business_context: bool,
    pub technical_requirements: bool,
    pub decision_readiness: bool,
    pub conversation_depth: bool,
}

impl CriteriaMet {
    #[must_use]
    pub const fn all(self) -> bool {
        self.explicit_request
            && self.business_context
            && self.technical_requirements
            && self.decision_readiness
            && self.conversation_depth
    }

    /// Names of the failing checks, for caller diagnostics.
    #[must_use]
    pub fn unmet(self) -> Vec<String> {
        let named = [
            (self.explicit_request, "explicit_request"),
            (self.business_context, "business_context"),
            (self.technical_requirements, "technical_requirements"),
            (self.decision_readiness, "decision_readiness"),
            (self.conversation_depth, "conversation_depth"),
        ];
        named
            .into_iter()
            .filter(|(met, _)| !met)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

/// Per-turn gate output. Recomputed every turn, never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDecision {
    pub stage: Stage,
    pub quote_ready: bool,
    pub should_generate_quote: bool,
    /// Failing check names, empty when `quote_ready`.
    pub unmet_criteria: Vec<String>,
    /// Retrieval confidence passed through for caller messaging. Advisory
    /// only; plays no part in the stage or readiness fields.
    pub advisory_confidence: f32,
}

/// Evaluate the gate for one turn. Never fails: out-of-range scores are
/// clamped and missing evidence resolves to the not-ready default.
#[must_use]
pub fn decide(
    evidence: ConversationEvidence,
    confidence: f32,
    config: &GateConfig,
) -> StageDecision {
    let evidence = evidence.sanitized();

    let criteria = CriteriaMet {
        explicit_request: evidence.explicit_quote_request,
        business_context: evidence.business_context_score >= config.min_business,
        technical_requirements: evidence.technical_requirements_score >= config.min_technical,
        decision_readiness: evidence.decision_readiness_score >= config.min_decision,
        conversation_depth: evidence.turn_count >= config.min_turns,
    };

    let quote_ready = criteria.all();
    let stage = if quote_ready {
        Stage::QuoteReady
    } else if evidence.turn_count >= DEEP_DISCOVERY_TURNS {
        Stage::DeepDiscovery
    } else {
        Stage::InitialDiscovery
    };
    let unmet_criteria = criteria.unmet();

    debug!(
        stage = %stage,
        quote_ready,
        turns = evidence.turn_count,
        unmet = ?unmet_criteria,
        advisory_confidence = confidence,
        "stage decision"
    );

    StageDecision {
        stage,
        quote_ready,
        should_generate_quote: quote_ready,
        unmet_criteria,
        advisory_confidence: confidence.clamp(0.0, 1.0),
    }
}
