use serde::{Deserialize, Serialize};

/// Named points in a conversation's progression toward a purchase decision.
///
/// The gate only ever selects the discovery stages and `QuoteReady`;
/// `SolutionPresentation` and `Closing` are set by the surrounding
/// conversation loop once a quote exists, but live here so every consumer
/// shares one stage vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    InitialDiscovery,
    DeepDiscovery,
    SolutionPresentation,
    QuoteReady,
    Closing,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitialDiscovery => "initial_discovery",
            Self::DeepDiscovery => "deep_discovery",
            Self::SolutionPresentation => "solution_presentation",
            Self::QuoteReady => "quote_ready",
            Self::Closing => "closing",
        }
    }

    /// One-line prompt guidance for the response composer at this stage.
    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::InitialDiscovery => {
                "Learn the buyer's situation: what they do and what problem brought them here."
            }
            Self::DeepDiscovery => {
                "Drill into technical constraints, budget signals, and decision timeline."
            }
            Self::SolutionPresentation => {
                "Present matched products and solutions, tied back to the stated needs."
            }
            Self::QuoteReady => {
                "All readiness criteria hold; prepare and offer a formal quote."
            }
            Self::Closing => "Handle objections and agree on next steps toward the order.",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
