use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub fusion: FusionConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub backends: BackendConfig,
}

/// Tunables for hybrid score fusion.
///
/// The keyword/semantic weights apply only to dual-sourced candidates; the
/// 0.4/0.6 defaults reflect higher trust in semantic matching when both
/// backends agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f32,
    #[serde(default = "default_semantic_weight")]
    pub semantic_weight: f32,
    /// Per-backend result cap for product searches.
    #[serde(default = "default_backend_limit")]
    pub keyword_limit: usize,
    #[serde(default = "default_backend_limit")]
    pub vector_limit: usize,
    /// Result cap for the secondary solutions channel.
    #[serde(default = "default_solution_limit")]
    pub solution_limit: usize,
    /// Maximum size of the fused candidate list.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Individual timeout applied to each in-flight backend call.
    #[serde(default = "default_backend_timeout_ms")]
    pub backend_timeout_ms: u64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            keyword_weight: default_keyword_weight(),
            semantic_weight: default_semantic_weight(),
            keyword_limit: default_backend_limit(),
            vector_limit: default_backend_limit(),
            solution_limit: default_solution_limit(),
            max_results: default_max_results(),
            backend_timeout_ms: default_backend_timeout_ms(),
        }
    }
}

/// Thresholds for the conjunctive quote-readiness gate.
///
/// All five criteria must hold before a quote is unlocked; partial credit is
/// intentionally disallowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum business-context score (0-100).
    #[serde(default = "default_min_context_score")]
    pub min_business: u8,
    /// Minimum technical-requirements score (0-100).
    #[serde(default = "default_min_context_score")]
    pub min_technical: u8,
    /// Minimum decision-readiness score (0-100).
    #[serde(default = "default_min_decision_score")]
    pub min_decision: u8,
    /// Minimum conversation turns before a quote can be generated.
    #[serde(default = "default_min_turns")]
    pub min_turns: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_business: default_min_context_score(),
            min_technical: default_min_context_score(),
            min_decision: default_min_decision_score(),
            min_turns: default_min_turns(),
        }
    }
}

/// Endpoints and index/collection names for the two retrieval backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_elasticsearch_url")]
    pub elasticsearch_url: String,
    #[serde(default = "default_products_index")]
    pub products_index: String,
    #[serde(default = "default_chroma_url")]
    pub chroma_url: String,
    #[serde(default = "default_products_index")]
    pub products_collection: String,
    #[serde(default = "default_solutions_collection")]
    pub solutions_collection: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            elasticsearch_url: default_elasticsearch_url(),
            products_index: default_products_index(),
            chroma_url: default_chroma_url(),
            products_collection: default_products_index(),
            solutions_collection: default_solutions_collection(),
        }
    }
}

/// Load `.prospect/config.toml` from the given root, falling back to
/// defaults when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".prospect/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_keyword_weight() -> f32 {
    0.4
}

const fn default_semantic_weight() -> f32 {
    0.6
}

const fn default_backend_limit() -> usize {
    15
}

const fn default_solution_limit() -> usize {
    10
}

const fn default_max_results() -> usize {
    20
}

const fn default_backend_timeout_ms() -> u64 {
    8000
}

const fn default_min_context_score() -> u8 {
    70
}

const fn default_min_decision_score() -> u8 {
    80
}

const fn default_min_turns() -> u32 {
    3
}

fn default_elasticsearch_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_products_index() -> String {
    "products".to_string()
}

fn default_chroma_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_solutions_collection() -> String {
    "solutions".to_string()
}
