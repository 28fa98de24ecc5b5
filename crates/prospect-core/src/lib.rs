#![forbid(unsafe_code)]
//! prospect-core library.
//!
//! Shared data model, configuration, and error codes for the prospect
//! retrieval engine.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types where appropriate.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::{BackendConfig, FusionConfig, GateConfig, ProjectConfig, load_project_config};
pub use error::ErrorCode;
pub use model::candidate::{Candidate, SearchSource};
pub use model::evidence::ConversationEvidence;
pub use model::fusion::{FusionResult, Solution, SourceReport, SourceReports};
pub use model::requirements::RequirementsView;
