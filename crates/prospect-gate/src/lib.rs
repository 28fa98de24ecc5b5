#![forbid(unsafe_code)]
//! prospect-gate library.
//!
//! Stateless conversation-stage gate: given per-turn readiness evidence and
//! an advisory retrieval confidence, decide the current stage and whether to
//! unlock quote generation. All five readiness criteria must hold at once.
//!
//! # Conventions
//!
//! - **Errors**: the gate is total; it clamps and defaults rather than
//!   failing.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod gate;
pub mod stage;

pub use gate::{CriteriaMet, StageDecision, decide};
pub use stage::Stage;
