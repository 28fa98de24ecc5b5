#![forbid(unsafe_code)]
//! prospect-search library.
//!
//! Hybrid retrieval across a keyword/inverted-index backend and a
//! vector-similarity backend, fused into one ranked, deduplicated candidate
//! list with a scalar retrieval confidence.
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` at orchestration seams; the typed
//!   [`SearchError`] taxonomy at the client boundary. Backend failures are
//!   never fatal to a fuse cycle.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod clients;
pub mod confidence;
pub mod fusion;

pub use clients::{
    ChromaVectorClient, ElasticKeywordClient, KeywordHit, KeywordSearch, SearchError, VectorHit,
    VectorSearch,
};
pub use confidence::estimate;
pub use fusion::{Fuser, merge_hits};
