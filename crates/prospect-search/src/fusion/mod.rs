//! Fusion of keyword and vector search results into one ranked candidate list.
//!
//! The merge is identity-based: each distinct id yields exactly one fused
//! candidate whose source tag records which backend(s) contributed it, and
//! whose hybrid score combines the backends' scores (see [`merge_hits`]).

pub mod fuser;
pub mod merge;

pub use fuser::Fuser;
pub use merge::merge_hits;
