//! Typed records flowing through one retrieval/gating cycle.
//!
//! Everything here is request-scoped: built from backend responses or the
//! conversation analyzer, consumed within the same turn, never persisted.

pub mod candidate;
pub mod evidence;
pub mod fusion;
pub mod requirements;
