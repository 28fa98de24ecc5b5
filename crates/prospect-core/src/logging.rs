//! Tracing bootstrap for host applications.
//!
//! The engine itself only emits `tracing` events; installing a subscriber is
//! the host's job, done once at startup. This helper mirrors the usual
//! env-driven setup so embedding applications do not have to repeat it.

use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a global subscriber configured from the environment.
///
/// - `PROSPECT_LOG`: standard `EnvFilter` directives; defaults to
///   `prospect=info,warn` (`prospect=debug,info` when `DEBUG` is set).
/// - `PROSPECT_LOG_FORMAT`: `json` for machine-readable output, anything
///   else gets the compact human format.
///
/// Calling this twice panics (global subscriber already set), so it must be
/// invoked once by the host, never by library code.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("PROSPECT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "prospect=debug,info"
        } else {
            "prospect=info,warn"
        })
    });

    let format = env::var("PROSPECT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}
