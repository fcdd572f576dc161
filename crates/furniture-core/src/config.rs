//! Environment lookups used by service `from_env` constructors.

use std::str::FromStr;

/// Read a required variable.
///
/// # Panics
///
/// Panics with the variable name if it is unset or not valid unicode.
pub fn require_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("missing required env var {key}"))
}

/// Read and parse an optional variable, falling back to `default` when it is
/// unset or unparsable.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
