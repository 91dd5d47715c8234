// Version information for the embed node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-embedding-service-2026-08-07";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-07";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "local-backend",
    "remote-backend",
    "deterministic-vectors",
    "canonical-envelope",
    "configurable-timeout",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Embed Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
