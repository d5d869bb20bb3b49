// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "vespa-filters";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".vespa-filters";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "vespa-filters.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "VESPA_FILTERS_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for log filter (falls back to RUST_LOG)
pub const ENV_LOG: &str = "VESPA_FILTERS_LOG";

/// Log filter used when neither ENV_LOG nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "warn";

// =============================================================================
// Environment Variables - Limits
// =============================================================================

/// Environment variable for maximum filter nesting depth
pub const ENV_MAX_DEPTH: &str = "VESPA_FILTERS_MAX_DEPTH";

/// Environment variable for maximum filter JSON size in bytes
pub const ENV_MAX_BYTES: &str = "VESPA_FILTERS_MAX_BYTES";
