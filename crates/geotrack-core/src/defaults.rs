//! Centralized default constants for the geotrack console.
//!
//! **This module is the single source of truth** for shared default
//! values. Other crates reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// PAGINATION
// =============================================================================

/// Page sizes offered by the record-list pages.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Default rows per page for record-list pages.
pub const PAGE_SIZE: usize = 10;

// =============================================================================
// SERVER
// =============================================================================

/// Default tracking-server base URL.
pub const BASE_URL: &str = "http://127.0.0.1:8082";

/// Timeout for API requests in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Base URL of the tracking server.
pub const ENV_BASE_URL: &str = "GEOTRACK_BASE_URL";

/// Request timeout override in seconds.
pub const ENV_TIMEOUT_SECS: &str = "GEOTRACK_TIMEOUT_SECS";

/// Path of the persisted preferences file.
pub const ENV_PREFS_PATH: &str = "GEOTRACK_PREFS_PATH";

// =============================================================================
// PREFERENCES
// =============================================================================

/// File name used when only a preferences directory is configured.
pub const PREFS_FILE_NAME: &str = "geotrack-prefs.json";
