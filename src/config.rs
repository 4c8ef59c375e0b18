//! Build-time Configuration
//!
//! Everything the user can change at runtime (server, token, theme, CSS)
//! lives in `AppState` and is persisted with it.

/// Local storage key holding the serialized `AppState`
pub const STORAGE_KEY: &str = "pomoday";

/// Minimum milliseconds between two sync round trips
pub const SYNC_TIMER: i64 = 60_000;

/// Number of submitted command lines kept for recall
pub const HISTORY_CAPACITY: usize = 20;

/// Tag used when a new task names none
pub const DEFAULT_TAG: &str = "@uncategorized";

/// Analytics measurement id, baked in at build time
pub const ANALYTICS_ID: Option<&str> = option_env!("POMODAY_ANALYTICS_ID");
