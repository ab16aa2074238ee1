//! Local JSON cache for offline startup.
//!
//! Each dataset is stored as `{cache_dir}/{dataset}.json` with the time it
//! was written. Data older than 60 minutes is considered stale and is
//! refreshed in the background.

pub mod manager;

pub use manager::{CacheAges, CacheManager, CachedData};
