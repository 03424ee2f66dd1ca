//! Core utilities shared by the commands
//!
//! - `cache`: LRU + file system caching of responses and player pools
//! - `http`: remote player pool downloads

pub mod cache;
pub mod http;

pub use cache::{cache_root, CacheManager, PlayerPoolCacheKey, ResponseCacheKey};
pub use http::{build_client, fetch_player_records, is_remote};
