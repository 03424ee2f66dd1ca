//! Two-tier cache for optimization responses and downloaded player pools
//!
//! - L1: in-memory LRU cache
//! - L2: JSON files under the user cache directory
//!
//! Disk hits are promoted back into memory.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{
    collections::HashMap,
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::dfs::request::{OptimizeRequest, OptimizeResponse};
use crate::dfs::types::PlayerRecord;
use crate::optimizer::SolverOptions;

/// Path: ~/.cache/dfs-lineup
pub fn cache_root() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("dfs-lineup")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Key usable for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// File stem for disk storage
    fn to_file_key(&self) -> String;

    fn to_file_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.json", self.to_file_key()))
    }
}

/// Leading 64 bits of a SHA-256 over the length-prefixed parts.
fn fingerprint(parts: &[&str]) -> u64 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// Identifies a solved request: the full request body plus the solver
/// settings that can change its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseCacheKey {
    pub fingerprint: u64,
}

impl ResponseCacheKey {
    pub fn for_request(request: &OptimizeRequest, options: &SolverOptions) -> serde_json::Result<Self> {
        let body = serde_json::to_string(request)?;
        let settings = format!(
            "{}|{:?}|{:?}|{}",
            options.strategy,
            options.limits.time_limit,
            options.limits.node_limit,
            options.exact_pool_limit
        );
        Ok(Self {
            fingerprint: fingerprint(&[&body, &settings]),
        })
    }
}

impl CacheKey for ResponseCacheKey {
    fn to_file_key(&self) -> String {
        format!("response_{:016x}", self.fingerprint)
    }
}

/// Cache key for player pools downloaded over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerPoolCacheKey {
    pub url: String,
}

impl CacheKey for PlayerPoolCacheKey {
    fn to_file_key(&self) -> String {
        format!("pool_{:016x}", fingerprint(&[&self.url]))
    }
}

/// Unified cache that combines LRU memory cache with file system persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: Arc<Mutex<LruCache<K, V>>>,
    memory_capacity: usize,
    dir: PathBuf,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Create a cache persisting under the default cache directory
    pub fn new(memory_capacity: usize) -> Self {
        Self::with_dir(memory_capacity, cache_root())
    }

    pub fn with_dir(memory_capacity: usize, dir: impl Into<PathBuf>) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            memory_capacity: capacity.get(),
            dir: dir.into(),
        }
    }

    fn memory(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.memory_cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get an item from cache (checks memory first, then disk)
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(value) = self.memory().get(key) {
            return Some(value.clone());
        }

        let value = self.get_from_disk(key)?;
        self.memory().put(key.clone(), value.clone());
        Some(value)
    }

    /// Put an item into cache (stores in both memory and disk)
    pub fn put(&self, key: K, value: V) -> std::io::Result<()> {
        self.memory().put(key.clone(), value.clone());
        self.put_to_disk(&key, &value)
    }

    fn get_from_disk(&self, key: &K) -> Option<V> {
        let content = try_read_to_string(&key.to_file_path(&self.dir))?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, value: &V) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&key.to_file_path(&self.dir), &content)
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    /// Drop one entry from both tiers
    pub fn invalidate(&self, key: &K) -> std::io::Result<()> {
        self.memory().pop(key);
        let path = key.to_file_path(&self.dir);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// (entries in memory, capacity)
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.memory().len(), self.memory_capacity)
    }
}

pub struct CacheManager {
    pub responses: UnifiedCache<ResponseCacheKey, OptimizeResponse>,
    pub player_pools: UnifiedCache<PlayerPoolCacheKey, Vec<PlayerRecord>>,
}

impl CacheManager {
    pub fn new() -> Self {
        Self::with_dir(cache_root())
    }

    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            responses: UnifiedCache::with_dir(100, dir.join("responses")),
            player_pools: UnifiedCache::with_dir(20, dir.join("pools")),
        }
    }

    pub fn clear_all_memory(&self) {
        self.responses.clear_memory();
        self.player_pools.clear_memory();
    }

    pub fn memory_stats(&self) -> HashMap<String, (usize, usize)> {
        let mut stats = HashMap::new();
        stats.insert("responses".to_string(), self.responses.memory_stats());
        stats.insert("player_pools".to_string(), self.player_pools.memory_stats());
        stats
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}
