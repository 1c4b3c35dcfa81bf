//! Shared TTL cache for query results.
//!
//! One cache instance backs name searches, meals and timetables. Keys are
//! strings namespaced by operation (`search:`, `meals:`, `timetable:`), so
//! the three never collide.
//!
//! Expiry has two independent halves: reads never return an entry older
//! than the TTL, and a periodic sweep physically drops expired entries to
//! bound memory. There is no size bound.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::{Meals, SchoolRecord, Timetable};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied to every entry.
    pub ttl: Duration,

    /// How often the background sweep reclaims expired entries.
    pub sweep_interval: Duration,
}

impl CacheConfig {
    /// Set the entry TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
        }
    }
}

/// Key of a cached query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey<'a> {
    Search {
        query: &'a str,
    },
    Meals {
        org_code: &'a str,
        school_code: &'a str,
        date: &'a str,
    },
    Timetable {
        org_code: &'a str,
        school_code: &'a str,
        grade: &'a str,
        class: &'a str,
        date: &'a str,
    },
}

impl fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Search { query } => write!(f, "search:{query}"),
            CacheKey::Meals {
                org_code,
                school_code,
                date,
            } => write!(f, "meals:{org_code}:{school_code}:{date}"),
            CacheKey::Timetable {
                org_code,
                school_code,
                grade,
                class,
                date,
            } => write!(
                f,
                "timetable:{org_code}:{school_code}:{grade}:{class}:{date}"
            ),
        }
    }
}

/// A cached query result.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Schools(Arc<Vec<SchoolRecord>>),
    Meals(Arc<Meals>),
    Timetable(Arc<Timetable>),
}

/// Expiring key → value store shared by all query paths.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Clone)]
pub struct TtlCache {
    entries: MokaCache<String, CachedValue>,
    sweep_interval: Duration,
}

impl TtlCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder().time_to_live(config.ttl).build();

        Self {
            entries,
            sweep_interval: config.sweep_interval,
        }
    }

    /// Look up an entry. Entries older than the TTL are never returned.
    pub async fn get(&self, key: &str) -> Option<CachedValue> {
        self.entries.get(key).await
    }

    /// Insert or overwrite an entry, restarting its TTL.
    pub async fn put(&self, key: impl Into<String>, value: CachedValue) {
        self.entries.insert(key.into(), value).await;
    }

    /// Look up a cached school list. A value of another kind counts as a miss.
    pub async fn get_schools(&self, key: &str) -> Option<Arc<Vec<SchoolRecord>>> {
        match self.get(key).await {
            Some(CachedValue::Schools(schools)) => Some(schools),
            _ => None,
        }
    }

    /// Look up cached meals. A value of another kind counts as a miss.
    pub async fn get_meals(&self, key: &str) -> Option<Arc<Meals>> {
        match self.get(key).await {
            Some(CachedValue::Meals(meals)) => Some(meals),
            _ => None,
        }
    }

    /// Look up a cached timetable. A value of another kind counts as a miss.
    pub async fn get_timetable(&self, key: &str) -> Option<Arc<Timetable>> {
        match self.get(key).await {
            Some(CachedValue::Timetable(timetable)) => Some(timetable),
            _ => None,
        }
    }

    /// Physically remove expired entries.
    pub async fn sweep(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Number of stored entries (for monitoring). Approximate until the next sweep.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Spawn the background sweep, running every `sweep_interval`.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(cache.sweep_interval);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                cache.sweep().await;
                debug!(entries = cache.entry_count(), "swept expired cache entries");
            }
        })
    }
}
