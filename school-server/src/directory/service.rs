//! The searchable school directory.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CachedValue, TtlCache};
use crate::domain::SchoolRecord;
use crate::neis::{NeisApi, NeisError, school_from_row};

use super::loader::{LoaderConfig, load_all};
use super::rank::rank;
use super::snapshot::Snapshot;

/// Configuration for the directory.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Maximum number of results returned by a search.
    pub max_results: usize,

    /// Time between scheduled full reloads.
    pub refresh_interval: Duration,

    pub loader: LoaderConfig,
}

impl DirectoryConfig {
    /// Set the scheduled reload interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the loader configuration.
    pub fn with_loader(mut self, loader: LoaderConfig) -> Self {
        self.loader = loader;
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            max_results: 100,
            refresh_interval: Duration::from_secs(24 * 60 * 60),
            loader: LoaderConfig::default(),
        }
    }
}

/// What a call to [`SchoolDirectory::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot with this many schools is now live.
    Published { schools: usize },

    /// The load found no schools; the previous snapshot stays live.
    Empty,

    /// Another refresh was already running.
    Skipped,
}

/// Point-in-time health of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStatus {
    pub school_count: usize,
    pub last_refresh: Option<DateTime<Utc>>,
    pub refresh_in_progress: bool,
}

#[derive(Debug, Default)]
struct RefreshState {
    in_progress: bool,
    last_refresh: Option<DateTime<Utc>>,
}

fn lock(state: &Mutex<RefreshState>) -> MutexGuard<'_, RefreshState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a refresh as running; clears the mark when dropped, including on
/// panic or cancellation of the refresh future.
struct InProgress<'a> {
    state: &'a Mutex<RefreshState>,
}

impl<'a> InProgress<'a> {
    /// Claim the refresh slot, or `None` if a refresh is already running.
    fn acquire(state: &'a Mutex<RefreshState>) -> Option<Self> {
        let mut guard = lock(state);
        if guard.in_progress {
            return None;
        }
        guard.in_progress = true;
        Some(Self { state })
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        lock(self.state).in_progress = false;
    }
}

struct Inner<A> {
    api: Arc<A>,
    cache: TtlCache,
    config: DirectoryConfig,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    refresh: Mutex<RefreshState>,
}

/// Searchable, periodically reloaded view of the national school directory.
///
/// Readers copy the current snapshot reference under a brief read lock and
/// then work on the immutable snapshot, so a reload never blocks searches
/// in flight. Cloning is cheap; clones share the same state.
pub struct SchoolDirectory<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for SchoolDirectory<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: NeisApi> SchoolDirectory<A> {
    /// Create an empty directory. Nothing is loaded until [`refresh`](Self::refresh).
    pub fn new(api: Arc<A>, cache: TtlCache, config: DirectoryConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                cache,
                config,
                snapshot: RwLock::new(None),
                refresh: Mutex::new(RefreshState::default()),
            }),
        }
    }

    /// The live snapshot, if one has been published.
    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.inner.snapshot.read().await.clone()
    }

    /// Find schools by name, best match first.
    ///
    /// Results come from the cache when possible, otherwise from ranking
    /// the live snapshot. Before the first load completes this falls back to
    /// an unranked, uncached live search and starts a load in the background.
    pub async fn search(&self, query: &str) -> Result<Arc<Vec<SchoolRecord>>, NeisError> {
        let key = CacheKey::Search { query }.to_string();
        if let Some(hit) = self.inner.cache.get_schools(&key).await {
            return Ok(hit);
        }

        let Some(snapshot) = self.current().await else {
            return self.search_live(query).await;
        };

        let results: Vec<SchoolRecord> =
            rank(snapshot.entries(), query, self.inner.config.max_results)
                .into_iter()
                .map(|ranked| ranked.entry.school().clone())
                .collect();
        let results = Arc::new(results);

        self.inner
            .cache
            .put(key, CachedValue::Schools(Arc::clone(&results)))
            .await;

        Ok(results)
    }

    /// Cold-start search against the remote service.
    async fn search_live(&self, query: &str) -> Result<Arc<Vec<SchoolRecord>>, NeisError> {
        debug!(query, "directory not loaded yet, searching live");
        self.spawn_refresh();

        let rows = self.inner.api.search_schools(query).await?;
        let schools = rows
            .into_iter()
            .filter_map(school_from_row)
            .take(self.inner.config.max_results)
            .collect();

        Ok(Arc::new(schools))
    }

    /// Every school in the live snapshot (empty before the first load).
    pub async fn all_schools(&self) -> Vec<SchoolRecord> {
        self.current()
            .await
            .map(|snapshot| {
                snapshot
                    .entries()
                    .iter()
                    .map(|entry| entry.school().clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reload the whole directory and publish it.
    ///
    /// Returns [`RefreshOutcome::Skipped`] without doing any work if another
    /// refresh is running. A load that finds no schools at all is not
    /// published, so a total outage keeps serving the previous snapshot.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(_in_progress) = InProgress::acquire(&self.inner.refresh) else {
            debug!("refresh already in progress, skipping");
            return RefreshOutcome::Skipped;
        };

        let snapshot = load_all(self.inner.api.as_ref(), &self.inner.config.loader).await;
        if snapshot.is_empty() {
            warn!("directory load returned no schools, keeping previous snapshot");
            return RefreshOutcome::Empty;
        }

        let schools = snapshot.len();
        let loaded_at = snapshot.loaded_at();
        *self.inner.snapshot.write().await = Some(Arc::new(snapshot));
        lock(&self.inner.refresh).last_refresh = Some(loaded_at);

        RefreshOutcome::Published { schools }
    }

    /// Run [`refresh`](Self::refresh) on a background task.
    pub fn spawn_refresh(&self) -> JoinHandle<RefreshOutcome> {
        let directory = self.clone();
        tokio::spawn(async move { directory.refresh().await })
    }

    /// Spawn the scheduled reload loop: once immediately, then every
    /// `refresh_interval`. The loop never exits on its own.
    pub fn spawn_refresh_loop(&self) -> JoinHandle<()> {
        let directory = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(directory.inner.config.refresh_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                info!("refreshing school directory");
                match directory.refresh().await {
                    RefreshOutcome::Published { schools } => {
                        info!(schools, "school directory refreshed")
                    }
                    RefreshOutcome::Empty => warn!("school directory refresh found no schools"),
                    RefreshOutcome::Skipped => debug!("school directory refresh already running"),
                }
            }
        })
    }

    /// Current size, last successful refresh and whether a refresh is running.
    pub async fn status(&self) -> DirectoryStatus {
        let school_count = self.current().await.map_or(0, |snapshot| snapshot.len());
        let (last_refresh, refresh_in_progress) = self.refresh_state();

        DirectoryStatus {
            school_count,
            last_refresh,
            refresh_in_progress,
        }
    }

    fn refresh_state(&self) -> (Option<DateTime<Utc>>, bool) {
        let state = lock(&self.inner.refresh);
        (state.last_refresh, state.in_progress)
    }
}
