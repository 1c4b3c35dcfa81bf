//! Bulk loading of the school directory.
//!
//! The directory is fetched as one shard per regional office. All shards
//! are fetched concurrently and merged into a single [`Snapshot`] only once
//! every shard has finished, so a half-built directory is never visible.
//!
//! A shard that fails or times out keeps whatever pages it had already
//! fetched; it reduces coverage for this cycle but never aborts the load.

use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::SchoolRecord;
use crate::neis::{NeisApi, Region, school_from_row};

use super::snapshot::Snapshot;

/// Rough size of the national directory, used to presize the merge buffer.
const EXPECTED_SCHOOLS: usize = 15_000;

/// Configuration for bulk loading.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Rows requested per page. A shorter page ends the region.
    pub page_size: u32,

    /// Deadline for a single page request.
    pub page_timeout: Duration,
}

impl LoaderConfig {
    /// Set the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the per-page deadline.
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = timeout;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            page_size: 1000,
            page_timeout: Duration::from_secs(10),
        }
    }
}

/// Load every region and merge the results into one snapshot.
pub async fn load_all<A: NeisApi>(api: &A, config: &LoaderConfig) -> Snapshot {
    let started = Instant::now();

    let loads = Region::ALL
        .iter()
        .map(|&region| load_region(api, region, config));
    let results = join_all(loads).await;

    let mut schools = Vec::with_capacity(EXPECTED_SCHOOLS);
    for (region, region_schools) in Region::ALL.iter().zip(results) {
        if !region_schools.is_empty() {
            info!(
                region = %region,
                name = region.name(),
                schools = region_schools.len(),
                "loaded region"
            );
        }
        schools.extend(region_schools);
    }

    let snapshot: Snapshot = schools.into_iter().collect();
    info!(
        schools = snapshot.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "directory load complete"
    );
    snapshot
}

/// Page through one region until a short page, an error or a timeout.
async fn load_region<A: NeisApi>(
    api: &A,
    region: Region,
    config: &LoaderConfig,
) -> Vec<SchoolRecord> {
    let mut schools = Vec::new();

    for page in 1.. {
        let fetch = api.school_page(region, page, config.page_size);
        let rows = match tokio::time::timeout(config.page_timeout, fetch).await {
            Ok(Ok(rows)) => rows,
            Ok(Err(e)) => {
                warn!(
                    region = %region,
                    page,
                    error = %e,
                    "region page failed, keeping partial results"
                );
                break;
            }
            Err(_) => {
                warn!(region = %region, page, "region page timed out, keeping partial results");
                break;
            }
        };

        let fetched = rows.len();
        let before = schools.len();
        schools.extend(rows.into_iter().filter_map(school_from_row));

        let dropped = fetched - (schools.len() - before);
        if dropped > 0 {
            debug!(region = %region, page, dropped, "dropped rows without code or name");
        }

        if fetched == 0 || fetched < config.page_size as usize {
            break;
        }
    }

    schools
}
