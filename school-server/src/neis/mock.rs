//! In-memory NEIS API for tests.
//!
//! Serves directory pages, name searches, meals and timetables from data
//! configured up front, and can simulate failing or stalled regions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;

use crate::domain::{Meals, Timetable};

use super::api::NeisApi;
use super::error::NeisError;
use super::region::Region;
use super::types::SchoolRow;

/// Build a directory row with the fields the index cares about.
pub fn school_row(region: Region, code: &str, name: &str) -> SchoolRow {
    SchoolRow {
        school_code: code.to_string(),
        org_code: region.code().to_string(),
        name: name.to_string(),
        address: String::new(),
        kind: "고등학교".to_string(),
    }
}

/// Mock NEIS API backed by in-memory data.
#[derive(Default)]
pub struct MockNeis {
    regions: HashMap<Region, Vec<SchoolRow>>,
    failing: HashSet<Region>,
    stalled: HashSet<Region>,
    gate: Option<Arc<Semaphore>>,
    search_rows: Vec<SchoolRow>,
    search_fails: bool,
    lookups_fail: bool,
    meals: Meals,
    timetable: Timetable,
    page_calls: AtomicUsize,
    search_calls: AtomicUsize,
    meal_calls: AtomicUsize,
    timetable_calls: AtomicUsize,
}

impl MockNeis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `rows` as the directory of `region`.
    pub fn with_region(mut self, region: Region, rows: Vec<SchoolRow>) -> Self {
        self.regions.insert(region, rows);
        self
    }

    /// Make every page request for `region` fail.
    pub fn with_failing_region(mut self, region: Region) -> Self {
        self.failing.insert(region);
        self
    }

    /// Make page requests for `region` never complete.
    pub fn with_stalled_region(mut self, region: Region) -> Self {
        self.stalled.insert(region);
        self
    }

    /// Hold every page request until `gate` has a permit available.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Rows served by live name searches (filtered by substring).
    pub fn with_search_rows(mut self, rows: Vec<SchoolRow>) -> Self {
        self.search_rows = rows;
        self
    }

    pub fn with_failing_search(mut self) -> Self {
        self.search_fails = true;
        self
    }

    /// Make meal and timetable lookups fail.
    pub fn with_failing_lookups(mut self) -> Self {
        self.lookups_fail = true;
        self
    }

    pub fn with_meals(mut self, meals: Meals) -> Self {
        self.meals = meals;
        self
    }

    pub fn with_timetable(mut self, timetable: Timetable) -> Self {
        self.timetable = timetable;
        self
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn meal_calls(&self) -> usize {
        self.meal_calls.load(Ordering::SeqCst)
    }

    pub fn timetable_calls(&self) -> usize {
        self.timetable_calls.load(Ordering::SeqCst)
    }

    fn lookup_error(&self) -> Result<(), NeisError> {
        if self.lookups_fail {
            return Err(NeisError::Service {
                code: "ERROR-300".to_string(),
                message: "required parameter missing".to_string(),
            });
        }
        Ok(())
    }
}

impl NeisApi for MockNeis {
    async fn school_page(
        &self,
        region: Region,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<SchoolRow>, NeisError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.map_err(|_| NeisError::Api {
                status: 0,
                message: "gate closed".to_string(),
            })?;
        }

        if self.stalled.contains(&region) {
            std::future::pending::<()>().await;
        }

        if self.failing.contains(&region) {
            return Err(NeisError::Api {
                status: 500,
                message: format!("region {region} unavailable"),
            });
        }

        let skip = (page.saturating_sub(1) * page_size) as usize;
        Ok(self
            .regions
            .get(&region)
            .map(|rows| {
                rows.iter()
                    .skip(skip)
                    .take(page_size as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn search_schools(&self, name: &str) -> Result<Vec<SchoolRow>, NeisError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.search_fails {
            return Err(NeisError::Api {
                status: 503,
                message: "search unavailable".to_string(),
            });
        }

        Ok(self
            .search_rows
            .iter()
            .filter(|row| row.name.contains(name))
            .cloned()
            .collect())
    }

    async fn meals(
        &self,
        _org_code: &str,
        _school_code: &str,
        _date: &str,
    ) -> Result<Meals, NeisError> {
        self.meal_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup_error()?;
        Ok(self.meals.clone())
    }

    async fn timetable(
        &self,
        _org_code: &str,
        _school_code: &str,
        _grade: &str,
        _class: &str,
        _date: &str,
    ) -> Result<Timetable, NeisError> {
        self.timetable_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup_error()?;
        Ok(self.timetable.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pages_slice_region_rows() {
        let rows = (0..5)
            .map(|i| school_row(Region::Seoul, &format!("{i}"), &format!("학교{i}")))
            .collect();
        let api = MockNeis::new().with_region(Region::Seoul, rows);

        assert_eq!(api.school_page(Region::Seoul, 1, 2).await.unwrap().len(), 2);
        assert_eq!(api.school_page(Region::Seoul, 3, 2).await.unwrap().len(), 1);
        assert!(api.school_page(Region::Seoul, 4, 2).await.unwrap().is_empty());
        assert!(api.school_page(Region::Busan, 1, 2).await.unwrap().is_empty());
        assert_eq!(api.page_calls(), 4);
    }

    #[tokio::test]
    async fn failing_region_errors() {
        let api = MockNeis::new().with_failing_region(Region::Daegu);
        assert!(api.school_page(Region::Daegu, 1, 10).await.is_err());
    }
}
