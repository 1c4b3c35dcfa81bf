//! Cached meal and timetable lookups.
//!
//! Both are thin pass-throughs to [`NeisApi`]: the first request for a key
//! goes to the remote service and the answer, empty or not, is served from
//! the shared [`TtlCache`] until it expires.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheKey, CachedValue, TtlCache};
use crate::domain::{Meals, Timetable};
use crate::neis::{NeisApi, NeisError};

/// Per-school, time-varying data.
pub struct SchoolData<A> {
    api: Arc<A>,
    cache: TtlCache,
}

impl<A> Clone for SchoolData<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            cache: self.cache.clone(),
        }
    }
}

impl<A: NeisApi> SchoolData<A> {
    pub fn new(api: Arc<A>, cache: TtlCache) -> Self {
        Self { api, cache }
    }

    /// Meals served at a school on `date` (`YYYYMMDD`), by kind.
    pub async fn meals(
        &self,
        org_code: &str,
        school_code: &str,
        date: &str,
    ) -> Result<Arc<Meals>, NeisError> {
        let key = CacheKey::Meals {
            org_code,
            school_code,
            date,
        }
        .to_string();

        if let Some(hit) = self.cache.get_meals(&key).await {
            return Ok(hit);
        }

        let meals = Arc::new(self.api.meals(org_code, school_code, date).await?);
        debug!(key, kinds = meals.len(), "fetched meals");
        self.cache
            .put(key, CachedValue::Meals(Arc::clone(&meals)))
            .await;

        Ok(meals)
    }

    /// Subjects for one class on `date` (`YYYYMMDD`), in period order.
    pub async fn timetable(
        &self,
        org_code: &str,
        school_code: &str,
        grade: &str,
        class: &str,
        date: &str,
    ) -> Result<Arc<Timetable>, NeisError> {
        let key = CacheKey::Timetable {
            org_code,
            school_code,
            grade,
            class,
            date,
        }
        .to_string();

        if let Some(hit) = self.cache.get_timetable(&key).await {
            return Ok(hit);
        }

        let timetable = Arc::new(
            self.api
                .timetable(org_code, school_code, grade, class, date)
                .await?,
        );
        debug!(key, periods = timetable.len(), "fetched timetable");
        self.cache
            .put(key, CachedValue::Timetable(Arc::clone(&timetable)))
            .await;

        Ok(timetable)
    }
}
