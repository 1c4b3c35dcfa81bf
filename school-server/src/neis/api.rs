//! The seam between the school service and the NEIS network API.

use std::future::Future;

use crate::domain::{Meals, Timetable};

use super::error::NeisError;
use super::region::Region;
use super::types::SchoolRow;

/// Source of school directory, meal and timetable data.
///
/// Implemented by [`NeisClient`](super::NeisClient) for production and by
/// in-memory fakes in tests.
pub trait NeisApi: Send + Sync + 'static {
    /// Fetch one page (1-based) of the directory for a region.
    ///
    /// Returns the raw rows; a page shorter than `page_size` is the last one.
    fn school_page(
        &self,
        region: Region,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<SchoolRow>, NeisError>> + Send;

    /// Live search for schools whose name contains `name`.
    fn search_schools(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<SchoolRow>, NeisError>> + Send;

    /// Meals served at a school on `date` (`YYYYMMDD`).
    fn meals(
        &self,
        org_code: &str,
        school_code: &str,
        date: &str,
    ) -> impl Future<Output = Result<Meals, NeisError>> + Send;

    /// Subjects for a grade and class on `date` (`YYYYMMDD`).
    fn timetable(
        &self,
        org_code: &str,
        school_code: &str,
        grade: &str,
        class: &str,
        date: &str,
    ) -> impl Future<Output = Result<Timetable, NeisError>> + Send;
}
