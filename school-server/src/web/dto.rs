//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query for the school listing. Without `q` every school is listed.
#[derive(Debug, Deserialize)]
pub struct SchoolsQuery {
    /// Name, fragment or initial consonants to search for
    pub q: Option<String>,
}

/// Query for a day's meals.
#[derive(Debug, Deserialize)]
pub struct MealsQuery {
    /// Regional education office code (e.g. "B10")
    pub org_code: Option<String>,

    /// Standard school code
    pub school_code: Option<String>,

    /// Date as YYYYMMDD (defaults to today)
    pub date: Option<String>,
}

/// Query for a class timetable.
#[derive(Debug, Deserialize)]
pub struct TimetableQuery {
    pub org_code: Option<String>,
    pub school_code: Option<String>,
    pub grade: Option<String>,
    pub class: Option<String>,

    /// Date as YYYYMMDD (defaults to today)
    pub date: Option<String>,
}

/// Response for the health check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub schools_count: usize,

    /// Time of the last published directory load
    pub last_refresh: Option<DateTime<Utc>>,

    /// Whether a directory load is running right now
    pub is_loading: bool,
    pub uptime_secs: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Treat an absent or blank query parameter as missing.
pub(super) fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
