//! NEIS open data HTTP client.
//!
//! All datasets share one URL scheme (`{base}/{dataset}?KEY=..&Type=json`)
//! and one response envelope, so every request goes through
//! [`NeisClient::get_dataset`].

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::{Meals, Timetable};

use super::api::NeisApi;
use super::convert::{meals_from_rows, timetable_from_rows};
use super::error::NeisError;
use super::region::Region;
use super::types::{MealRow, SchoolRow, TimetableRow, decode_rows};

/// Default base URL for the NEIS open data hub.
const DEFAULT_BASE_URL: &str = "https://open.neis.go.kr/hub";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Page size for live name searches.
const DEFAULT_SEARCH_PAGE_SIZE: u32 = 100;

const SCHOOL_INFO: &str = "schoolInfo";
const MEAL_INFO: &str = "mealServiceDietInfo";
const HIGH_SCHOOL_TIMETABLE: &str = "hisTimetable";
const ELEMENTARY_TIMETABLE: &str = "elsTimetable";

/// Configuration for the NEIS client.
#[derive(Debug, Clone)]
pub struct NeisConfig {
    /// API key sent as the `KEY` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum rows returned by a live name search
    pub search_page_size: u32,
}

impl NeisConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the NEIS open data API.
#[derive(Debug, Clone)]
pub struct NeisClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    search_page_size: u32,
}

impl NeisClient {
    /// Create a new NEIS client with the given configuration.
    pub fn new(config: NeisConfig) -> Result<Self, NeisError> {
        if config.api_key.is_empty() {
            return Err(NeisError::Config {
                message: "API key is empty".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            search_page_size: config.search_page_size,
        })
    }

    /// Query for a live name search. `*` wildcards on both sides of
    /// `SCHUL_NM` match the name anywhere.
    fn search_params(&self, name: &str) -> [(&'static str, String); 3] {
        [
            ("pIndex", "1".to_string()),
            ("pSize", self.search_page_size.to_string()),
            ("SCHUL_NM", format!("*{name}*")),
        ]
    }

    /// Fetch and decode the rows of one dataset.
    async fn get_dataset<T: DeserializeOwned>(
        &self,
        dataset: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, NeisError> {
        let url = format!("{}/{}", self.base_url, dataset);

        let response = self
            .http
            .get(&url)
            .query(&[("KEY", self.api_key.as_str()), ("Type", "json")])
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NeisError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        decode_rows(&body, dataset)
    }
}

/// Distinguish deadline expiry from other transport failures.
fn transport_error(err: reqwest::Error) -> NeisError {
    if err.is_timeout() {
        NeisError::Timeout
    } else {
        NeisError::Http(err)
    }
}

impl NeisApi for NeisClient {
    async fn school_page(
        &self,
        region: Region,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<SchoolRow>, NeisError> {
        self.get_dataset(
            SCHOOL_INFO,
            &[
                ("pIndex", page.to_string()),
                ("pSize", page_size.to_string()),
                ("ATPT_OFCDC_SC_CODE", region.code().to_string()),
            ],
        )
        .await
    }

    async fn search_schools(&self, name: &str) -> Result<Vec<SchoolRow>, NeisError> {
        self.get_dataset(SCHOOL_INFO, &self.search_params(name)).await
    }

    async fn meals(
        &self,
        org_code: &str,
        school_code: &str,
        date: &str,
    ) -> Result<Meals, NeisError> {
        let rows: Vec<MealRow> = self
            .get_dataset(
                MEAL_INFO,
                &[
                    ("ATPT_OFCDC_SC_CODE", org_code.to_string()),
                    ("SD_SCHUL_CODE", school_code.to_string()),
                    ("MLSV_YMD", date.to_string()),
                ],
            )
            .await?;

        Ok(meals_from_rows(rows))
    }

    async fn timetable(
        &self,
        org_code: &str,
        school_code: &str,
        grade: &str,
        class: &str,
        date: &str,
    ) -> Result<Timetable, NeisError> {
        let params = [
            ("ATPT_OFCDC_SC_CODE", org_code.to_string()),
            ("SD_SCHUL_CODE", school_code.to_string()),
            ("GRADE", grade.to_string()),
            ("CLASS_NM", class.to_string()),
            ("TI_FROM_YMD", date.to_string()),
            ("TI_TO_YMD", date.to_string()),
        ];

        // Secondary schools publish under hisTimetable; if the school has no
        // rows there it is most likely an elementary school.
        let rows: Vec<TimetableRow> = self.get_dataset(HIGH_SCHOOL_TIMETABLE, &params).await?;
        if !rows.is_empty() {
            return Ok(timetable_from_rows(rows));
        }

        let rows: Vec<TimetableRow> = self.get_dataset(ELEMENTARY_TIMETABLE, &params).await?;
        Ok(timetable_from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = NeisConfig::new("test-key");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.search_page_size, 100);
    }

    #[test]
    fn config_builder() {
        let config = NeisConfig::new("test-key")
            .with_base_url("http://localhost:8080/hub")
            .with_timeout(3);

        assert_eq!(config.base_url, "http://localhost:8080/hub");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn client_creation() {
        let client = NeisClient::new(NeisConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = NeisClient::new(NeisConfig::new("")).unwrap_err();
        assert!(matches!(err, NeisError::Config { .. }));
    }

    #[test]
    fn search_matches_name_anywhere() {
        let client = NeisClient::new(NeisConfig::new("k")).unwrap();
        let params = client.search_params("서울");

        assert!(params.contains(&("SCHUL_NM", "*서울*".to_string())));
        assert!(params.contains(&("pSize", "100".to_string())));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client =
            NeisClient::new(NeisConfig::new("k").with_base_url("http://localhost/hub/")).unwrap();
        assert_eq!(client.base_url, "http://localhost/hub");
    }
}
