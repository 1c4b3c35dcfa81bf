//! Wire types for NEIS JSON responses.
//!
//! Every NEIS dataset answers with the same envelope:
//!
//! ```json
//! {"schoolInfo": [{"head": [...]}, {"row": [{...}, {...}]}]}
//! ```
//!
//! When nothing matches, or the request is rejected, the dataset key is
//! replaced by a bare `{"RESULT": {"CODE": "...", "MESSAGE": "..."}}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::NeisError;

/// Result code for a successful request.
const CODE_OK: &str = "INFO-000";

/// Result code for "no matching data".
const CODE_NO_DATA: &str = "INFO-200";

/// One row of the `schoolInfo` dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchoolRow {
    #[serde(rename = "SD_SCHUL_CODE", default, deserialize_with = "lenient_string")]
    pub school_code: String,

    #[serde(rename = "ATPT_OFCDC_SC_CODE", default, deserialize_with = "lenient_string")]
    pub org_code: String,

    #[serde(rename = "SCHUL_NM", default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(rename = "ORG_RDNMA", default, deserialize_with = "lenient_string")]
    pub address: String,

    #[serde(rename = "SCHUL_KND_SC_NM", default, deserialize_with = "lenient_string")]
    pub kind: String,
}

/// One row of the `mealServiceDietInfo` dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MealRow {
    #[serde(rename = "MLSV_YMD", default, deserialize_with = "lenient_string")]
    pub date: String,

    /// Meal kind in Korean (조식, 중식, 석식).
    #[serde(rename = "MMEAL_SC_NM", default, deserialize_with = "lenient_string")]
    pub meal_kind: String,

    /// Dishes separated by `<br/>`, each possibly followed by allergen codes.
    #[serde(rename = "DDISH_NM", default, deserialize_with = "lenient_string")]
    pub dishes: String,

    /// e.g. `"612.3 Kcal"`.
    #[serde(rename = "CAL_INFO", default, deserialize_with = "lenient_string")]
    pub calories: String,
}

/// One row of the `hisTimetable` / `elsTimetable` datasets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TimetableRow {
    #[serde(rename = "ALL_TI_YMD", default, deserialize_with = "lenient_string")]
    pub date: String,

    #[serde(rename = "PERIO", default, deserialize_with = "lenient_string")]
    pub period: String,

    #[serde(rename = "ITRT_CNTNT", default, deserialize_with = "lenient_string")]
    pub subject: String,
}

/// `RESULT` object returned in place of a dataset.
#[derive(Debug, Deserialize)]
struct ResultCode {
    #[serde(rename = "CODE")]
    code: String,

    #[serde(rename = "MESSAGE", default)]
    message: String,
}

/// One element of a dataset array; only the `row` element carries data.
#[derive(Debug, Deserialize)]
struct Dataset<T> {
    #[serde(default = "Vec::new")]
    row: Vec<T>,
}

/// Accept a string field, treating `null`, numbers and absent values as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn json_error(e: serde_json::Error) -> NeisError {
    NeisError::Json {
        message: e.to_string(),
    }
}

/// Decode the rows of `dataset` from a NEIS response body.
///
/// "No data" answers decode to an empty list; any other `RESULT` code is
/// reported as [`NeisError::Service`].
pub fn decode_rows<T: DeserializeOwned>(body: &str, dataset: &str) -> Result<Vec<T>, NeisError> {
    let mut value: Value = serde_json::from_str(body).map_err(json_error)?;

    if let Some(result) = value.get_mut("RESULT").map(Value::take) {
        let result: ResultCode = serde_json::from_value(result).map_err(json_error)?;
        return match result.code.as_str() {
            CODE_OK | CODE_NO_DATA => Ok(Vec::new()),
            _ => Err(NeisError::Service {
                code: result.code,
                message: result.message,
            }),
        };
    }

    let Some(sections) = value.get_mut(dataset).map(Value::take) else {
        return Ok(Vec::new());
    };

    let sections: Vec<Dataset<T>> = serde_json::from_value(sections).map_err(json_error)?;
    Ok(sections.into_iter().flat_map(|s| s.row).collect())
}
