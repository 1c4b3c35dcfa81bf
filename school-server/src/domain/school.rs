//! School directory records.

use serde::Serialize;

use super::error::DomainError;

/// One school in the national directory.
///
/// A `SchoolRecord` always has a non-empty code and name; the remaining
/// fields are informational and may be empty.
///
/// # Examples
///
/// ```
/// use school_server::domain::SchoolRecord;
///
/// let school = SchoolRecord::new("7010057", "B10", "서울고등학교", "", "고등학교").unwrap();
/// assert_eq!(school.name(), "서울고등학교");
///
/// assert!(SchoolRecord::new("", "B10", "서울고등학교", "", "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolRecord {
    code: String,
    org_code: String,
    name: String,
    address: String,
    #[serde(rename = "type")]
    kind: String,
}

impl SchoolRecord {
    /// Build a record, rejecting an empty school code or name.
    pub fn new(
        code: impl Into<String>,
        org_code: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let code = code.into();
        let name = name.into();

        if code.is_empty() {
            return Err(DomainError::MissingField("code"));
        }
        if name.is_empty() {
            return Err(DomainError::MissingField("name"));
        }

        Ok(Self {
            code,
            org_code: org_code.into(),
            name,
            address: address.into(),
            kind: kind.into(),
        })
    }

    /// Standard school code (`SD_SCHUL_CODE`).
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Code of the regional education office that owns the school.
    pub fn org_code(&self) -> &str {
        &self.org_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Road-name address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// School kind, e.g. 초등학교, 중학교, 고등학교.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}
