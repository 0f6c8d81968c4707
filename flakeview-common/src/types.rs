use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// Maximum number of points a chart widget shows
pub const CHART_DATA_LIMIT: usize = 50;

/// Date format used by the flaky tests API and the view's `date` parameter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Flaky/passing run counts for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: String,
    pub flaky_runs: u64,
    pub passing_runs: u64,
    /// Absent from the overall series
    #[serde(default)]
    pub test_existed: bool,
}

/// A test that flaked on the requested day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlakyTest {
    pub name: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub history: Vec<DayRecord>,
}

/// Body of `GET /api/0/projects/{id}/flaky_tests/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlakyTestsResponse {
    pub chart_data: Vec<DayRecord>,
    pub flaky_tests: Vec<FlakyTest>,
    pub date: String,
}

/// Body of `GET /api/0/projects/{id}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
}

impl DayRecord {
    pub fn new(date: impl Into<String>, flaky_runs: u64, passing_runs: u64, test_existed: bool) -> Self {
        Self {
            date: date.into(),
            flaky_runs,
            passing_runs,
            test_existed,
        }
    }
}

/// Validate a `YYYY-MM-DD` date as accepted by the flaky tests endpoint
pub fn parse_date(value: &str) -> CommonResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| CommonError::InvalidDate(value.to_string()))
}
