//! Chart series for the flaky tests view
//!
//! Turns a list of [`DayRecord`]s into the points a bar chart widget
//! consumes. Each point carries a result class for colouring. The series
//! options tell the widget how many points to show and how to link and
//! describe each bar.

use flakeview_common::{DayRecord, CHART_DATA_LIMIT};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::escape::escape_text;
use crate::route::ViewRoute;

/// Status of one bar, rendered as its CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResultClass {
    #[serde(rename = "result-unknown")]
    Unknown,
    #[serde(rename = "result-failed")]
    Failed,
    #[serde(rename = "result-passed")]
    Passed,
}

impl ResultClass {
    pub fn css_class(self) -> &'static str {
        match self {
            ResultClass::Unknown => "result-unknown",
            ResultClass::Failed => "result-failed",
            ResultClass::Passed => "result-passed",
        }
    }
}

impl fmt::Display for ResultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Which graph a series belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Aggregate over every test of the project
    Overall,
    /// History of a single test
    PerTest,
}

/// Classify one day of a series.
///
/// Days on which a test did not exist yet are unknown. The overall graph
/// has no such notion, every day there counts.
pub fn classify(day: &DayRecord, kind: SeriesKind) -> ResultClass {
    if kind == SeriesKind::PerTest && !day.test_existed {
        return ResultClass::Unknown;
    }
    if day.flaky_runs > 0 {
        ResultClass::Failed
    } else {
        ResultClass::Passed
    }
}

/// Flaky runs as a percentage of passing runs, with two decimals
///
/// `"0.00"` when nothing passed. Rounds the exact quotient, halves away from zero.
pub fn flaky_ratio(flaky_runs: u64, passing_runs: u64) -> String {
    if passing_runs == 0 {
        return "0.00".to_string();
    }
    let flaky = flaky_runs as u128;
    let passing = passing_runs as u128;
    let hundredths = (20_000 * flaky + passing) / (2 * passing);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Link and tooltip callbacks handed to the chart widget
pub trait ChartFormatter: Send + Sync {
    /// Target of a click on the bar for `day`
    fn link(&self, day: &DayRecord) -> String;

    /// HTML shown when hovering the bar for `day`
    fn tooltip(&self, day: &DayRecord) -> String;
}

/// Links each bar back to this view for that day, tooltips show the flaky ratio
#[derive(Debug, Clone)]
pub struct FlakyRunsFormatter {
    route: ViewRoute,
}

impl FlakyRunsFormatter {
    pub fn new(route: ViewRoute) -> Self {
        Self { route }
    }
}

impl ChartFormatter for FlakyRunsFormatter {
    fn link(&self, day: &DayRecord) -> String {
        self.route.href(Some(&day.date))
    }

    fn tooltip(&self, day: &DayRecord) -> String {
        format!(
            "<h5>{}</h5><p>Flaky runs: {} ({}% of passing runs)</p>",
            escape_text(&day.date),
            day.flaky_runs,
            flaky_ratio(day.flaky_runs, day.passing_runs)
        )
    }
}

#[derive(Clone)]
pub struct ChartOptions {
    pub limit: usize,
    pub formatter: Arc<dyn ChartFormatter>,
}

impl ChartOptions {
    pub fn new(limit: usize, formatter: Arc<dyn ChartFormatter>) -> Self {
        Self { limit, formatter }
    }

    /// Default limit with [`FlakyRunsFormatter`] links into `route`
    pub fn for_route(route: ViewRoute) -> Self {
        Self::new(CHART_DATA_LIMIT, Arc::new(FlakyRunsFormatter::new(route)))
    }
}

impl fmt::Debug for ChartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOptions")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub class_name: ResultClass,
    pub value: u64,
    pub data: DayRecord,
}

/// A display series plus the options the widget needs to draw it
#[derive(Debug, Clone)]
pub struct ChartData {
    pub data: Vec<ChartPoint>,
    pub options: ChartOptions,
}

impl ChartData {
    pub fn new(days: &[DayRecord], kind: SeriesKind, options: ChartOptions) -> Self {
        let data = days
            .iter()
            .map(|day| ChartPoint {
                class_name: classify(day, kind),
                value: day.flaky_runs,
                data: day.clone(),
            })
            .collect();
        Self { data, options }
    }

    /// The most recent `limit` points
    pub fn visible(&self) -> &[ChartPoint] {
        let start = self.data.len().saturating_sub(self.options.limit);
        &self.data[start..]
    }

    pub fn link(&self, point: &ChartPoint) -> String {
        self.options.formatter.link(&point.data)
    }

    pub fn tooltip(&self, point: &ChartPoint) -> String {
        self.options.formatter.tooltip(&point.data)
    }

    pub fn max_value(&self) -> u64 {
        self.visible().iter().map(|p| p.value).max().unwrap_or(0)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedPoint<'a> {
    class_name: ResultClass,
    value: u64,
    data: &'a DayRecord,
    link: String,
    tooltip: String,
}

#[derive(Serialize)]
struct ResolvedOptions {
    limit: usize,
}

// The formatters cannot be serialized, so every point is emitted with its
// link and tooltip already applied.
impl Serialize for ChartData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let points: Vec<ResolvedPoint<'_>> = self
            .data
            .iter()
            .map(|point| ResolvedPoint {
                class_name: point.class_name,
                value: point.value,
                data: &point.data,
                link: self.link(point),
                tooltip: self.tooltip(point),
            })
            .collect();

        let mut state = serializer.serialize_struct("ChartData", 2)?;
        state.serialize_field("data", &points)?;
        state.serialize_field("options", &ResolvedOptions { limit: self.options.limit })?;
        state.end()
    }
}
