use flakeview_common::{FlakyTest, FlakyTestsResponse};
use serde::Serialize;

use crate::chart::{ChartData, ChartOptions, SeriesKind};
use crate::escape::pre_tooltip;

/// State bound to the flaky tests template: `chartData`, `flakyTests`, `date`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlakyTestsView {
    pub chart_data: ChartData,
    pub flaky_tests: Vec<FlakyTestView>,
    pub date: String,
}

/// A flaky test with its display-only fields attached
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlakyTestView {
    #[serde(flatten)]
    pub test: FlakyTest,
    pub chart_data: ChartData,
    /// Escaped `<pre>` markup of the test output
    pub tooltip: String,
}

impl FlakyTestsView {
    /// Shape a fetched response for display
    pub fn prepare(response: FlakyTestsResponse, options: &ChartOptions) -> Self {
        let chart_data = ChartData::new(&response.chart_data, SeriesKind::Overall, options.clone());

        let flaky_tests = response
            .flaky_tests
            .into_iter()
            .map(|test| FlakyTestView {
                chart_data: ChartData::new(&test.history, SeriesKind::PerTest, options.clone()),
                tooltip: pre_tooltip(&test.output),
                test,
            })
            .collect();

        Self {
            chart_data,
            flaky_tests,
            date: response.date,
        }
    }
}
