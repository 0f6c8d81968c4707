use askama::Template;
use flakeview_common::Project;

use crate::chart::{ChartData, ResultClass};
use crate::error::DashboardResult;
use crate::state::Activation;

/// One bar of a rendered chart
#[derive(Debug, Clone)]
pub struct Bar {
    pub class_name: ResultClass,
    pub date: String,
    pub value: u64,
    /// Height relative to the tallest visible bar, in percent
    pub height: u64,
    pub link: String,
    pub tooltip: String,
}

#[derive(Debug, Clone)]
pub struct ChartBars {
    pub limit: usize,
    pub bars: Vec<Bar>,
}

impl From<&ChartData> for ChartBars {
    fn from(chart: &ChartData) -> Self {
        let max = chart.max_value();
        let bars = chart
            .visible()
            .iter()
            .map(|point| Bar {
                class_name: point.class_name,
                date: point.data.date.clone(),
                value: point.value,
                height: bar_height(point.value, max),
                link: chart.link(point),
                tooltip: chart.tooltip(point),
            })
            .collect();

        Self {
            limit: chart.options.limit,
            bars,
        }
    }
}

/// `value` as a percentage of `max`, 0 for an all-zero chart
fn bar_height(value: u64, max: u64) -> u64 {
    if max == 0 {
        return 0;
    }
    (value as u128 * 100 / max as u128) as u64
}

#[derive(Debug, Clone)]
pub struct TestRow {
    pub name: String,
    pub tooltip: String,
    pub flaky_days: usize,
    pub chart: ChartBars,
}

#[derive(Template)]
#[template(path = "project_flaky_tests.html")]
pub struct FlakyTestsPage<'a> {
    pub project: &'a Project,
    pub date: &'a str,
    pub overall: ChartBars,
    pub tests: Vec<TestRow>,
}

impl<'a> FlakyTestsPage<'a> {
    pub fn new(activation: &'a Activation) -> Self {
        let view = &activation.view;
        let tests = view
            .flaky_tests
            .iter()
            .map(|test| TestRow {
                name: test.test.name.clone(),
                tooltip: test.tooltip.clone(),
                flaky_days: test
                    .chart_data
                    .data
                    .iter()
                    .filter(|p| p.class_name == ResultClass::Failed)
                    .count(),
                chart: ChartBars::from(&test.chart_data),
            })
            .collect();

        Self {
            project: &activation.project,
            date: &view.date,
            overall: ChartBars::from(&view.chart_data),
            tests,
        }
    }
}

/// Render the full flaky tests page
pub fn render_page(activation: &Activation) -> DashboardResult<String> {
    Ok(FlakyTestsPage::new(activation).render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartOptions;
    use crate::route::ViewRoute;
    use crate::view::FlakyTestsView;
    use flakeview_common::{DayRecord, FlakyTest, FlakyTestsResponse};

    fn activation(tests: Vec<FlakyTest>) -> Activation {
        let response = FlakyTestsResponse {
            chart_data: vec![
                DayRecord::new("2015-03-03", 1, 4, false),
                DayRecord::new("2015-03-04", 4, 4, false),
                DayRecord::new("2015-03-05", 0, 4, false),
            ],
            flaky_tests: tests,
            date: "2015-03-04".to_string(),
        };
        let options = ChartOptions::for_route(ViewRoute::new("", "server"));
        Activation {
            project: Project {
                id: "4f1e".to_string(),
                slug: "server".to_string(),
                name: "Server".to_string(),
            },
            view: FlakyTestsView::prepare(response, &options),
        }
    }

    #[test]
    fn test_bar_heights() {
        let activation = activation(vec![]);
        let bars = ChartBars::from(&activation.view.chart_data);

        let heights: Vec<_> = bars.bars.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![25, 100, 0]);
        assert_eq!(bars.limit, 50);
    }

    #[test]
    fn test_bar_heights_with_huge_counts() {
        let response = FlakyTestsResponse {
            chart_data: vec![
                DayRecord::new("2015-03-03", u64::MAX / 50, 1, false),
                DayRecord::new("2015-03-04", u64::MAX, 1, false),
                DayRecord::new("2015-03-05", u64::MAX / 2, 1, false),
            ],
            flaky_tests: vec![],
            date: "2015-03-05".to_string(),
        };
        let options = ChartOptions::for_route(ViewRoute::new("", "server"));
        let view = FlakyTestsView::prepare(response, &options);

        let heights: Vec<_> = ChartBars::from(&view.chart_data)
            .bars
            .iter()
            .map(|b| b.height)
            .collect();
        assert_eq!(heights, vec![1, 100, 49]);
    }

    #[test]
    fn test_render_escapes_output() {
        let activation = activation(vec![FlakyTest {
            name: "tests.test_<b>".to_string(),
            output: "<script>alert(1)</script>".to_string(),
            history: vec![DayRecord::new("2015-03-04", 1, 2, true)],
        }]);

        let html = render_page(&activation).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(!html.contains("tests.test_<b>"));
        assert!(html.contains("tests.test_&lt;b&gt;"));
        assert!(html.contains("result-failed"));
        assert!(html.contains("result-passed"));
        assert!(html.contains("?date=2015-03-05"));
    }

    #[test]
    fn test_render_without_flaky_tests() {
        let html = render_page(&activation(vec![])).unwrap();
        assert!(html.contains("No flaky tests"));
        assert!(html.contains("Server"));
    }

    #[test]
    fn test_flaky_days() {
        let activation = activation(vec![FlakyTest {
            name: "t".to_string(),
            output: String::new(),
            history: vec![
                DayRecord::new("2015-03-02", 3, 2, false),
                DayRecord::new("2015-03-03", 1, 2, true),
                DayRecord::new("2015-03-04", 2, 2, true),
            ],
        }]);
        let page = FlakyTestsPage::new(&activation);
        assert_eq!(page.tests[0].flaky_days, 2);
    }
}
