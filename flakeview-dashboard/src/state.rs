use flakeview_client::ChangesClient;
use flakeview_common::{DashboardConfig, Project};
use std::sync::Arc;
use tracing::{debug, info};

use crate::chart::{ChartOptions, FlakyRunsFormatter};
use crate::error::DashboardResult;
use crate::route::ViewRoute;
use crate::view::FlakyTestsView;

/// Result of activating the view for one project and date
#[derive(Debug, Clone)]
pub struct Activation {
    pub project: Project,
    pub view: FlakyTestsView,
}

/// The `project_flaky_tests` view: resolves its data, then shapes it for the template
#[derive(Debug, Clone)]
pub struct ProjectFlakyTestsState {
    client: ChangesClient,
    base_path: String,
    chart_limit: usize,
}

impl ProjectFlakyTestsState {
    pub fn new(client: ChangesClient, config: &DashboardConfig) -> Self {
        Self {
            client,
            base_path: config.base_path.clone(),
            chart_limit: config.chart_limit,
        }
    }

    pub fn route(&self, project: &str) -> ViewRoute {
        ViewRoute::new(&self.base_path, project)
    }

    /// Resolve the parent project, fetch its flaky tests and prepare the view.
    ///
    /// Requests run one after the other and any failure is returned as is.
    pub async fn activate(&self, project: &str, date: Option<&str>) -> DashboardResult<Activation> {
        let project = self.client.project(project).await?;
        debug!(id = %project.id, slug = %project.slug, "Resolved project");

        let response = self.client.flaky_tests(&project.id, date).await?;

        let formatter = FlakyRunsFormatter::new(self.route(&project.slug));
        let options = ChartOptions::new(self.chart_limit, Arc::new(formatter));
        let view = FlakyTestsView::prepare(response, &options);

        info!(
            project = %project.slug,
            date = %view.date,
            flaky_tests = view.flaky_tests.len(),
            "Prepared flaky tests view"
        );
        Ok(Activation { project, view })
    }
}
