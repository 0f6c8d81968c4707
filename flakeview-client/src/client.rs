use flakeview_common::{parse_date, ApiConfig, FlakyTestsResponse, Project};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// Client for the CI server's `/api/0/` REST endpoints
///
/// Each call issues exactly one GET. There are no retries, a failed
/// request is returned to the caller as is.
#[derive(Debug, Clone)]
pub struct ChangesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ChangesClient {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/0/projects/{project}/`
    pub fn project_url(&self, project: &str) -> ClientResult<Url> {
        self.api_url(&["projects", project, ""])
    }

    /// `{base}/api/0/projects/{project_id}/flaky_tests/?date={date}`
    ///
    /// A missing date is sent as an empty parameter so the server picks its
    /// default day.
    pub fn flaky_tests_url(&self, project_id: &str, date: Option<&str>) -> ClientResult<Url> {
        let date = normalize_date(date)?;
        let mut url = self.api_url(&["projects", project_id, "flaky_tests", ""])?;
        url.query_pairs_mut().append_pair("date", date.unwrap_or(""));
        Ok(url)
    }

    /// Resolve a project by id or slug
    pub async fn project(&self, project: &str) -> ClientResult<Project> {
        let url = self.project_url(project)?;
        self.get_json(url, project).await
    }

    /// Fetch flaky test statistics for a project on `date` (server default when `None`)
    pub async fn flaky_tests(
        &self,
        project_id: &str,
        date: Option<&str>,
    ) -> ClientResult<FlakyTestsResponse> {
        let url = self.flaky_tests_url(project_id, date)?;
        let response: FlakyTestsResponse = self.get_json(url, project_id).await?;
        info!(
            project = project_id,
            date = %response.date,
            tests = response.flaky_tests.len(),
            "Fetched flaky tests"
        );
        Ok(response)
    }

    fn api_url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "0"])
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, project: &str) -> ClientResult<T> {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::ProjectNotFound(project.to_string()));
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Blank dates mean "server default", anything else must be `YYYY-MM-DD`
fn normalize_date(date: Option<&str>) -> ClientResult<Option<&str>> {
    match date.map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => {
            parse_date(date)?;
            Ok(Some(date))
        }
    }
}
