use flakeview_common::CommonError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: StatusCode, url: String },

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl ClientError {
    /// Failures caused by the CI server or the network rather than the request itself
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::UnexpectedStatus { .. } | ClientError::Decode { .. }
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
