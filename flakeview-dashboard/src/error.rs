use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use flakeview_client::ClientError;
use flakeview_common::CommonError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Client(ClientError::ProjectNotFound(_)) => StatusCode::NOT_FOUND,
            DashboardError::Client(ClientError::Common(CommonError::InvalidDate(_))) => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::Client(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
