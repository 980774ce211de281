//! HTTP error response mapping.

use askama::Template;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use pottydog_domain::error::{AccessDenied, PottyError};

/// Title of the page shown when something breaks server-side.
pub const SERVER_ERROR_TITLE: &str = "Server error!";
/// Message of the page shown when something breaks server-side.
pub const SERVER_ERROR_MESSAGE: &str =
    "Something went wrong. Please contact the admin if issues persist.";

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`PottyError`] to a JSON response with appropriate status code.
pub struct ApiError(PottyError);

impl From<PottyError> for ApiError {
    fn from(err: PottyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PottyError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            PottyError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            PottyError::Denied(AccessDenied::InvalidToken | AccessDenied::NoReadAccess) => {
                (StatusCode::FORBIDDEN, "forbidden".to_string())
            }
            PottyError::Denied(err) => (StatusCode::UNAUTHORIZED, err.to_string()),
            PottyError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            PottyError::Transport(err) => {
                tracing::error!(error = %err, "transport error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Status page used for every HTML error.
#[derive(Template)]
#[template(path = "protected.html")]
pub struct ProtectedTemplate {
    pub status_code: Option<u16>,
    pub title: String,
    pub message: String,
}

/// An HTML error page with its status code.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    title: String,
    message: String,
}

impl PageError {
    #[must_use]
    pub fn new(status: StatusCode, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            message: message.into(),
        }
    }

    /// The generic 500 page.
    #[must_use]
    pub fn server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            SERVER_ERROR_TITLE,
            SERVER_ERROR_MESSAGE,
        )
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<PottyError> for PageError {
    fn from(err: PottyError) -> Self {
        match err {
            PottyError::Validation(err) => {
                Self::new(StatusCode::BAD_REQUEST, "Bad request!", err.to_string())
            }
            PottyError::NotFound(err) => {
                tracing::debug!(error = %err, "page lookup failed");
                Self::new(
                    StatusCode::NOT_FOUND,
                    "Not found!",
                    "The page you are looking for does not exist.",
                )
            }
            PottyError::Denied(err) => {
                Self::new(StatusCode::UNAUTHORIZED, "Access denied!", err.to_string())
            }
            PottyError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                Self::server_error()
            }
            PottyError::Transport(err) => {
                tracing::error!(error = %err, "transport error");
                Self::server_error()
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let page = ProtectedTemplate {
            status_code: Some(self.status.as_u16()),
            title: self.title,
            message: self.message,
        };
        match page.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render error page");
                (self.status, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}
