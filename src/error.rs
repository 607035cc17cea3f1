use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, warn};

/// Errors surfaced while handling a storefront request.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// The locale in the URL path does not normalize to a supported locale.
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    /// A setting the page needs was not configured.
    #[error("{0} is not defined")]
    MissingConfiguration(&'static str),

    /// The backend answered with a non-success status.
    #[error("backend request to {path} failed: {status}")]
    BackendFetch { path: String, status: StatusCode },

    #[error("backend request failed: {0}")]
    BackendRequest(#[from] reqwest::Error),

    #[error("invalid backend URL: {0}")]
    BackendUrl(String),

    /// Checkout input rejected before reaching the backend.
    #[error("invalid order: {0}")]
    InvalidOrder(String),
}

impl StorefrontError {
    pub fn status(&self) -> StatusCode {
        match self {
            StorefrontError::UnsupportedLocale(_) => StatusCode::NOT_FOUND,
            StorefrontError::MissingConfiguration(_) | StorefrontError::BackendUrl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            StorefrontError::BackendFetch { .. } | StorefrontError::BackendRequest(_) => {
                StatusCode::BAD_GATEWAY
            }
            StorefrontError::InvalidOrder(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            StorefrontError::UnsupportedLocale(locale) => {
                debug!(locale = %locale, "Rejecting unsupported locale");
                return (status, "Not Found").into_response();
            }
            StorefrontError::InvalidOrder(_) => debug!(error = %self, "Rejected order"),
            _ => warn!(error = %self, "Page request failed"),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
