//! Error handling for the bookstand HTTP layer

use reqwest::{Method, StatusCode};
use thiserror::Error;
use url::Url;

/// Failures surfaced by [`crate::ApiClient`].
///
/// Status codes are classified but never interpreted further; callers
/// decide what to do with a failed request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid API base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid request path '{path}': {source}")]
    Path {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{method} {url}: resource not found")]
    NotFound { method: Method, url: Url },

    #[error("{method} {url}: server returned {status}: {message}")]
    Status {
        method: Method,
        url: Url,
        status: StatusCode,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Classify a non-2xx response.
    pub(crate) fn from_status(method: Method, url: Url, status: StatusCode, body: String) -> Self {
        if status == StatusCode::NOT_FOUND {
            Self::NotFound { method, url }
        } else {
            Self::Status {
                method,
                url,
                status,
                message: body,
            }
        }
    }

    /// Whether the server answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The HTTP status of the failed request, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::BaseUrl { .. } | Self::Path { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://localhost:8080/api/books/missing").unwrap()
    }

    #[test]
    fn status_404_classifies_as_not_found() {
        let err = ApiError::from_status(Method::GET, url(), StatusCode::NOT_FOUND, String::new());
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn status_500_is_not_not_found() {
        let err = ApiError::from_status(
            Method::GET,
            url(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "boom".to_string(),
        );
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn status_error_message_includes_body() {
        let err = ApiError::from_status(
            Method::PUT,
            url(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "title must not be blank".to_string(),
        );
        let rendered = err.to_string();
        assert!(rendered.contains("422"));
        assert!(rendered.contains("title must not be blank"));
    }
}
