//! Response construction.
//!
//! # Responsibilities
//! - Build the 301 redirect for a matched path
//! - Build the configured fallback response
//!
//! # Design Decisions
//! - Redirects are always 301 Moved Permanently with an empty body
//! - Targets that are not valid header values yield 500, never a panic

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::FallbackConfig;

/// 301 response pointing at `target`, used verbatim as the `Location`.
pub fn permanent_redirect(target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::MOVED_PERMANENTLY;
            response.headers_mut().insert(header::LOCATION, location);
            response
        }
        Err(e) => {
            tracing::error!(
                target_url = %target.escape_debug(),
                error = %e,
                "Redirect target is not a valid Location header"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
        }
    }
}

/// Fallback response settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct Fallback {
    status: StatusCode,
    body: Arc<str>,
}

impl Fallback {
    pub fn new(status: StatusCode, body: impl Into<Arc<str>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Resolve from config. Invalid codes (rejected by validation) map to 404.
    pub fn from_config(config: &FallbackConfig) -> Self {
        let status = StatusCode::from_u16(config.status).unwrap_or(StatusCode::NOT_FOUND);
        Self::new(status, config.body.as_str())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Self::from_config(&FallbackConfig::default())
    }
}

impl IntoResponse for Fallback {
    fn into_response(self) -> Response {
        (self.status, self.body.to_string()).into_response()
    }
}

/// Axum handler answering every request with the configured fallback.
pub async fn fallback_handler(State(fallback): State<Fallback>) -> Response {
    fallback.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_redirect() {
        let response = permanent_redirect("https://www.some-url.com/demo");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://www.some-url.com/demo"
        );
    }

    #[test]
    fn test_redirect_target_used_verbatim() {
        let response = permanent_redirect("relative/path?q=1");
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "relative/path?q=1");

        let response = permanent_redirect("");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "");
    }

    #[test]
    fn test_unencodable_target_is_server_error() {
        let response = permanent_redirect("https://x/\nSet-Cookie: a=b");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_fallback_from_config() {
        let fallback = Fallback::from_config(&FallbackConfig {
            status: 200,
            body: "Hello, world!".into(),
        });
        assert_eq!(fallback.status(), StatusCode::OK);

        let fallback = Fallback::from_config(&FallbackConfig {
            status: 7,
            body: String::new(),
        });
        assert_eq!(fallback.status(), StatusCode::NOT_FOUND);
    }
}
