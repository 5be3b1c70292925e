use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use common::types::Reply;
use service::ServiceError;
use tracing::{debug, error};

use crate::reply::{self, self_link};

/// Error reply rendered as the `{message, self, data?}` envelope.
///
/// `details` carries individual validation violations and becomes `data`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Vec<String>,
    pub self_link: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, uri: &Uri) -> Self {
        Self { status, message: message.into(), details: Vec::new(), self_link: self_link(uri) }
    }

    pub fn bad_request(message: impl Into<String>, uri: &Uri) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, uri)
    }

    pub fn not_found(message: impl Into<String>, uri: &Uri) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, uri)
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn from_service(e: ServiceError, uri: &Uri) -> Self {
        match e {
            ServiceError::Validation(violations) => {
                Self::bad_request(violations.join(" "), uri).with_details(violations)
            }
            ServiceError::NotFound(msg) => Self::not_found(msg, uri),
            ServiceError::Internal(msg) => {
                error!(error = %msg, "internal store error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", uri)
            }
        }
    }

    /// Body could not be decoded into the expected JSON shape.
    pub fn bad_json(e: serde_json::Error, uri: &Uri) -> Self {
        Self::bad_request(format!("Unable to decode request body: {e}"), uri)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(status = %self.status, message = %self.message, "request failed");
        let body = if self.details.is_empty() {
            Reply::message_only(self.message, self.self_link)
        } else {
            Reply::with_data(self.message, self.self_link, self.details)
        };
        reply::json(self.status, &body)
    }
}

/// Fallback for methods a route does not accept.
pub async fn method_not_allowed(uri: Uri) -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", &uri)
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Resource not found", &uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header;
    use serde_json::Value;

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_error_renders_500_envelope() {
        let uri: Uri = "/ventures".parse().unwrap();
        let err = ApiError::from_service(ServiceError::Internal("record id 3 is already in use".into()), &uri);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()[header::CONTENT_TYPE], crate::headers::JSON_CONTENT_TYPE);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["self"], "/ventures");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn validation_error_renders_400_with_details() {
        let uri: Uri = "/things".parse().unwrap();
        let violations = vec!["'Description' must not be empty.".to_string()];
        let res = ApiError::from_service(ServiceError::Validation(violations.clone()), &uri).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["data"], serde_json::json!(violations));
    }
}
