//! JSON response builders.
//!
//! Successful replies are the bare payload unless the request carried the
//! `wrap` query flag, in which case they use the `{message, self, data}`
//! envelope. Error replies are always enveloped (see `errors`).

use axum::body::Body;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use common::types::Reply;
use serde::Serialize;
use tracing::error;

use crate::headers::JSON_CONTENT_TYPE;

/// Path and query of the request, used as the envelope `self` link.
pub fn self_link(uri: &Uri) -> String {
    uri.path_and_query().map(|pq| pq.as_str().to_string()).unwrap_or_else(|| uri.path().to_string())
}

/// Serialize `body` with the JSON content type.
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                r#"{"message":"Internal server error","self":""}"#,
            )
                .into_response()
        }
    }
}

/// Reply with `data`, wrapped in the envelope when `wrap` is set.
pub fn data<T: Serialize>(status: StatusCode, wrap: bool, message: &str, uri: &Uri, data: T) -> Response {
    if wrap {
        json(status, &Reply::with_data(message, self_link(uri), data))
    } else {
        json(status, &data)
    }
}

/// `OPTIONS` reply: headers only.
pub async fn preflight() -> Response {
    (StatusCode::OK, Body::empty()).into_response()
}
