//! CORS and content headers applied to every response.

use axum::http::{header, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const OPENAPI_CONTENT_TYPE: &str = "application/vnd.oai.openapi+json; charset=utf-8";

pub const VENTURE_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const THINGS_METHODS: &str = "GET, POST, OPTIONS";
pub const THING_METHODS: &str = "GET, PUT, DELETE, OPTIONS";
pub const OPENAPI_METHODS: &str = "GET, HEAD, OPTIONS";
pub const HEALTH_METHODS: &str = "GET, OPTIONS";

/// `Access-Control-Allow-Origin: *`
pub fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))
}

/// `Access-Control-Allow-Headers: *`
pub fn allow_any_headers() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"))
}

/// `Access-Control-Allow-Methods` listing what a single route accepts.
pub fn allow_methods(methods: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(methods))
}
