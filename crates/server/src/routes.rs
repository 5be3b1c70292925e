use axum::{
    routing::{get, MethodRouter},
    Json, Router,
};
use common::types::Health;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::errors::{method_not_allowed, not_found};
use crate::headers::{self, allow_any_headers, allow_any_origin, allow_methods};
use crate::openapi::openapi_doc;
use crate::reply::preflight;
use crate::state::ServerState;

pub mod things;
pub mod ventures;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Close a method router: `OPTIONS` answers with headers only, anything
/// not listed gets 405, and every response advertises `methods`.
fn finish(router: MethodRouter<ServerState>, methods: &'static str) -> MethodRouter<ServerState> {
    router.options(preflight).fallback(method_not_allowed).layer(allow_methods(methods))
}

/// Build the full application router
pub fn build_router(state: ServerState) -> Router {
    let ventures_route = get(ventures::get_ventures)
        .head(method_not_allowed)
        .post(ventures::post_venture)
        .put(ventures::put_ventures)
        .delete(ventures::delete_ventures);

    let things_route = get(things::get_things).head(method_not_allowed).post(things::post_thing);

    let thing_route = get(things::get_thing)
        .head(method_not_allowed)
        .put(things::put_thing)
        .delete(things::delete_thing);

    Router::new()
        .route("/ventures", finish(ventures_route, headers::VENTURE_METHODS))
        .route("/things", finish(things_route, headers::THINGS_METHODS))
        .route("/things/:id", finish(thing_route, headers::THING_METHODS))
        .route("/openapi", finish(get(openapi_doc), headers::OPENAPI_METHODS))
        .route("/health", finish(get(health).head(method_not_allowed), headers::HEALTH_METHODS))
        .fallback(not_found)
        .with_state(state)
        .layer(allow_any_origin())
        .layer(allow_any_headers())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
