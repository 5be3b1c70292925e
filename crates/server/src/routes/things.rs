use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use models::Thing;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::extract::ApiQuery;
use crate::reply;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct ThingQuery {
    pub wrap: Option<String>,
    pub all: Option<String>,
}

impl ThingQuery {
    fn wrap(&self) -> bool { self.wrap.is_some() }
}

#[utoipa::path(
    get,
    path = "/things",
    tag = "things",
    params(
        ("all" = Option<String>, Query, description = "Include soft deleted things"),
        ("wrap" = Option<String>, Query, description = "Wrap the reply in an envelope"),
    ),
    responses((status = 200, description = "Things", body = [crate::openapi::ThingDoc]))
)]
pub async fn get_things(State(state): State<ServerState>, ApiQuery(q): ApiQuery<ThingQuery>, uri: Uri) -> Response {
    if q.all.is_some() {
        return reply::data(StatusCode::OK, q.wrap(), "Found all Things", &uri, state.things.list_all());
    }
    reply::data(StatusCode::OK, q.wrap(), "Found all living Things", &uri, state.things.list_alive())
}

#[utoipa::path(
    post,
    path = "/things",
    tag = "things",
    request_body = crate::openapi::ThingDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ThingDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ReplyDoc),
    )
)]
pub async fn post_thing(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<ThingQuery>,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let input: Thing = serde_json::from_slice(&body).map_err(|e| ApiError::bad_json(e, &uri))?;
    let created = state.things.create(input).map_err(|e| ApiError::from_service(e, &uri))?;
    let message = format!("Created Thing {}", created.id);
    Ok(reply::data(StatusCode::CREATED, q.wrap(), &message, &uri, created))
}

#[utoipa::path(
    get,
    path = "/things/{id}",
    tag = "things",
    params(("id" = String, Path, description = "Thing ID")),
    responses(
        (status = 200, description = "Thing", body = crate::openapi::ThingDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ReplyDoc),
    )
)]
pub async fn get_thing(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiQuery(q): ApiQuery<ThingQuery>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let thing = state
        .things
        .get(&id)
        .ok_or_else(|| ApiError::not_found(format!("Thing {id} not found"), &uri))?;
    Ok(reply::data(StatusCode::OK, q.wrap(), &format!("Found Thing {id}"), &uri, thing))
}

/// Replace a thing wholesale.
#[utoipa::path(
    put,
    path = "/things/{id}",
    tag = "things",
    params(("id" = String, Path, description = "Thing ID")),
    request_body = crate::openapi::ThingDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::ThingDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ReplyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ReplyDoc),
    )
)]
pub async fn put_thing(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiQuery(q): ApiQuery<ThingQuery>,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let input: Thing = serde_json::from_slice(&body).map_err(|e| ApiError::bad_json(e, &uri))?;
    let replaced = state.things.replace(&id, input).map_err(|e| ApiError::from_service(e, &uri))?;
    Ok(reply::data(StatusCode::OK, q.wrap(), &format!("Updated Thing {id}"), &uri, replaced))
}

/// Soft delete a thing.
#[utoipa::path(
    delete,
    path = "/things/{id}",
    tag = "things",
    params(("id" = String, Path, description = "Thing ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::ThingDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ReplyDoc),
    )
)]
pub async fn delete_thing(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiQuery(q): ApiQuery<ThingQuery>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let deleted = state.things.soft_delete(&id).map_err(|e| ApiError::from_service(e, &uri))?;
    Ok(reply::data(StatusCode::OK, q.wrap(), &format!("Deleted Thing {id}"), &uri, deleted))
}
