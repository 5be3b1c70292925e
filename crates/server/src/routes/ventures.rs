use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use models::{Venture, VentureModification};
use serde::Deserialize;
use tracing::info;

use crate::errors::ApiError;
use crate::extract::ApiQuery;
use crate::reply;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct VentureQuery {
    pub wrap: Option<String>,
    pub id: Option<String>,
    pub all: Option<String>,
    pub ids: Option<String>,
}

impl VentureQuery {
    fn wrap(&self) -> bool { self.wrap.is_some() }
}

/// List live ventures, every venture with `all`, or one venture with `id`.
#[utoipa::path(
    get,
    path = "/ventures",
    tag = "ventures",
    params(
        ("id" = Option<String>, Query, description = "Fetch a single venture"),
        ("all" = Option<String>, Query, description = "Include soft deleted ventures"),
        ("wrap" = Option<String>, Query, description = "Wrap the reply in an envelope"),
    ),
    responses(
        (status = 200, description = "Ventures", body = [crate::openapi::VentureDoc]),
        (status = 404, description = "Not Found", body = crate::openapi::ReplyDoc),
    )
)]
pub async fn get_ventures(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<VentureQuery>,
    uri: Uri,
) -> Result<Response, ApiError> {
    if let Some(id) = q.id.as_deref() {
        let venture = state
            .ventures
            .get(id)
            .ok_or_else(|| ApiError::not_found(format!("Venture {id} not found"), &uri))?;
        return Ok(reply::data(StatusCode::OK, q.wrap(), &format!("Found Venture {id}"), &uri, venture));
    }
    if q.all.is_some() {
        let all = state.ventures.list_all();
        return Ok(reply::data(StatusCode::OK, q.wrap(), "Found all Ventures", &uri, all));
    }
    let alive = state.ventures.list_alive();
    Ok(reply::data(StatusCode::OK, q.wrap(), "Found all living Ventures", &uri, alive))
}

#[utoipa::path(
    post,
    path = "/ventures",
    tag = "ventures",
    request_body = crate::openapi::VentureDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::VentureDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ReplyDoc),
    )
)]
pub async fn post_venture(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<VentureQuery>,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let input: Venture = serde_json::from_slice(&body).map_err(|e| ApiError::bad_json(e, &uri))?;
    let created = state.ventures.create(input).map_err(|e| ApiError::from_service(e, &uri))?;
    let message = format!("Created Venture {}", created.id);
    Ok(reply::data(StatusCode::CREATED, q.wrap(), &message, &uri, created))
}

/// Bulk modification: `{"ids": "1,2", "props": "state, extra", "values": {...}}`.
#[utoipa::path(
    put,
    path = "/ventures",
    tag = "ventures",
    request_body = crate::openapi::VentureModificationDoc,
    responses(
        (status = 200, description = "Updated ventures", body = [crate::openapi::VentureDoc]),
        (status = 400, description = "Bad Request", body = crate::openapi::ReplyDoc),
    )
)]
pub async fn put_ventures(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<VentureQuery>,
    uri: Uri,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req: VentureModification = serde_json::from_slice(&body).map_err(|e| ApiError::bad_json(e, &uri))?;
    let updated = state.ventures.modify(req).map_err(|e| ApiError::from_service(e, &uri))?;
    info!(count = updated.len(), "put ventures");
    let message = format!("Updated {} Ventures", updated.len());
    Ok(reply::data(StatusCode::OK, q.wrap(), &message, &uri, updated))
}

/// Soft delete the ventures listed in `ids`.
#[utoipa::path(
    delete,
    path = "/ventures",
    tag = "ventures",
    params(("ids" = String, Query, description = "Comma separated venture IDs")),
    responses(
        (status = 200, description = "Deleted ventures", body = [crate::openapi::VentureDoc]),
        (status = 400, description = "Bad Request", body = crate::openapi::ReplyDoc),
    )
)]
pub async fn delete_ventures(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<VentureQuery>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let ids = q.ids.as_deref().unwrap_or_default();
    let deleted = state.ventures.soft_delete(ids).map_err(|e| ApiError::from_service(e, &uri))?;
    let message = format!("Deleted {} Ventures", deleted.len());
    Ok(reply::data(StatusCode::OK, q.wrap(), &message, &uri, deleted))
}
