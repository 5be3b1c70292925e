use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::headers::OPENAPI_CONTENT_TYPE;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `{message, self, data?}` envelope.
#[derive(ToSchema)]
pub struct ReplyDoc {
    pub message: String,
    #[schema(rename = "self")]
    pub self_link: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct ThingDoc {
    pub id: String,
    pub description: String,
    pub state: String,
    pub childrens_ids: Option<Vec<String>>,
    pub additional: Option<String>,
    pub is_alive: bool,
    #[schema(rename = "self")]
    pub self_link: String,
}

#[derive(ToSchema)]
pub struct VentureDoc {
    pub id: String,
    pub description: String,
    pub state: String,
    pub order_ids: Option<String>,
    pub extra: Option<String>,
    pub is_alive: bool,
}

#[derive(ToSchema)]
pub struct VentureModificationDoc {
    /// Comma separated venture IDs
    pub ids: String,
    /// Comma separated field names: description, state, order_ids, extra, is_alive
    pub props: String,
    pub values: VentureDoc,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Qlueless Assembly Line API"),
    paths(
        crate::routes::health,
        crate::routes::ventures::get_ventures,
        crate::routes::ventures::post_venture,
        crate::routes::ventures::put_ventures,
        crate::routes::ventures::delete_ventures,
        crate::routes::things::get_things,
        crate::routes::things::post_thing,
        crate::routes::things::get_thing,
        crate::routes::things::put_thing,
        crate::routes::things::delete_thing,
    ),
    components(
        schemas(
            HealthResponse,
            ReplyDoc,
            ThingDoc,
            VentureDoc,
            VentureModificationDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "things"),
        (name = "ventures")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
pub async fn openapi_doc(uri: Uri) -> Response {
    match ApiDoc::openapi().to_json() {
        Ok(doc) => (StatusCode::OK, [(header::CONTENT_TYPE, OPENAPI_CONTENT_TYPE)], doc).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render openapi document");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", &uri).into_response()
        }
    }
}
