use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    dto::catalog::{CatalogResource, CatalogSearch},
    error::AppResult,
    middleware::auth::{CurrentUser, ensure_admin},
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{resource}", get(list_entities).post(create_entity))
        .route("/{resource}/{id}", put(update_entity).delete(delete_entity))
}

#[utoipa::path(
    get,
    path = "/api/admin/{resource}",
    params(
        ("resource" = CatalogResource, Path, description = "Reference collection"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring")
    ),
    responses(
        (status = 200, description = "List reference entities (admin only)", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin"
)]
pub async fn list_entities(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(resource): Path<CatalogResource>,
    Query(query): Query<CatalogSearch>,
) -> AppResult<Json<ApiResponse<Value>>> {
    ensure_admin(&user)?;
    let resp = catalog_service::list_resource(
        state.api(&user.session),
        resource,
        query.search.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/{resource}",
    params(("resource" = CatalogResource, Path, description = "Reference collection")),
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Entity created", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Invalid form")
    ),
    tag = "Admin"
)]
pub async fn create_entity(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(resource): Path<CatalogResource>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let resp =
        catalog_service::create_resource(state.api(&user.session), &user, resource, payload)
            .await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/{resource}/{id}",
    params(
        ("resource" = CatalogResource, Path, description = "Reference collection"),
        ("id" = Uuid, Path, description = "Entity ID")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Entity updated", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Invalid form")
    ),
    tag = "Admin"
)]
pub async fn update_entity(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((resource, id)): Path<(CatalogResource, Uuid)>,
    Json(payload): Json<Value>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let resp =
        catalog_service::update_resource(state.api(&user.session), &user, resource, id, payload)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/{resource}/{id}",
    params(
        ("resource" = CatalogResource, Path, description = "Reference collection"),
        ("id" = Uuid, Path, description = "Entity ID")
    ),
    responses(
        (status = 200, description = "Entity deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden")
    ),
    tag = "Admin"
)]
pub async fn delete_entity(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((resource, id)): Path<(CatalogResource, Uuid)>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let resp =
        catalog_service::delete_resource(state.api(&user.session), &user, resource, id).await?;
    Ok(Json(resp))
}
