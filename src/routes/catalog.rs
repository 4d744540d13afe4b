use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde_json::Value;

use crate::{
    dto::catalog::{CatalogResource, CatalogSearch},
    error::AppResult,
    middleware::auth::Session,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{resource}", get(lookup))
}

/// Read-only lookups that feed the sell form's dropdowns.
#[utoipa::path(
    get,
    path = "/api/catalog/{resource}",
    params(
        ("resource" = CatalogResource, Path, description = "Reference collection"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring")
    ),
    responses(
        (status = 200, description = "Reference entities", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Catalog"
)]
pub async fn lookup(
    State(state): State<AppState>,
    session: Session,
    Path(resource): Path<CatalogResource>,
    Query(query): Query<CatalogSearch>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let resp =
        catalog_service::list_resource(state.api(&session), resource, query.search.as_deref())
            .await?;
    Ok(Json(resp))
}
