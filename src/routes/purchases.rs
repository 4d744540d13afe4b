use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    dto::purchases::CreatePurchaseRequest,
    error::AppResult,
    middleware::auth::CurrentUser,
    models::Purchase,
    response::ApiResponse,
    services::purchase_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchases).post(create_purchase))
        .route("/{id}", get(get_purchase).delete(delete_purchase))
}

#[utoipa::path(
    get,
    path = "/api/purchases",
    responses(
        (status = 200, description = "Purchases the caller bought or sold; all for admins", body = ApiResponse<Vec<Purchase>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Purchases"
)]
pub async fn list_purchases(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Purchase>>>> {
    let resp = purchase_service::list_purchases(state.api(&user.session), &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/purchases",
    request_body = CreatePurchaseRequest,
    responses(
        (status = 201, description = "Purchase recorded", body = ApiResponse<Purchase>),
        (status = 400, description = "Buying your own vehicle"),
        (status = 404, description = "Vehicle not found")
    ),
    tag = "Purchases"
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreatePurchaseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Purchase>>)> {
    let resp = purchase_service::create_purchase(state.api(&user.session), &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/purchases/{id}",
    params(("id" = Uuid, Path, description = "Purchase ID")),
    responses(
        (status = 200, description = "Purchase", body = ApiResponse<Purchase>),
        (status = 404, description = "Not Found")
    ),
    tag = "Purchases"
)]
pub async fn get_purchase(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Purchase>>> {
    let resp = purchase_service::get_purchase(state.api(&user.session), &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/purchases/{id}",
    params(("id" = Uuid, Path, description = "Purchase ID")),
    responses(
        (status = 200, description = "Purchase deleted (admin only)", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Forbidden")
    ),
    tag = "Purchases"
)]
pub async fn delete_purchase(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let resp = purchase_service::delete_purchase(state.api(&user.session), &user, id).await?;
    Ok(Json(resp))
}
