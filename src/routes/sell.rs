use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    dto::sell::{Listing, SellRequest},
    error::AppResult,
    middleware::auth::CurrentUser,
    models::Vehicle,
    response::ApiResponse,
    services::sell_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_listing))
        .route("/listings", get(my_listings))
        .route(
            "/listings/{id}",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
}

#[utoipa::path(
    get,
    path = "/api/sell/listings",
    responses(
        (status = 200, description = "Vehicles the caller is selling", body = ApiResponse<Vec<Vehicle>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Sell"
)]
pub async fn my_listings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Vehicle>>>> {
    let resp = sell_service::my_listings(state.api(&user.session), &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sell",
    request_body = SellRequest,
    responses(
        (status = 201, description = "Specs and vehicle created", body = ApiResponse<Listing>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Invalid vehicle form")
    ),
    tag = "Sell"
)]
pub async fn create_listing(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<SellRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Listing>>)> {
    let resp = sell_service::create_listing(state.api(&user.session), &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/sell/listings/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle and specs for editing", body = ApiResponse<Listing>),
        (status = 403, description = "Not the seller"),
        (status = 404, description = "Not Found")
    ),
    tag = "Sell"
)]
pub async fn get_listing(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Listing>>> {
    let resp = sell_service::get_listing(state.api(&user.session), &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/sell/listings/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    request_body = SellRequest,
    responses(
        (status = 200, description = "Specs and vehicle updated", body = ApiResponse<Listing>),
        (status = 403, description = "Not the seller"),
        (status = 422, description = "Invalid vehicle form")
    ),
    tag = "Sell"
)]
pub async fn update_listing(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SellRequest>,
) -> AppResult<Json<ApiResponse<Listing>>> {
    let resp = sell_service::update_listing(state.api(&user.session), &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/sell/listings/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Listing removed", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Not the seller")
    ),
    tag = "Sell"
)]
pub async fn delete_listing(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let resp = sell_service::delete_listing(state.api(&user.session), &user, id).await?;
    Ok(Json(resp))
}
