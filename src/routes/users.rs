use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::CurrentUser,
    models::User,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(current_user))
        .route("/{id}", get(get_user))
}

#[utoipa::path(
    get,
    path = "/api/users/current",
    responses(
        (status = 200, description = "The logged-in user", body = ApiResponse<User>),
        (status = 401, description = "No session"),
        (status = 403, description = "Unknown role")
    ),
    tag = "Users"
)]
pub async fn current_user(user: CurrentUser) -> AppResult<Json<ApiResponse<User>>> {
    Ok(Json(ApiResponse::success("Current user", user.user, None)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User by id", body = ApiResponse<User>),
        (status = 404, description = "Not Found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::get_user(state.api(&user.session), id).await?;
    Ok(Json(resp))
}
