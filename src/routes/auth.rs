use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    dto::auth::{LoginRequest, RegisterRequest, SessionStatus},
    error::AppResult,
    middleware::auth::Session,
    response::ApiResponse,
    services::auth_service::{self, AuthOutcome},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/register", post(register))
        .route("/check-session", get(check_session))
}

/// Relays the backend's session cookies to the browser.
fn with_cookies<T: Serialize>(outcome: AuthOutcome<T>) -> Response {
    let mut response = Json(outcome.response).into_response();
    for cookie in outcome.set_cookies {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => tracing::warn!(error = %err, "dropping unrelayable cookie"),
        }
    }
    response
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login; session cookie is relayed", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Missing username or password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    let outcome = auth_service::login(state.api(&session), payload).await?;
    Ok(with_cookies(outcome))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Auth"
)]
pub async fn logout(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let outcome = auth_service::logout(state.api(&session)).await?;
    Ok(with_cookies(outcome))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<serde_json::Value>),
        (status = 422, description = "Invalid registration form")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Value>>)> {
    let resp = auth_service::register(state.api(&session), payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/auth/check-session",
    responses(
        (status = 200, description = "Whether the caller has a live session", body = ApiResponse<SessionStatus>)
    ),
    tag = "Auth"
)]
pub async fn check_session(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<ApiResponse<SessionStatus>>> {
    let resp = auth_service::check_session(state.api(&session)).await?;
    Ok(Json(resp))
}
