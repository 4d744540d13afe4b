use axum::http::Method;
use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    audit::log_audit,
    backend::{Api, paths},
    dto::auth::{BackendRegistration, LoginRequest, RegisterRequest, SessionStatus},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
};

/// A backend reply whose `Set-Cookie` headers have to reach the browser.
#[derive(Debug)]
pub struct AuthOutcome<T> {
    pub response: ApiResponse<T>,
    pub set_cookies: Vec<String>,
}

/// Picks a stable, user-facing message out of a validation failure.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut entries: Vec<_> = errors.field_errors().into_iter().collect();
    entries.sort_unstable_by_key(|(field, _)| *field);
    entries
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Please fill in all fields correctly.".to_string())
}

pub fn to_backend_date(date: &str) -> AppResult<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("birthdate must be yyyy-MM-dd".into()))?;
    Ok(parsed.format("%d.%m.%Y").to_string())
}

pub async fn login(api: Api<'_>, payload: LoginRequest) -> AppResult<AuthOutcome<Value>> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "Please enter username and password.".into(),
        ));
    }
    let body = serde_json::to_value(&payload).map_err(|e| AppError::Internal(e.into()))?;
    let reply = api.send(Method::POST, paths::LOGIN, Some(body)).await?;

    log_audit(None, "user_login", Some("users"), Some(serde_json::json!({ "username": payload.username })));

    Ok(AuthOutcome {
        response: ApiResponse::success("Logged in", reply.body, Some(Meta::empty())),
        set_cookies: reply.set_cookies,
    })
}

pub async fn logout(api: Api<'_>) -> AppResult<AuthOutcome<Value>> {
    let reply = api
        .send(Method::POST, paths::LOGOUT, Some(serde_json::json!({})))
        .await?;
    Ok(AuthOutcome {
        response: ApiResponse::success("Logged out", serde_json::json!({}), Some(Meta::empty())),
        set_cookies: reply.set_cookies,
    })
}

pub async fn register(api: Api<'_>, payload: RegisterRequest) -> AppResult<ApiResponse<Value>> {
    payload
        .validate()
        .map_err(|errors| AppError::Validation(validation_message(&errors)))?;

    let registration = BackendRegistration {
        birthdate: to_backend_date(&payload.birthdate)?,
        username: payload.username,
        password: payload.password,
        confirm_password: payload.confirm_password,
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        address: payload.address,
        zip_code: payload.zip_code,
        city: payload.city,
        country: payload.country,
        phone_number: payload.phone_number,
    };

    let created: Value = api.post(paths::REGISTER, &registration).await?;

    log_audit(
        None,
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "username": registration.username })),
    );

    Ok(ApiResponse::success("User created", created, None))
}

/// The backend answers with a bare boolean; an anonymous caller is simply not logged in.
pub async fn check_session(api: Api<'_>) -> AppResult<ApiResponse<SessionStatus>> {
    let authenticated = if api.session().is_anonymous() {
        false
    } else {
        match api.get::<bool>(paths::CHECK_SESSION).await {
            Ok(flag) => flag,
            Err(AppError::Unauthorized | AppError::Forbidden) => false,
            Err(err) => return Err(err),
        }
    };
    Ok(ApiResponse::success(
        "Session",
        SessionStatus { authenticated },
        None,
    ))
}

/// Resolves the logged-in user. A role outside the known set is treated as no access.
pub async fn current_user(api: Api<'_>) -> AppResult<User> {
    let raw: Value = api.get(paths::CURRENT_USER).await?;
    serde_json::from_value(raw).map_err(|err| {
        tracing::warn!(error = %err, "current user rejected");
        AppError::Forbidden
    })
}

pub async fn get_user(api: Api<'_>, id: Uuid) -> AppResult<ApiResponse<User>> {
    let user: User = api.get(&paths::item(paths::USERS, id)).await?;
    Ok(ApiResponse::success("User", user, None))
}
