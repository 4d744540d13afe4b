use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::header};

use crate::{
    backend::Api,
    error::AppError,
    models::{Role, User},
    services::auth_service,
    state::AppState,
};

/// Browser session forwarded to the backend as-is. Authentication itself is the
/// backend's business; the gateway only relays the cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookie: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_cookie(cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        if cookie.trim().is_empty() {
            return Self::anonymous();
        }
        Self {
            cookie: Some(cookie),
        }
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.cookie.is_none()
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let cookies: Vec<&str> = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        if cookies.is_empty() {
            return Ok(Session::anonymous());
        }
        Ok(Session::from_cookie(cookies.join("; ")))
    }
}

/// The caller as the backend knows them, resolved through `GET /users/current`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub session: Session,
    pub user: User,
}

impl CurrentUser {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

pub fn ensure_admin(user: &CurrentUser) -> Result<(), AppError> {
    if !user.role().is_admin() {
        tracing::debug!(user_id = %user.user.id, "admin route denied");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Resolves the user behind a session. Missing cookies are rejected without a backend call.
pub async fn resolve_current_user(api: Api<'_>) -> Result<CurrentUser, AppError> {
    if api.session().is_anonymous() {
        return Err(AppError::Unauthorized);
    }
    let user = auth_service::current_user(api).await?;
    Ok(CurrentUser {
        session: api.session().clone(),
        user,
    })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await;
        resolve_current_user(state.api(&session)).await
    }
}
