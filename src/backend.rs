//! Client side of the PrimeDrive REST backend.
//!
//! Every service talks to the backend through the object-safe [`Backend`] trait so the
//! HTTP implementation can be swapped for an in-memory one in tests. [`Api`] layers
//! typed JSON helpers and the caller's session on top of it.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Method, StatusCode, header};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    middleware::auth::Session,
};

/// Backend resource paths, relative to the configured base URL.
pub mod paths {
    pub const LOGIN: &str = "/authentication/login";
    pub const LOGOUT: &str = "/authentication/logout";
    pub const REGISTER: &str = "/authentication/register";
    pub const CHECK_SESSION: &str = "/authentication/check-session";
    pub const USERS: &str = "/users";
    pub const CURRENT_USER: &str = "/users/current";
    pub const VEHICLES: &str = "/vehicle";
    pub const BRANDS: &str = "/vehicle_brands";
    pub const HOLDINGS: &str = "/vehicle_holdings";
    pub const COLORS: &str = "/vehicle_colors";
    pub const TYPES: &str = "/vehicle_types";
    pub const SPECS: &str = "/vehicle_specs";
    pub const ENGINES: &str = "/vehicle_engine";
    pub const FUELS: &str = "/vehicle_fuels";
    pub const DOORS: &str = "/vehicle_doors";
    pub const SEATS: &str = "/vehicle_seats";
    pub const PURCHASES: &str = "/purchases";

    pub fn item(collection: &str, id: impl std::fmt::Display) -> String {
        format!("{collection}/{id}")
    }
}

#[derive(Debug, Clone)]
pub struct BackendRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub cookie: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: StatusCode,
    pub body: Value,
    pub set_cookies: Vec<String>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Issues one request. Non-2xx replies come back as errors built by [`upstream_error`].
    async fn send(&self, request: BackendRequest) -> AppResult<BackendReply>;
}

pub type SharedBackend = Arc<dyn Backend>;

/// Maps a failed backend reply onto the error taxonomy: a structured body carrying
/// `message` is surfaced verbatim, everything else falls back to a generic error.
pub fn upstream_error(status: StatusCode, body: &Value) -> AppError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty());

    match (message, status) {
        (Some(message), _) => AppError::Upstream {
            status,
            message: message.to_string(),
        },
        (None, StatusCode::NOT_FOUND) => AppError::NotFound,
        (None, StatusCode::UNAUTHORIZED) => AppError::Unauthorized,
        (None, StatusCode::FORBIDDEN) => AppError::Forbidden,
        (None, _) => AppError::UpstreamUnavailable,
    }
}

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.backend_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.backend_url.clone(),
        })
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn send(&self, request: BackendRequest) -> AppResult<BackendReply> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(method = %request.method, url = %url, "backend request");

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(cookie) = request.cookie.as_deref() {
            builder = builder.header(header::COOKIE, cookie);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok().map(str::to_owned))
            .collect();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        if !status.is_success() {
            tracing::debug!(status = %status, url = %url, "backend rejected request");
            return Err(upstream_error(status, &body));
        }

        Ok(BackendReply {
            status,
            body,
            set_cookies,
        })
    }
}

/// Typed view over a [`Backend`] bound to one caller's session.
#[derive(Clone, Copy)]
pub struct Api<'a> {
    backend: &'a dyn Backend,
    session: &'a Session,
}

impl<'a> Api<'a> {
    pub fn new(backend: &'a dyn Backend, session: &'a Session) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> &'a Session {
        self.session
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<BackendReply> {
        self.backend
            .send(BackendRequest {
                method,
                path: path.to_string(),
                body,
                cookie: self.session.cookie().map(str::to_owned),
            })
            .await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let reply = self.send(Method::GET, path, None).await?;
        decode(path, reply.body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let reply = self.send(Method::POST, path, Some(body)).await?;
        decode(path, reply.body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let reply = self.send(Method::PUT, path, Some(body)).await?;
        decode(path, reply.body)
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> AppResult<Value> {
    serde_json::to_value(body).map_err(|e| AppError::Internal(e.into()))
}

fn decode<T: DeserializeOwned>(path: &str, body: Value) -> AppResult<T> {
    serde_json::from_value(body).map_err(|err| {
        tracing::error!(path = %path, error = %err, "unexpected backend payload");
        AppError::UpstreamUnavailable
    })
}
