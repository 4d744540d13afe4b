use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod params;
pub mod purchases;
pub mod sell;
pub mod users;
pub mod vehicles;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/vehicles", vehicles::router())
        .nest("/sell", sell::router())
        .nest("/catalog", catalog::router())
        .nest("/admin", admin::router())
        .nest("/purchases", purchases::router())
}
