mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use primedrive_gateway::{
    backend::{SharedBackend, paths},
    routes::create_api_router,
    state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{MockBackend, SESSION_COOKIE, admin, alice, vehicle_world};

fn app(backend: Arc<MockBackend>) -> Router {
    let backend: SharedBackend = backend;
    let state = AppState { backend };
    Router::new()
        .nest("/api", create_api_router())
        .with_state(state)
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, SESSION_COOKIE)
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, SESSION_COOKIE)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn vehicle_listing_applies_query_filters() {
    let backend = Arc::new(vehicle_world());
    let (status, body) = call(
        app(backend.clone()),
        get("/api/vehicles?condition=NEW&max_price=50000&brand=All&year=0"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["items"][0]["name"], "Q4 e-tron");
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["filtered"], 1);
    assert_eq!(body["data"]["options"]["holdings"], json!(["Volkswagen AG", "BMW Group"]));
}

#[tokio::test]
async fn malformed_threshold_is_rejected_without_backend_calls() {
    let backend = Arc::new(vehicle_world());
    let (status, _) = call(app(backend.clone()), get("/api/vehicles?year=soon")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn admin_routes_require_a_session() {
    let backend = Arc::new(MockBackend::new());
    let request = Request::builder()
        .uri("/api/admin/colors")
        .body(Body::empty())
        .expect("request");
    let (status, body) = call(app(backend.clone()), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["data"]["error"], "Unauthorized");
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let backend = Arc::new(MockBackend::new());
    backend.on_get(paths::CURRENT_USER, &alice());
    let (status, _) = call(app(backend.clone()), get("/api/admin/colors")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(backend.requests_to(paths::COLORS), 0);
}

#[tokio::test]
async fn unknown_role_is_denied() {
    let backend = Arc::new(MockBackend::new());
    let mut user = json!(admin());
    user["role"] = json!("SUPERUSER");
    backend.on_get(paths::CURRENT_USER, &user);

    let (status, _) = call(app(backend.clone()), get("/api/admin/colors")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_color_form_returns_message_and_skips_backend_write() {
    let backend = Arc::new(MockBackend::new());
    backend.on_get(paths::CURRENT_USER, &admin());

    let (status, body) = call(
        app(backend.clone()),
        json_request(
            Method::POST,
            "/api/admin/colors",
            json!({ "name": "Red", "hexCode": "red" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Please fill in all color fields correctly.");
    assert_eq!(backend.requested(&Method::POST, paths::COLORS), 0);
}

#[tokio::test]
async fn unknown_catalog_resource_is_rejected() {
    let backend = Arc::new(MockBackend::new());
    let request = Request::builder()
        .uri("/api/catalog/wheels")
        .body(Body::empty())
        .expect("request");
    let (status, _) = call(app(backend.clone()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn login_relays_backend_cookies() {
    let backend = Arc::new(MockBackend::new());
    backend.on_post(paths::LOGIN, &json!({ "username": "alice" }));
    backend.with_set_cookie("JSESSIONID=fresh; Path=/; HttpOnly");

    let response = app(backend.clone())
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            json!({ "username": "alice", "password": "secret" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok()),
        Some("JSESSIONID=fresh; Path=/; HttpOnly")
    );
    let sent = backend.body_of(&Method::POST, paths::LOGIN).expect("login body");
    assert_eq!(sent["password"], "secret");
}

#[tokio::test]
async fn anonymous_session_check_skips_backend() {
    let backend = Arc::new(MockBackend::new());
    let request = Request::builder()
        .uri("/api/auth/check-session")
        .body(Body::empty())
        .expect("request");
    let (status, body) = call(app(backend.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["authenticated"], false);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn registration_is_validated_and_birthdate_converted() {
    let backend = Arc::new(MockBackend::new());
    backend.on_post(paths::REGISTER, &json!({ "username": "carol" }));

    let form = json!({
        "username": "carol",
        "password": "pw",
        "confirmPassword": "pw",
        "firstName": "Carol",
        "lastName": "Meier",
        "email": "carol@example.com",
        "birthdate": "1990-04-07",
        "address": "Bahnhofstrasse 1",
        "zipCode": "8001",
        "city": "Zürich",
        "country": "CH",
        "phoneNumber": "0791234567",
    });

    let (status, _) = call(
        app(backend.clone()),
        json_request(Method::POST, "/api/auth/register", form.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let sent = backend.body_of(&Method::POST, paths::REGISTER).expect("body");
    assert_eq!(sent["birthdate"], "07.04.1990");

    let mut bad = form;
    bad["zipCode"] = json!("80011");
    let (status, body) = call(
        app(backend.clone()),
        json_request(Method::POST, "/api/auth/register", bad),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "zip code must have 4 digits");
    assert_eq!(backend.requested(&Method::POST, paths::REGISTER), 1);
}

#[tokio::test]
async fn backend_outage_maps_to_fallback_message() {
    let backend = Arc::new(MockBackend::new());
    backend.fail(
        Method::GET,
        paths::VEHICLES,
        StatusCode::SERVICE_UNAVAILABLE,
        Value::Null,
    );
    let (status, body) = call(app(backend.clone()), get("/api/vehicles")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Default error message");
}
