//! In-memory stand-in for the PrimeDrive backend.
#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use primedrive_gateway::{
    backend::{Backend, BackendReply, BackendRequest, upstream_error},
    error::AppResult,
    middleware::auth::{CurrentUser, Session},
    models::{Role, User},
};

type Key = (Method, String);

/// Replies keyed by method and path. Unknown routes answer 404 without a body.
#[derive(Default)]
pub struct MockBackend {
    replies: Mutex<HashMap<Key, (StatusCode, Value)>>,
    set_cookies: Mutex<Vec<String>>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, path: impl Into<String>, status: StatusCode, body: Value) {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.into()), (status, body));
    }

    pub fn on_get<T: Serialize>(&self, path: impl Into<String>, body: &T) {
        self.reply(Method::GET, path, StatusCode::OK, json!(body));
    }

    pub fn on_post<T: Serialize>(&self, path: impl Into<String>, body: &T) {
        self.reply(Method::POST, path, StatusCode::OK, json!(body));
    }

    pub fn on_put<T: Serialize>(&self, path: impl Into<String>, body: &T) {
        self.reply(Method::PUT, path, StatusCode::OK, json!(body));
    }

    pub fn on_delete(&self, path: impl Into<String>) {
        self.reply(Method::DELETE, path, StatusCode::OK, Value::Null);
    }

    pub fn fail(&self, method: Method, path: impl Into<String>, status: StatusCode, body: Value) {
        self.reply(method, path, status, body);
    }

    pub fn with_set_cookie(&self, cookie: &str) {
        self.set_cookies.lock().unwrap().push(cookie.to_string());
    }

    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested(&self, method: &Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }

    pub fn requests_to(&self, prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .count()
    }

    pub fn body_of(&self, method: &Method, path: &str) -> Option<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| &r.method == method && r.path == path)
            .and_then(|r| r.body.clone())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send(&self, request: BackendRequest) -> AppResult<BackendReply> {
        let key = (request.method.clone(), request.path.clone());
        self.requests.lock().unwrap().push(request);

        let (status, body) = self
            .replies
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or((StatusCode::NOT_FOUND, Value::Null));
        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }
        Ok(BackendReply {
            status,
            body,
            set_cookies: self.set_cookies.lock().unwrap().clone(),
        })
    }
}

pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub const SESSION_COOKIE: &str = "JSESSIONID=abc123";

pub fn session() -> Session {
    Session::from_cookie(SESSION_COOKIE)
}

pub fn user(n: u128, username: &str, role: Role) -> User {
    User {
        id: id(n),
        username: username.to_string(),
        role,
        email: Some(format!("{username}@primedrive.test")),
        first_name: None,
        last_name: None,
        birth_date: None,
        address: None,
        zip_code: None,
        city: None,
        country: None,
        phone_number: None,
    }
}

pub fn alice() -> User {
    user(900, "alice", Role::User)
}

pub fn bob() -> User {
    user(901, "bob", Role::User)
}

pub fn admin() -> User {
    user(999, "admin", Role::Admin)
}

pub fn current(user: User) -> CurrentUser {
    CurrentUser {
        session: session(),
        user,
    }
}

/// Registers a small but complete vehicle world:
///
/// | vehicle | brand (holding)            | type  | color | engine/fuel        | doors/seats | price | year | mileage | condition |
/// |---------|----------------------------|-------|-------|--------------------|-------------|-------|------|---------|-----------|
/// | Golf    | Volkswagen (Volkswagen AG) | Sedan | Red   | V6/Petrol          | 5/5         | 15000 | 2018 | 60000   | USED      |
/// | Q4      | Audi (Volkswagen AG)       | SUV   | Black | Electric/Electricity | 5/5       | 45000 | 2023 | 10      | NEW       |
/// | M2      | BMW (BMW Group)            | Sedan | -     | V6/Petrol          | 3/2         | 60000 | 2022 | 5000    | NEW       |
pub fn vehicle_world() -> MockBackend {
    let backend = MockBackend::new();

    let holdings = [(1, "Volkswagen AG", 1937), (2, "BMW Group", 1916)];
    for (n, name, founding) in holdings {
        backend.on_get(
            format!("/vehicle_holdings/{}", id(n)),
            &json!({ "id": id(n), "name": name, "logo": "logo.png", "founding": founding }),
        );
    }

    let brands = [(10, "Volkswagen", 1), (11, "Audi", 1), (12, "BMW", 2)];
    for (n, name, holding) in brands {
        backend.on_get(
            format!("/vehicle_brands/{}", id(n)),
            &json!({ "id": id(n), "name": name, "logo": "logo.png", "founding": 1909, "holdingId": id(holding) }),
        );
    }

    for (n, kind) in [(20, "SUV"), (21, "Sedan")] {
        backend.on_get(
            format!("/vehicle_types/{}", id(n)),
            &json!({ "id": id(n), "type": kind }),
        );
    }
    for (n, name, hex) in [(30, "Red", "#ff0000"), (31, "Black", "#000000")] {
        backend.on_get(
            format!("/vehicle_colors/{}", id(n)),
            &json!({ "id": id(n), "name": name, "hexCode": hex }),
        );
    }
    for (n, engine) in [(40, "V6"), (41, "Electric")] {
        backend.on_get(
            format!("/vehicle_engine/{}", id(n)),
            &json!({ "id": id(n), "engineType": engine }),
        );
    }
    for (n, fuel) in [(50, "Petrol"), (51, "Electricity")] {
        backend.on_get(
            format!("/vehicle_fuels/{}", id(n)),
            &json!({ "id": id(n), "fuelType": fuel }),
        );
    }
    for (n, quantity) in [(60, 3), (61, 5)] {
        backend.on_get(
            format!("/vehicle_doors/{}", id(n)),
            &json!({ "id": id(n), "quantity": quantity }),
        );
    }
    for (n, quantity) in [(70, 2), (71, 5)] {
        backend.on_get(
            format!("/vehicle_seats/{}", id(n)),
            &json!({ "id": id(n), "quantity": quantity }),
        );
    }

    let specs = [(80, 40, 50, 61, 71), (81, 41, 51, 61, 71), (82, 40, 50, 60, 70)];
    for (n, engine, fuel, doors, seats) in specs {
        backend.on_get(
            format!("/vehicle_specs/{}", id(n)),
            &json!({
                "id": id(n),
                "powerKw": 110,
                "powerPs": 150,
                "doorsId": id(doors),
                "seatsId": id(seats),
                "engineId": id(engine),
                "fuelsId": id(fuel),
            }),
        );
    }

    let vehicles = vec![
        vehicle(100, "Golf", 10, 21, Some(30), 80, 15000.0, 2018, 60000, "USED", 900),
        vehicle(101, "Q4 e-tron", 11, 20, Some(31), 81, 45000.0, 2023, 10, "NEW", 901),
        vehicle(102, "M2", 12, 21, None, 82, 60000.0, 2022, 5000, "NEW", 900),
    ];
    for v in &vehicles {
        let vehicle_id = v["id"].as_str().unwrap_or_default().to_string();
        backend.on_get(format!("/vehicle/{vehicle_id}"), v);
    }
    backend.on_get("/vehicle", &vehicles);

    for u in [alice(), bob(), admin()] {
        backend.on_get(format!("/users/{}", u.id), &u);
    }

    backend
}

#[allow(clippy::too_many_arguments)]
pub fn vehicle(
    n: u128,
    name: &str,
    brand: u128,
    kind: u128,
    color: Option<u128>,
    specs: u128,
    price: f64,
    year: i32,
    mileage: i64,
    condition: &str,
    seller: u128,
) -> Value {
    json!({
        "id": id(n),
        "name": name,
        "price": price,
        "year": year,
        "image": null,
        "mileage": mileage,
        "condition": condition,
        "vehicleHistory": null,
        "brandsId": id(brand),
        "specsId": id(specs),
        "typesId": id(kind),
        "colorsId": color.map(id),
        "sellerId": id(seller),
    })
}
