mod common;

use axum::http::Method;
use primedrive_gateway::{
    backend::{Api, paths},
    dto::{purchases::CreatePurchaseRequest, sell::SellRequest},
    error::AppError,
    services::{purchase_service, sell_service},
};
use serde_json::json;

use common::{MockBackend, alice, bob, current, id, session, vehicle, vehicle_world};

fn sell_request(colors_id: Option<u128>) -> SellRequest {
    serde_json::from_value(json!({
        "vehicle": {
            "name": "Polo",
            "price": 12000,
            "year": 2017,
            "mileage": 80000,
            "condition": "USED",
            "brandsId": id(10),
            "typesId": id(21),
            "colorsId": colors_id.map(id).map(|u| u.to_string()).unwrap_or_default(),
        },
        "specs": {
            "powerKw": 70,
            "powerPs": 95,
            "doorsId": id(61),
            "seatsId": id(71),
            "engineId": id(40),
            "fuelsId": id(50),
        }
    }))
    .expect("sell request")
}

fn created_specs() -> serde_json::Value {
    json!({
        "id": id(85),
        "powerKw": 70,
        "powerPs": 95,
        "doorsId": id(61),
        "seatsId": id(71),
        "engineId": id(40),
        "fuelsId": id(50),
    })
}

#[tokio::test]
async fn listing_is_created_specs_first() -> anyhow::Result<()> {
    let backend = MockBackend::new();
    backend.on_post(paths::SPECS, &created_specs());
    backend.on_post(
        paths::VEHICLES,
        &vehicle(120, "Polo", 10, 21, Some(30), 85, 12000.0, 2017, 80000, "USED", 900),
    );
    let session = session();
    let seller = current(alice());

    let resp =
        sell_service::create_listing(Api::new(&backend, &session), &seller, sell_request(Some(30)))
            .await?;
    let listing = resp.data.expect("listing");
    assert_eq!(listing.specs.id, id(85));
    assert_eq!(listing.vehicle.seller_id, id(900));

    let order: Vec<String> = backend.requests().iter().map(|r| r.path.clone()).collect();
    assert_eq!(order, [paths::SPECS, paths::VEHICLES]);

    let specs_body = backend.body_of(&Method::POST, paths::SPECS).expect("specs body");
    assert!(specs_body.get("id").is_none());

    let vehicle_body = backend
        .body_of(&Method::POST, paths::VEHICLES)
        .expect("vehicle body");
    assert_eq!(vehicle_body["specsId"], json!(id(85)));
    assert_eq!(vehicle_body["sellerId"], json!(id(900)));
    assert_eq!(vehicle_body["colorsId"], json!(id(30)));
    Ok(())
}

#[tokio::test]
async fn missing_color_is_rejected_before_any_request() {
    let backend = MockBackend::new();
    let session = session();
    let seller = current(alice());

    let err = sell_service::create_listing(Api::new(&backend, &session), &seller, sell_request(None))
        .await
        .expect_err("color required");
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn only_the_seller_may_edit() {
    let backend = vehicle_world();
    let session = session();

    // Q4 e-tron belongs to bob.
    let err = sell_service::delete_listing(Api::new(&backend, &session), &current(alice()), id(101))
        .await
        .expect_err("not the seller");
    assert!(matches!(err, AppError::Forbidden));
    assert_eq!(backend.requested(&Method::DELETE, &paths::item(paths::VEHICLES, id(101))), 0);
}

#[tokio::test]
async fn delete_removes_vehicle_then_specs() -> anyhow::Result<()> {
    let backend = vehicle_world();
    backend.on_delete(paths::item(paths::VEHICLES, id(101)));
    backend.on_delete(paths::item(paths::SPECS, id(81)));
    let session = session();

    sell_service::delete_listing(Api::new(&backend, &session), &current(bob()), id(101)).await?;

    let deletes: Vec<String> = backend
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::DELETE)
        .map(|r| r.path)
        .collect();
    assert_eq!(
        deletes,
        [
            paths::item(paths::VEHICLES, id(101)),
            paths::item(paths::SPECS, id(81))
        ]
    );
    Ok(())
}

#[tokio::test]
async fn my_listings_only_returns_own_vehicles() -> anyhow::Result<()> {
    let backend = vehicle_world();
    let session = session();

    let resp = sell_service::my_listings(Api::new(&backend, &session), &current(alice())).await?;
    let names: Vec<String> = resp
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.name)
        .collect();
    assert_eq!(names, ["Golf", "M2"]);
    Ok(())
}

#[tokio::test]
async fn purchase_records_buyer_and_seller() -> anyhow::Result<()> {
    let backend = vehicle_world();
    backend.on_post(
        paths::PURCHASES,
        &json!({ "id": id(500), "buyerId": id(901), "sellerId": id(900), "vehicleId": id(100) }),
    );
    let session = session();

    let resp = purchase_service::create_purchase(
        Api::new(&backend, &session),
        &current(bob()),
        CreatePurchaseRequest { vehicle_id: id(100) },
    )
    .await?;
    assert_eq!(resp.data.map(|p| p.id), Some(id(500)));

    let body = backend.body_of(&Method::POST, paths::PURCHASES).expect("body");
    assert_eq!(body["buyerId"], json!(id(901)));
    assert_eq!(body["sellerId"], json!(id(900)));

    let err = purchase_service::create_purchase(
        Api::new(&backend, &session),
        &current(alice()),
        CreatePurchaseRequest { vehicle_id: id(100) },
    )
    .await
    .expect_err("own vehicle");
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}
