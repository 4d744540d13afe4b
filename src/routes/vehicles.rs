use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::vehicles::{VehicleListing, VehicleWithFullDetails},
    error::AppResult,
    middleware::auth::Session,
    response::ApiResponse,
    routes::params::VehicleFilterQuery,
    services::vehicle_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/{id}", get(get_vehicle))
}

#[utoipa::path(
    get,
    path = "/api/vehicles",
    params(
        ("brand" = Option<String>, Query, description = "Brand name, `All` for any"),
        ("type" = Option<String>, Query, description = "Vehicle type"),
        ("year" = Option<i32>, Query, description = "Minimum model year"),
        ("max_price" = Option<f64>, Query, description = "Maximum price"),
        ("max_mileage" = Option<i64>, Query, description = "Maximum mileage"),
        ("condition" = Option<String>, Query, description = "NEW or USED"),
        ("holding" = Option<String>, Query, description = "Holding name"),
        ("color" = Option<String>, Query, description = "Color name"),
        ("engine" = Option<String>, Query, description = "Engine type"),
        ("fuel" = Option<String>, Query, description = "Fuel type"),
        ("seats" = Option<i32>, Query, description = "Seat count"),
        ("doors" = Option<i32>, Query, description = "Door count")
    ),
    responses(
        (status = 200, description = "Filtered vehicles with the remaining filter options", body = ApiResponse<VehicleListing>),
        (status = 400, description = "Malformed numeric filter"),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "Vehicles"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<VehicleFilterQuery>,
) -> AppResult<Json<ApiResponse<VehicleListing>>> {
    let filter = query.into_filter()?;
    let resp = vehicle_service::list_vehicles(state.api(&session), filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle with every related entity and its seller", body = ApiResponse<VehicleWithFullDetails>),
        (status = 404, description = "Not Found")
    ),
    tag = "Vehicles"
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<VehicleWithFullDetails>>> {
    let resp = vehicle_service::get_vehicle(state.api(&session), id).await?;
    Ok(Json(resp))
}
