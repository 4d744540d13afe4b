use uuid::Uuid;

use crate::{
    backend::{Api, paths},
    dto::vehicles::{VehicleFilter, VehicleListing, VehicleWithFullDetails},
    error::AppResult,
    models::Vehicle,
    response::{ApiResponse, Meta},
    services::{
        aggregator,
        filter::{FilterUpdate, ListingView},
    },
};

/// Loads and resolves every listed vehicle. Each call re-runs the whole fan-out.
pub async fn load_view(api: Api<'_>) -> AppResult<ListingView> {
    let vehicles: Vec<Vehicle> = api.get(paths::VEHICLES).await?;
    let resolved = aggregator::resolve_all(api, vehicles).await?;
    Ok(ListingView::load(resolved))
}

pub async fn list_vehicles(
    api: Api<'_>,
    filter: VehicleFilter,
) -> AppResult<ApiResponse<VehicleListing>> {
    let view = load_view(api).await?.update(FilterUpdate::Replace(filter));
    let meta = Meta::new(view.total() as i64, view.visible_count() as i64);
    Ok(ApiResponse::success(
        "Vehicles",
        view.into_listing(),
        Some(meta),
    ))
}

pub async fn get_vehicle(
    api: Api<'_>,
    id: Uuid,
) -> AppResult<ApiResponse<VehicleWithFullDetails>> {
    let vehicle = aggregator::resolve_full(api, id).await?;
    Ok(ApiResponse::success("Vehicle", vehicle, None))
}
