//! Joins a flat vehicle record with everything it references.
//!
//! Resolution happens in two dependent waves per vehicle. The first wave fetches the
//! brand, type, color and specs concurrently; the holding and the four spec lookups
//! (engine, fuel, doors, seats) follow as soon as the brand and the specs they depend
//! on have arrived. Any failed fetch fails the whole vehicle, and for a batch the
//! whole batch. Nothing is retried or cached.

use futures::future::{try_join, try_join_all};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    backend::{Api, paths},
    dto::vehicles::{SpecsWithDetails, VehicleWithDetails, VehicleWithFullDetails},
    error::AppResult,
    models::{Brand, Color, Doors, Engine, Fuel, Holding, Seats, Specs, User, Vehicle, VehicleType},
};

async fn fetch<T: DeserializeOwned>(api: Api<'_>, collection: &str, id: Uuid) -> AppResult<T> {
    api.get(&paths::item(collection, id)).await
}

async fn resolve_brand(api: Api<'_>, brand_id: Uuid) -> AppResult<(Brand, Holding)> {
    let brand: Brand = fetch(api, paths::BRANDS, brand_id).await?;
    let holding: Holding = fetch(api, paths::HOLDINGS, brand.holding_id).await?;
    Ok((brand, holding))
}

async fn resolve_color(api: Api<'_>, color_id: Option<Uuid>) -> AppResult<Option<Color>> {
    match color_id {
        Some(id) => fetch(api, paths::COLORS, id).await.map(Some),
        None => Ok(None),
    }
}

pub async fn resolve_specs(api: Api<'_>, specs_id: Uuid) -> AppResult<SpecsWithDetails> {
    let specs: Specs = fetch(api, paths::SPECS, specs_id).await?;
    let (engine, fuel, doors, seats) = futures::try_join!(
        fetch::<Engine>(api, paths::ENGINES, specs.engine_id),
        fetch::<Fuel>(api, paths::FUELS, specs.fuels_id),
        fetch::<Doors>(api, paths::DOORS, specs.doors_id),
        fetch::<Seats>(api, paths::SEATS, specs.seats_id),
    )?;
    Ok(SpecsWithDetails {
        specs,
        engine,
        fuel,
        doors,
        seats,
    })
}

/// Resolves one vehicle into its listing record.
pub async fn resolve(api: Api<'_>, vehicle: Vehicle) -> AppResult<VehicleWithDetails> {
    let ((brand, holding), vehicle_type, color, specs) = futures::try_join!(
        resolve_brand(api, vehicle.brands_id),
        fetch::<VehicleType>(api, paths::TYPES, vehicle.types_id),
        resolve_color(api, vehicle.colors_id),
        resolve_specs(api, vehicle.specs_id),
    )?;
    Ok(VehicleWithDetails {
        vehicle,
        brand,
        holding,
        vehicle_type,
        color,
        specs,
    })
}

/// Resolves a batch, all-or-nothing, preserving input order.
pub async fn resolve_all(
    api: Api<'_>,
    vehicles: Vec<Vehicle>,
) -> AppResult<Vec<VehicleWithDetails>> {
    let count = vehicles.len();
    try_join_all(vehicles.into_iter().map(|vehicle| resolve(api, vehicle)))
        .await
        .inspect(|_| tracing::debug!(count, "vehicles resolved"))
        .inspect_err(|err| tracing::error!(error = %err, count, "error fetching vehicles"))
}

async fn fetch_full(api: Api<'_>, id: Uuid) -> AppResult<VehicleWithFullDetails> {
    let vehicle: Vehicle = fetch(api, paths::VEHICLES, id).await?;
    let seller_id = vehicle.seller_id;
    let (details, seller) = try_join(
        resolve(api, vehicle),
        fetch::<User>(api, paths::USERS, seller_id),
    )
    .await?;
    Ok(VehicleWithFullDetails { details, seller })
}

/// Fetches and resolves a single vehicle including its seller.
pub async fn resolve_full(api: Api<'_>, id: Uuid) -> AppResult<VehicleWithFullDetails> {
    fetch_full(api, id).await.inspect_err(|err| {
        tracing::error!(vehicle_id = %id, error = %err, "error fetching vehicle details")
    })
}
