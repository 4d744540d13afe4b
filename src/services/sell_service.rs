use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    backend::{Api, paths},
    dto::sell::{Listing, SellRequest, SpecsPayload, VehiclePayload},
    error::{AppError, AppResult},
    middleware::auth::CurrentUser,
    models::{Specs, Vehicle},
    response::{ApiResponse, Meta},
};

const INVALID_LISTING: &str = "Please fill in all vehicle fields correctly.";

fn validate(request: &SellRequest) -> AppResult<()> {
    if let Err(err) = request.vehicle.validate().and(request.specs.validate()) {
        tracing::debug!(error = %err, "listing form rejected");
        return Err(AppError::Validation(INVALID_LISTING.to_string()));
    }
    Ok(())
}

fn ensure_owner(user: &CurrentUser, vehicle: &Vehicle) -> AppResult<()> {
    if vehicle.seller_id != user.user.id && !user.role().is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

async fn owned_vehicle(api: Api<'_>, user: &CurrentUser, id: Uuid) -> AppResult<Vehicle> {
    let vehicle: Vehicle = api.get(&paths::item(paths::VEHICLES, id)).await?;
    ensure_owner(user, &vehicle)?;
    Ok(vehicle)
}

/// Vehicles the caller is selling.
pub async fn my_listings(api: Api<'_>, user: &CurrentUser) -> AppResult<ApiResponse<Vec<Vehicle>>> {
    let vehicles: Vec<Vehicle> = api.get(paths::VEHICLES).await?;
    let mine: Vec<Vehicle> = vehicles
        .into_iter()
        .filter(|v| v.seller_id == user.user.id)
        .collect();
    let meta = Meta::count(mine.len());
    Ok(ApiResponse::success("Listings", mine, Some(meta)))
}

/// Creates the specs first, then the vehicle pointing at them with the caller as seller.
pub async fn create_listing(
    api: Api<'_>,
    user: &CurrentUser,
    request: SellRequest,
) -> AppResult<ApiResponse<Listing>> {
    validate(&request)?;

    let specs: Specs = api
        .post(
            paths::SPECS,
            &SpecsPayload {
                id: None,
                form: &request.specs,
            },
        )
        .await?;

    let vehicle: Vehicle = api
        .post(
            paths::VEHICLES,
            &VehiclePayload {
                id: None,
                form: &request.vehicle,
                specs_id: specs.id,
                seller_id: user.user.id,
            },
        )
        .await?;

    log_audit(
        Some(user.user.id),
        "listing_create",
        Some("vehicle"),
        Some(serde_json::json!({ "vehicle_id": vehicle.id, "specs_id": specs.id })),
    );

    Ok(ApiResponse::success(
        "Listing created",
        Listing { vehicle, specs },
        Some(Meta::empty()),
    ))
}

pub async fn get_listing(
    api: Api<'_>,
    user: &CurrentUser,
    id: Uuid,
) -> AppResult<ApiResponse<Listing>> {
    let vehicle = owned_vehicle(api, user, id).await?;
    let specs: Specs = api.get(&paths::item(paths::SPECS, vehicle.specs_id)).await?;
    Ok(ApiResponse::success("Listing", Listing { vehicle, specs }, None))
}

pub async fn update_listing(
    api: Api<'_>,
    user: &CurrentUser,
    id: Uuid,
    request: SellRequest,
) -> AppResult<ApiResponse<Listing>> {
    validate(&request)?;
    let existing = owned_vehicle(api, user, id).await?;

    let specs: Specs = api
        .put(
            &paths::item(paths::SPECS, existing.specs_id),
            &SpecsPayload {
                id: Some(existing.specs_id),
                form: &request.specs,
            },
        )
        .await?;

    let vehicle: Vehicle = api
        .put(
            &paths::item(paths::VEHICLES, id),
            &VehiclePayload {
                id: Some(id),
                form: &request.vehicle,
                specs_id: existing.specs_id,
                seller_id: existing.seller_id,
            },
        )
        .await?;

    log_audit(
        Some(user.user.id),
        "listing_update",
        Some("vehicle"),
        Some(serde_json::json!({ "vehicle_id": id })),
    );

    Ok(ApiResponse::success(
        "Updated",
        Listing { vehicle, specs },
        Some(Meta::empty()),
    ))
}

/// Removes the vehicle and then the specs that only it referenced.
pub async fn delete_listing(
    api: Api<'_>,
    user: &CurrentUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let vehicle = owned_vehicle(api, user, id).await?;
    api.delete(&paths::item(paths::VEHICLES, id)).await?;
    api.delete(&paths::item(paths::SPECS, vehicle.specs_id)).await?;

    log_audit(
        Some(user.user.id),
        "listing_delete",
        Some("vehicle"),
        Some(serde_json::json!({ "vehicle_id": id })),
    );

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
