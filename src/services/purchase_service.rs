use uuid::Uuid;

use crate::{
    audit::log_audit,
    backend::{Api, paths},
    dto::purchases::{CreatePurchaseRequest, PurchasePayload},
    error::{AppError, AppResult},
    middleware::auth::{CurrentUser, ensure_admin},
    models::{Purchase, Vehicle},
    response::{ApiResponse, Meta},
};

fn involves(purchase: &Purchase, user: &CurrentUser) -> bool {
    purchase.buyer_id == user.user.id || purchase.seller_id == user.user.id
}

/// Admins see every purchase; everyone else only those they bought or sold.
pub async fn list_purchases(
    api: Api<'_>,
    user: &CurrentUser,
) -> AppResult<ApiResponse<Vec<Purchase>>> {
    let purchases: Vec<Purchase> = api.get(paths::PURCHASES).await?;
    let purchases: Vec<Purchase> = if user.role().is_admin() {
        purchases
    } else {
        purchases.into_iter().filter(|p| involves(p, user)).collect()
    };
    let meta = Meta::count(purchases.len());
    Ok(ApiResponse::success("Purchases", purchases, Some(meta)))
}

pub async fn get_purchase(
    api: Api<'_>,
    user: &CurrentUser,
    id: Uuid,
) -> AppResult<ApiResponse<Purchase>> {
    let purchase: Purchase = api.get(&paths::item(paths::PURCHASES, id)).await?;
    if !involves(&purchase, user) && !user.role().is_admin() {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success("Purchase", purchase, None))
}

pub async fn create_purchase(
    api: Api<'_>,
    user: &CurrentUser,
    payload: CreatePurchaseRequest,
) -> AppResult<ApiResponse<Purchase>> {
    let vehicle: Vehicle = api
        .get(&paths::item(paths::VEHICLES, payload.vehicle_id))
        .await?;
    if vehicle.seller_id == user.user.id {
        return Err(AppError::BadRequest("cannot buy your own vehicle".into()));
    }

    let body = PurchasePayload {
        buyer_id: user.user.id,
        seller_id: vehicle.seller_id,
        vehicle_id: vehicle.id,
    };
    let created: Purchase = api.post(paths::PURCHASES, &body).await?;

    log_audit(
        Some(user.user.id),
        "purchase_create",
        Some("purchases"),
        Some(serde_json::json!({ "purchase_id": created.id, "vehicle_id": vehicle.id })),
    );

    Ok(ApiResponse::success(
        "Purchase created",
        created,
        Some(Meta::empty()),
    ))
}

pub async fn delete_purchase(
    api: Api<'_>,
    user: &CurrentUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    api.delete(&paths::item(paths::PURCHASES, id)).await?;

    log_audit(
        Some(user.user.id),
        "purchase_delete",
        Some("purchases"),
        Some(serde_json::json!({ "purchase_id": id })),
    );

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
