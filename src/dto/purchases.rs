use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub vehicle_id: Uuid,
}

/// Body forwarded to the backend; both parties are filled in by the gateway.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePayload {
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub vehicle_id: Uuid,
}
