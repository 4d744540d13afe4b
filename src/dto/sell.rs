use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Specs, Vehicle, optional_id};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    #[serde(default)]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub year: i32,
    #[serde(default)]
    pub image: Option<String>,
    #[validate(range(min = 0))]
    pub mileage: i64,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub vehicle_history: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    #[validate(required)]
    pub brands_id: Option<Uuid>,
    #[serde(default, deserialize_with = "optional_id")]
    #[validate(required)]
    pub types_id: Option<Uuid>,
    #[serde(default, deserialize_with = "optional_id")]
    #[validate(required)]
    pub colors_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecsForm {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub power_kw: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub power_ps: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub length_millimeter: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub width_millimeter: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub height_millimeter: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub trunk_in_liter_min: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub trunk_in_liter_max: i32,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub zero_to_hundred_in_seconds: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub top_speed_in_kmh: i32,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub consumption_hundred_in_x: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub co_two_emission_in_g_per_km: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub cubic_capacity: i32,
    #[serde(default, deserialize_with = "optional_id")]
    #[validate(required)]
    pub doors_id: Option<Uuid>,
    #[serde(default, deserialize_with = "optional_id")]
    #[validate(required)]
    pub seats_id: Option<Uuid>,
    #[serde(default, deserialize_with = "optional_id")]
    #[validate(required)]
    pub engine_id: Option<Uuid>,
    #[serde(default, deserialize_with = "optional_id")]
    #[validate(required)]
    pub fuels_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SellRequest {
    pub vehicle: VehicleForm,
    pub specs: SpecsForm,
}

/// Specs as sent upstream; `id` is omitted on create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecsPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub form: &'a SpecsForm,
}

/// Vehicle as sent upstream; `id` is omitted on create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub form: &'a VehicleForm,
    pub specs_id: Uuid,
    pub seller_id: Uuid,
}

/// A seller's vehicle together with its specs, as needed to prefill the edit form.
#[derive(Debug, Serialize, ToSchema)]
pub struct Listing {
    pub vehicle: Vehicle,
    pub specs: Specs,
}
