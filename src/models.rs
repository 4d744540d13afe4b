use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Role strings handed out by the backend. Anything other than these two is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.strip_prefix("ROLE_").unwrap_or(&normalized) {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(format!("unknown role `{value}`")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("ADMIN"),
            Role::User => f.write_str("USER"),
        }
    }
}

/// Accepts `null`, a missing field or an empty string as "no id".
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    #[serde(rename = "eMail", default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Row-level vehicle record; related entities are referenced by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    pub price: f64,
    pub year: i32,
    #[serde(default)]
    pub image: Option<String>,
    pub mileage: i64,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub vehicle_history: Option<String>,
    pub brands_id: Uuid,
    pub specs_id: Uuid,
    pub types_id: Uuid,
    #[serde(default, deserialize_with = "optional_id")]
    pub colors_id: Option<Uuid>,
    pub seller_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    pub founding: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    pub founding: i32,
    pub holding_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: Uuid,
    pub name: String,
    pub hex_code: String,
}

/// Vehicle body style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleType {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Engine {
    pub id: Uuid,
    pub engine_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Fuel {
    pub id: Uuid,
    pub fuel_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Doors {
    pub id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Seats {
    pub id: Uuid,
    pub quantity: i32,
}

/// Technical specification of a vehicle. References four more lookup entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Specs {
    pub id: Uuid,
    #[serde(default)]
    pub power_kw: i32,
    #[serde(default)]
    pub power_ps: i32,
    #[serde(default)]
    pub length_millimeter: i32,
    #[serde(default)]
    pub width_millimeter: i32,
    #[serde(default)]
    pub height_millimeter: i32,
    #[serde(default)]
    pub trunk_in_liter_min: i32,
    #[serde(default)]
    pub trunk_in_liter_max: i32,
    #[serde(default)]
    pub zero_to_hundred_in_seconds: f64,
    #[serde(default)]
    pub top_speed_in_kmh: i32,
    #[serde(default)]
    pub consumption_hundred_in_x: f64,
    #[serde(default)]
    pub co_two_emission_in_g_per_km: i32,
    #[serde(default)]
    pub cubic_capacity: i32,
    pub doors_id: Uuid,
    pub seats_id: Uuid,
    pub engine_id: Uuid,
    pub fuels_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub vehicle_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_accepts_prefixed_and_plain_strings() {
        assert_eq!(Role::try_from("ADMIN".to_string()), Ok(Role::Admin));
        assert_eq!(Role::try_from("ROLE_ADMIN".to_string()), Ok(Role::Admin));
        assert_eq!(Role::try_from("user".to_string()), Ok(Role::User));
        assert!(Role::try_from("SUPERADMIN".to_string()).is_err());
    }

    #[test]
    fn vehicle_tolerates_blank_color_id() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "name": "Golf",
            "price": 15000,
            "year": 2019,
            "mileage": 42000,
            "condition": "USED",
            "brandsId": Uuid::nil(),
            "specsId": Uuid::nil(),
            "typesId": Uuid::nil(),
            "colorsId": "",
            "sellerId": Uuid::nil(),
        });
        let vehicle: Vehicle = serde_json::from_value(json).expect("vehicle");
        assert_eq!(vehicle.colors_id, None);
        assert_eq!(vehicle.price, 15000.0);
    }
}
