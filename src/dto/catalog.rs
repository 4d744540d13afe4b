use chrono::Datelike;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::optional_id;

lazy_static! {
    static ref HEX_CODE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

fn founding_year(year: i32) -> Result<(), ValidationError> {
    if year < 1800 || year > chrono::Utc::now().year() {
        return Err(ValidationError::new("founding_year"));
    }
    Ok(())
}

fn validate_brand(form: &BrandForm) -> Result<(), ValidationError> {
    founding_year(form.founding)
}

fn validate_holding(form: &HoldingForm) -> Result<(), ValidationError> {
    founding_year(form.founding)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColorForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(regex = "HEX_CODE")]
    pub hex_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_brand"))]
pub struct BrandForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub logo: String,
    #[validate(range(min = 1800))]
    pub founding: i32,
    #[serde(default, deserialize_with = "optional_id")]
    #[validate(required)]
    pub holding_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_holding"))]
pub struct HoldingForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub logo: String,
    #[validate(range(min = 1800))]
    pub founding: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TypeForm {
    #[serde(rename = "type")]
    #[validate(length(min = 1))]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineForm {
    #[validate(length(min = 1))]
    pub engine_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FuelForm {
    #[validate(length(min = 1))]
    pub fuel_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DoorsForm {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SeatsForm {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Reference collections exposed under `/api/admin/{resource}` and `/api/catalog/{resource}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CatalogResource {
    Colors,
    Brands,
    Holdings,
    Types,
    Engines,
    Fuels,
    Doors,
    Seats,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CatalogSearch {
    /// Case-insensitive substring matched against the entity's display key.
    pub search: Option<String>,
}
