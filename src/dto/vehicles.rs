use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    Brand, Color, Doors, Engine, Fuel, Holding, Seats, Specs, User, Vehicle, VehicleType,
};

/// Specs with their four lookup entities resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpecsWithDetails {
    #[serde(flatten)]
    pub specs: Specs,
    pub engine: Engine,
    pub fuel: Fuel,
    pub doors: Doors,
    pub seats: Seats,
}

/// Denormalized listing record. Built fresh on every load and never sent back upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleWithDetails {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub brand: Brand,
    pub holding: Holding,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub color: Option<Color>,
    pub specs: SpecsWithDetails,
}

impl VehicleWithDetails {
    pub fn brand_name(&self) -> &str {
        &self.brand.name
    }

    pub fn holding_name(&self) -> &str {
        &self.holding.name
    }

    pub fn type_label(&self) -> &str {
        &self.vehicle_type.kind
    }

    pub fn color_name(&self) -> Option<&str> {
        self.color.as_ref().map(|c| c.name.as_str())
    }

    pub fn engine_type(&self) -> &str {
        &self.specs.engine.engine_type
    }

    pub fn fuel_type(&self) -> &str {
        &self.specs.fuel.fuel_type
    }

    pub fn seat_count(&self) -> i32 {
        self.specs.seats.quantity
    }

    pub fn door_count(&self) -> i32 {
        self.specs.doors.quantity
    }
}

/// Detail page record: the listing record plus the seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VehicleWithFullDetails {
    #[serde(flatten)]
    pub details: VehicleWithDetails,
    pub seller: User,
}

/// Listing filter. `None` is the "All" sentinel for every criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilter {
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    /// Minimum model year.
    pub year: Option<i32>,
    pub max_price: Option<f64>,
    pub max_mileage: Option<i64>,
    pub condition: Option<String>,
    pub holding: Option<String>,
    pub color: Option<String>,
    pub engine: Option<String>,
    pub fuel: Option<String>,
    pub seats: Option<i32>,
    pub doors: Option<i32>,
}

/// Values still selectable in each filter dropdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub types: Vec<String>,
    pub conditions: Vec<String>,
    pub holdings: Vec<String>,
    pub colors: Vec<String>,
    pub engines: Vec<String>,
    pub fuels: Vec<String>,
    pub seats: Vec<i32>,
    pub doors: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleListing {
    pub items: Vec<VehicleWithDetails>,
    pub filters: VehicleFilter,
    pub options: FilterOptions,
}
