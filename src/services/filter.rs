//! Client-side vehicle filtering.
//!
//! Matching is a plain conjunction over the active criteria. Option recomputation is
//! deliberately asymmetric: brands are sourced from the full vehicle set (narrowed
//! only by the holding selection), and so are types until a brand is picked. Every
//! other dropdown is sourced from the currently filtered set, so choosing a holding
//! never collapses its own dropdown.

use std::{collections::HashSet, hash::Hash, sync::Arc};

use crate::dto::vehicles::{FilterOptions, VehicleFilter, VehicleListing, VehicleWithDetails};

fn eq_opt(criterion: &Option<String>, value: &str) -> bool {
    criterion.as_deref().is_none_or(|wanted| wanted == value)
}

/// True iff the vehicle satisfies every active criterion.
pub fn matches(vehicle: &VehicleWithDetails, filter: &VehicleFilter) -> bool {
    eq_opt(&filter.brand, vehicle.brand_name())
        && eq_opt(&filter.vehicle_type, vehicle.type_label())
        && filter.year.is_none_or(|min| vehicle.vehicle.year >= min)
        && filter.max_price.is_none_or(|max| vehicle.vehicle.price <= max)
        && filter
            .max_mileage
            .is_none_or(|max| vehicle.vehicle.mileage <= max)
        && eq_opt(&filter.condition, &vehicle.vehicle.condition)
        && eq_opt(&filter.holding, vehicle.holding_name())
        && filter
            .color
            .as_deref()
            .is_none_or(|wanted| vehicle.color_name() == Some(wanted))
        && eq_opt(&filter.engine, vehicle.engine_type())
        && eq_opt(&filter.fuel, vehicle.fuel_type())
        && filter.seats.is_none_or(|n| vehicle.seat_count() == n)
        && filter.doors.is_none_or(|n| vehicle.door_count() == n)
}

/// Filtered subset in source order.
pub fn apply<'a>(
    vehicles: &'a [VehicleWithDetails],
    filter: &VehicleFilter,
) -> Vec<&'a VehicleWithDetails> {
    vehicles.iter().filter(|v| matches(v, filter)).collect()
}

fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

fn names<'a, F>(vehicles: &[&'a VehicleWithDetails], key: F) -> Vec<String>
where
    F: Fn(&'a VehicleWithDetails) -> Option<&'a str>,
{
    distinct(
        vehicles
            .iter()
            .copied()
            .filter_map(key)
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
    )
}

fn counts<F>(vehicles: &[&VehicleWithDetails], key: F) -> Vec<i32>
where
    F: Fn(&VehicleWithDetails) -> i32,
{
    distinct(vehicles.iter().map(|v| key(v)).filter(|n| *n != 0))
}

/// Recomputes every dropdown for the given filter state.
pub fn options(vehicles: &[VehicleWithDetails], filter: &VehicleFilter) -> FilterOptions {
    let all: Vec<&VehicleWithDetails> = vehicles.iter().collect();
    let filtered = apply(vehicles, filter);

    let in_holding: Vec<&VehicleWithDetails> = match filter.holding.as_deref() {
        Some(holding) => all
            .iter()
            .copied()
            .filter(|v| v.holding_name() == holding)
            .collect(),
        None => all.clone(),
    };
    // Once a brand is picked, types follow the filtered set like the other dropdowns.
    let type_source: &[&VehicleWithDetails] = if filter.brand.is_some() {
        &filtered
    } else {
        &in_holding
    };

    FilterOptions {
        brands: names(&in_holding, |v| Some(v.brand_name())),
        types: names(type_source, |v| Some(v.type_label())),
        conditions: names(&filtered, |v| Some(v.vehicle.condition.as_str())),
        holdings: names(&all, |v| Some(v.holding_name())),
        colors: names(&filtered, |v| v.color_name()),
        engines: names(&filtered, |v| Some(v.engine_type())),
        fuels: names(&filtered, |v| Some(v.fuel_type())),
        seats: counts(&filtered, |v| v.seat_count()),
        doors: counts(&filtered, |v| v.door_count()),
    }
}

/// One user interaction with the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Brand(Option<String>),
    Type(Option<String>),
    Year(Option<i32>),
    MaxPrice(Option<f64>),
    MaxMileage(Option<i64>),
    Condition(Option<String>),
    Holding(Option<String>),
    Color(Option<String>),
    Engine(Option<String>),
    Fuel(Option<String>),
    Seats(Option<i32>),
    Doors(Option<i32>),
    Replace(VehicleFilter),
    Reset,
}

impl FilterUpdate {
    fn apply_to(self, mut filter: VehicleFilter) -> VehicleFilter {
        match self {
            FilterUpdate::Brand(v) => filter.brand = v,
            FilterUpdate::Type(v) => filter.vehicle_type = v,
            FilterUpdate::Year(v) => filter.year = v,
            FilterUpdate::MaxPrice(v) => filter.max_price = v,
            FilterUpdate::MaxMileage(v) => filter.max_mileage = v,
            FilterUpdate::Condition(v) => filter.condition = v,
            FilterUpdate::Holding(v) => filter.holding = v,
            FilterUpdate::Color(v) => filter.color = v,
            FilterUpdate::Engine(v) => filter.engine = v,
            FilterUpdate::Fuel(v) => filter.fuel = v,
            FilterUpdate::Seats(v) => filter.seats = v,
            FilterUpdate::Doors(v) => filter.doors = v,
            FilterUpdate::Replace(replacement) => filter = replacement,
            FilterUpdate::Reset => filter = VehicleFilter::default(),
        }
        filter
    }
}

/// Immutable state of the listing page. Every interaction produces a new view.
#[derive(Debug, Clone)]
pub struct ListingView {
    vehicles: Arc<Vec<VehicleWithDetails>>,
    filters: VehicleFilter,
    visible: Vec<usize>,
    options: FilterOptions,
}

impl ListingView {
    pub fn load(vehicles: Vec<VehicleWithDetails>) -> Self {
        Self::build(Arc::new(vehicles), VehicleFilter::default())
    }

    fn build(vehicles: Arc<Vec<VehicleWithDetails>>, filters: VehicleFilter) -> Self {
        let visible = vehicles
            .iter()
            .enumerate()
            .filter(|(_, v)| matches(v, &filters))
            .map(|(i, _)| i)
            .collect();
        let options = options(&vehicles, &filters);
        Self {
            vehicles,
            filters,
            visible,
            options,
        }
    }

    pub fn update(&self, update: FilterUpdate) -> Self {
        let filters = update.apply_to(self.filters.clone());
        Self::build(Arc::clone(&self.vehicles), filters)
    }

    pub fn filters(&self) -> &VehicleFilter {
        &self.filters
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn total(&self) -> usize {
        self.vehicles.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &VehicleWithDetails> {
        self.visible.iter().map(|&i| &self.vehicles[i])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn into_listing(self) -> VehicleListing {
        let items = self.visible().cloned().collect();
        VehicleListing {
            items,
            filters: self.filters,
            options: self.options,
        }
    }
}
