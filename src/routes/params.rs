use std::str::FromStr;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::{dto::vehicles::VehicleFilter, error::AppError};

/// Raw listing query. Every value arrives as text so the "All" sentinel can be told
/// apart from a malformed number.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VehicleFilterQuery {
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    /// Minimum model year.
    pub year: Option<String>,
    pub max_price: Option<String>,
    pub max_mileage: Option<String>,
    pub condition: Option<String>,
    pub holding: Option<String>,
    pub color: Option<String>,
    pub engine: Option<String>,
    pub fuel: Option<String>,
    pub seats: Option<String>,
    pub doors: Option<String>,
}

fn is_all(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("all")
}

fn text(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    let trimmed = raw.trim();
    (!is_all(trimmed)).then(|| trimmed.to_string())
}

/// Zero counts as unset, like an untouched numeric input.
fn number<T>(name: &str, raw: Option<String>) -> Result<Option<T>, AppError>
where
    T: FromStr + Default + PartialEq,
{
    let Some(raw) = text(raw) else {
        return Ok(None);
    };
    let value: T = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{name} must be a number")))?;
    Ok((value != T::default()).then_some(value))
}

/// Like [`number`], but NaN and infinities are rejected too.
fn amount(name: &str, raw: Option<String>) -> Result<Option<f64>, AppError> {
    match number::<f64>(name, raw)? {
        Some(value) if !value.is_finite() => {
            Err(AppError::BadRequest(format!("{name} must be a number")))
        }
        value => Ok(value),
    }
}

impl VehicleFilterQuery {
    pub fn into_filter(self) -> Result<VehicleFilter, AppError> {
        Ok(VehicleFilter {
            brand: text(self.brand),
            vehicle_type: text(self.vehicle_type),
            year: number("year", self.year)?,
            max_price: amount("max_price", self.max_price)?,
            max_mileage: number("max_mileage", self.max_mileage)?,
            condition: text(self.condition),
            holding: text(self.holding),
            color: text(self.color),
            engine: text(self.engine),
            fuel: text(self.fuel),
            seats: number("seats", self.seats)?,
            doors: number("doors", self.doors)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_blank_and_zero_mean_unconstrained() {
        let query = VehicleFilterQuery {
            brand: Some("All".into()),
            vehicle_type: Some("".into()),
            year: Some("0".into()),
            max_price: Some("0".into()),
            seats: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(query.into_filter().unwrap(), VehicleFilter::default());
    }

    #[test]
    fn values_are_parsed() {
        let query = VehicleFilterQuery {
            brand: Some(" BMW ".into()),
            year: Some("2018".into()),
            max_price: Some("25000.5".into()),
            doors: Some("5".into()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.brand.as_deref(), Some("BMW"));
        assert_eq!(filter.year, Some(2018));
        assert_eq!(filter.max_price, Some(25000.5));
        assert_eq!(filter.doors, Some(5));
    }

    #[test]
    fn non_finite_price_is_a_bad_request() {
        for raw in ["NaN", "inf", "-infinity"] {
            let query = VehicleFilterQuery {
                max_price: Some(raw.into()),
                ..Default::default()
            };
            assert!(
                matches!(query.into_filter(), Err(AppError::BadRequest(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_number_is_a_bad_request() {
        let query = VehicleFilterQuery {
            max_mileage: Some("lots".into()),
            ..Default::default()
        };
        assert!(matches!(query.into_filter(), Err(AppError::BadRequest(_))));
    }
}
