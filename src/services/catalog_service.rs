//! Admin data management for the reference entities a vehicle points at.
//!
//! Create and update requests are validated before anything reaches the backend; an
//! invalid form is reported back without issuing a single request.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    backend::{Api, paths},
    dto::catalog::{
        BrandForm, CatalogResource, ColorForm, DoorsForm, EngineForm, FuelForm, HoldingForm,
        SeatsForm, TypeForm,
    },
    error::{AppError, AppResult},
    middleware::auth::{CurrentUser, ensure_admin},
    models::{Brand, Color, Doors, Engine, Fuel, Holding, Seats, VehicleType},
    response::{ApiResponse, Meta},
};

pub trait CatalogEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Form: Validate + Serialize + DeserializeOwned + Send + Sync;

    /// Backend collection path.
    const COLLECTION: &'static str;
    /// Singular name used in user-facing messages.
    const LABEL: &'static str;

    fn id(&self) -> Uuid;
    /// Text the admin search box matches against.
    fn search_key(&self) -> String;
    fn to_form(&self) -> Self::Form;
}

impl CatalogEntity for Color {
    type Form = ColorForm;
    const COLLECTION: &'static str = paths::COLORS;
    const LABEL: &'static str = "color";

    fn id(&self) -> Uuid {
        self.id
    }
    fn search_key(&self) -> String {
        self.name.clone()
    }
    fn to_form(&self) -> ColorForm {
        ColorForm {
            name: self.name.clone(),
            hex_code: self.hex_code.clone(),
        }
    }
}

impl CatalogEntity for Brand {
    type Form = BrandForm;
    const COLLECTION: &'static str = paths::BRANDS;
    const LABEL: &'static str = "brand";

    fn id(&self) -> Uuid {
        self.id
    }
    fn search_key(&self) -> String {
        self.name.clone()
    }
    fn to_form(&self) -> BrandForm {
        BrandForm {
            name: self.name.clone(),
            logo: self.logo.clone(),
            founding: self.founding,
            holding_id: Some(self.holding_id),
        }
    }
}

impl CatalogEntity for Holding {
    type Form = HoldingForm;
    const COLLECTION: &'static str = paths::HOLDINGS;
    const LABEL: &'static str = "holding";

    fn id(&self) -> Uuid {
        self.id
    }
    fn search_key(&self) -> String {
        self.name.clone()
    }
    fn to_form(&self) -> HoldingForm {
        HoldingForm {
            name: self.name.clone(),
            logo: self.logo.clone(),
            founding: self.founding,
        }
    }
}

impl CatalogEntity for VehicleType {
    type Form = TypeForm;
    const COLLECTION: &'static str = paths::TYPES;
    const LABEL: &'static str = "type";

    fn id(&self) -> Uuid {
        self.id
    }
    fn search_key(&self) -> String {
        self.kind.clone()
    }
    fn to_form(&self) -> TypeForm {
        TypeForm {
            kind: self.kind.clone(),
        }
    }
}

impl CatalogEntity for Engine {
    type Form = EngineForm;
    const COLLECTION: &'static str = paths::ENGINES;
    const LABEL: &'static str = "engine";

    fn id(&self) -> Uuid {
        self.id
    }
    fn search_key(&self) -> String {
        self.engine_type.clone()
    }
    fn to_form(&self) -> EngineForm {
        EngineForm {
            engine_type: self.engine_type.clone(),
        }
    }
}

impl CatalogEntity for Fuel {
    type Form = FuelForm;
    const COLLECTION: &'static str = paths::FUELS;
    const LABEL: &'static str = "fuel";

    fn id(&self) -> Uuid {
        self.id
    }
    fn search_key(&self) -> String {
        self.fuel_type.clone()
    }
    fn to_form(&self) -> FuelForm {
        FuelForm {
            fuel_type: self.fuel_type.clone(),
        }
    }
}

impl CatalogEntity for Doors {
    type Form = DoorsForm;
    const COLLECTION: &'static str = paths::DOORS;
    const LABEL: &'static str = "doors";

    fn id(&self) -> Uuid {
        self.id
    }
    fn search_key(&self) -> String {
        self.quantity.to_string()
    }
    fn to_form(&self) -> DoorsForm {
        DoorsForm {
            quantity: self.quantity,
        }
    }
}

impl CatalogEntity for Seats {
    type Form = SeatsForm;
    const COLLECTION: &'static str = paths::SEATS;
    const LABEL: &'static str = "seats";

    fn id(&self) -> Uuid {
        self.id
    }
    fn search_key(&self) -> String {
        self.quantity.to_string()
    }
    fn to_form(&self) -> SeatsForm {
        SeatsForm {
            quantity: self.quantity,
        }
    }
}

pub fn invalid_form<E: CatalogEntity>() -> AppError {
    AppError::Validation(format!(
        "Please fill in all {} fields correctly.",
        E::LABEL
    ))
}

/// Deserializes and validates a raw form body. Never touches the backend.
pub fn parse_form<E: CatalogEntity>(body: Value) -> AppResult<E::Form> {
    let form: E::Form = serde_json::from_value(body).map_err(|err| {
        tracing::debug!(entity = E::LABEL, error = %err, "malformed form");
        invalid_form::<E>()
    })?;
    form.validate().map_err(|err| {
        tracing::debug!(entity = E::LABEL, error = %err, "form rejected");
        invalid_form::<E>()
    })?;
    Ok(form)
}

/// Overlays the present, non-null fields of `patch` onto `base`.
fn merge_patch(base: Value, patch: Value) -> Value {
    match (base, patch) {
        (Value::Object(mut base), Value::Object(patch)) => {
            for (key, value) in patch {
                if !value.is_null() {
                    base.insert(key, value);
                }
            }
            Value::Object(base)
        }
        (base, _) => base,
    }
}

fn with_id(id: Uuid, form: Value) -> Value {
    let mut body = match form {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    body.insert("id".to_string(), Value::String(id.to_string()));
    Value::Object(body)
}

fn matches_search(key: &str, search: &str) -> bool {
    key.to_lowercase().contains(&search.to_lowercase())
}

pub async fn list<E: CatalogEntity>(
    api: Api<'_>,
    search: Option<&str>,
) -> AppResult<ApiResponse<Vec<E>>> {
    let items: Vec<E> = api.get(E::COLLECTION).await?;
    let items: Vec<E> = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(search) => items
            .into_iter()
            .filter(|item| matches_search(&item.search_key(), search))
            .collect(),
        None => items,
    };
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success(E::LABEL, items, Some(meta)))
}

pub async fn create<E: CatalogEntity>(
    api: Api<'_>,
    user: &CurrentUser,
    body: Value,
) -> AppResult<ApiResponse<E>> {
    ensure_admin(user)?;
    let form = parse_form::<E>(body)?;
    let created: E = api.post(E::COLLECTION, &form).await?;

    log_audit(
        Some(user.user.id),
        "catalog_create",
        Some(E::LABEL),
        Some(serde_json::json!({ "id": created.id() })),
    );

    Ok(ApiResponse::success(
        format!("{} created", E::LABEL),
        created,
        Some(Meta::empty()),
    ))
}

pub async fn update<E: CatalogEntity>(
    api: Api<'_>,
    user: &CurrentUser,
    id: Uuid,
    patch: Value,
) -> AppResult<ApiResponse<E>> {
    ensure_admin(user)?;
    let path = paths::item(E::COLLECTION, id);
    let existing: E = api.get(&path).await?;

    let base = serde_json::to_value(existing.to_form()).map_err(|e| AppError::Internal(e.into()))?;
    let form = parse_form::<E>(merge_patch(base, patch))?;
    let body = with_id(
        id,
        serde_json::to_value(&form).map_err(|e| AppError::Internal(e.into()))?,
    );
    let updated: E = api.put(&path, &body).await?;

    log_audit(
        Some(user.user.id),
        "catalog_update",
        Some(E::LABEL),
        Some(serde_json::json!({ "id": id })),
    );

    Ok(ApiResponse::success("Updated", updated, Some(Meta::empty())))
}

pub async fn delete<E: CatalogEntity>(
    api: Api<'_>,
    user: &CurrentUser,
    id: Uuid,
) -> AppResult<ApiResponse<Value>> {
    ensure_admin(user)?;
    api.delete(&paths::item(E::COLLECTION, id)).await?;

    log_audit(
        Some(user.user.id),
        "catalog_delete",
        Some(E::LABEL),
        Some(serde_json::json!({ "id": id })),
    );

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn erase<T: Serialize>(response: ApiResponse<T>) -> AppResult<ApiResponse<Value>> {
    let data = response
        .data
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(ApiResponse {
        message: response.message,
        data,
        meta: response.meta,
    })
}

/// Runs `$body` with `$entity` bound to the model type behind `$resource`.
macro_rules! for_resource {
    ($resource:expr, $entity:ident => $body:expr) => {
        match $resource {
            CatalogResource::Colors => {
                type $entity = Color;
                erase($body)
            }
            CatalogResource::Brands => {
                type $entity = Brand;
                erase($body)
            }
            CatalogResource::Holdings => {
                type $entity = Holding;
                erase($body)
            }
            CatalogResource::Types => {
                type $entity = VehicleType;
                erase($body)
            }
            CatalogResource::Engines => {
                type $entity = Engine;
                erase($body)
            }
            CatalogResource::Fuels => {
                type $entity = Fuel;
                erase($body)
            }
            CatalogResource::Doors => {
                type $entity = Doors;
                erase($body)
            }
            CatalogResource::Seats => {
                type $entity = Seats;
                erase($body)
            }
        }
    };
}

pub async fn list_resource(
    api: Api<'_>,
    resource: CatalogResource,
    search: Option<&str>,
) -> AppResult<ApiResponse<Value>> {
    for_resource!(resource, E => list::<E>(api, search).await?)
}

pub async fn create_resource(
    api: Api<'_>,
    user: &CurrentUser,
    resource: CatalogResource,
    body: Value,
) -> AppResult<ApiResponse<Value>> {
    for_resource!(resource, E => create::<E>(api, user, body).await?)
}

pub async fn update_resource(
    api: Api<'_>,
    user: &CurrentUser,
    resource: CatalogResource,
    id: Uuid,
    patch: Value,
) -> AppResult<ApiResponse<Value>> {
    for_resource!(resource, E => update::<E>(api, user, id, patch).await?)
}

pub async fn delete_resource(
    api: Api<'_>,
    user: &CurrentUser,
    resource: CatalogResource,
    id: Uuid,
) -> AppResult<ApiResponse<Value>> {
    for_resource!(resource, E => delete::<E>(api, user, id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_overlays_only_present_fields() {
        let base = serde_json::json!({ "name": "Red", "hexCode": "#ff0000" });
        let patch = serde_json::json!({ "hexCode": "#00ff00", "name": null });
        let merged = merge_patch(base, patch);
        assert_eq!(merged, serde_json::json!({ "name": "Red", "hexCode": "#00ff00" }));
    }

    #[test]
    fn invalid_color_form_is_rejected_with_message() {
        let err = parse_form::<Color>(serde_json::json!({ "name": "Red", "hexCode": "red" }))
            .expect_err("invalid hex");
        assert_eq!(err.to_string(), "Please fill in all color fields correctly.");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_search("Metallic Blue", "blue"));
        assert!(matches_search("5", "5"));
        assert!(!matches_search("Red", "green"));
    }
}
