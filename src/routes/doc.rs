use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest, SessionStatus},
        catalog::{
            BrandForm, CatalogResource, ColorForm, DoorsForm, EngineForm, FuelForm, HoldingForm,
            SeatsForm, TypeForm,
        },
        purchases::CreatePurchaseRequest,
        sell::{Listing, SellRequest, SpecsForm, VehicleForm},
        vehicles::{
            FilterOptions, SpecsWithDetails, VehicleFilter, VehicleListing, VehicleWithDetails,
            VehicleWithFullDetails,
        },
    },
    models::{
        Brand, Color, Doors, Engine, Fuel, Holding, Purchase, Role, Seats, Specs, User, Vehicle,
        VehicleType,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, catalog, health, purchases, sell, users, vehicles},
};

struct SessionAddon;

impl Modify for SessionAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "JSESSIONID",
                "Backend session cookie, forwarded as-is",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        auth::register,
        auth::check_session,
        users::current_user,
        users::get_user,
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        sell::my_listings,
        sell::create_listing,
        sell::get_listing,
        sell::update_listing,
        sell::delete_listing,
        catalog::lookup,
        admin::list_entities,
        admin::create_entity,
        admin::update_entity,
        admin::delete_entity,
        purchases::list_purchases,
        purchases::create_purchase,
        purchases::get_purchase,
        purchases::delete_purchase
    ),
    components(
        schemas(
            Role,
            User,
            Vehicle,
            Holding,
            Brand,
            Color,
            VehicleType,
            Engine,
            Fuel,
            Doors,
            Seats,
            Specs,
            Purchase,
            LoginRequest,
            RegisterRequest,
            SessionStatus,
            CatalogResource,
            ColorForm,
            BrandForm,
            HoldingForm,
            TypeForm,
            EngineForm,
            FuelForm,
            DoorsForm,
            SeatsForm,
            VehicleForm,
            SpecsForm,
            SellRequest,
            Listing,
            CreatePurchaseRequest,
            SpecsWithDetails,
            VehicleWithDetails,
            VehicleWithFullDetails,
            VehicleFilter,
            FilterOptions,
            VehicleListing,
            Meta,
            ApiResponse<VehicleListing>,
            ApiResponse<VehicleWithFullDetails>,
            ApiResponse<Listing>,
            ApiResponse<User>
        )
    ),
    security(
        ("session_cookie" = [])
    ),
    modifiers(&SessionAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Login, logout, registration and session check"),
        (name = "Users", description = "User lookups"),
        (name = "Vehicles", description = "Aggregated and filtered vehicle listing"),
        (name = "Sell", description = "Seller listings"),
        (name = "Catalog", description = "Read-only reference data"),
        (name = "Admin", description = "Reference data management"),
        (name = "Purchases", description = "Purchase endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
