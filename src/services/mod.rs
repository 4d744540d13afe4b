pub mod aggregator;
pub mod auth_service;
pub mod catalog_service;
pub mod filter;
pub mod purchase_service;
pub mod sell_service;
pub mod vehicle_service;
