pub mod auth;
pub mod catalog;
pub mod purchases;
pub mod sell;
pub mod vehicles;
