//! Domain records and the pure calculators of the kitchen service.

pub mod acceptance;
pub mod autosave;
pub mod category;
pub mod customer;
pub mod ingredient;
pub mod menu_config;
pub mod order;
pub mod quantity;
pub mod recipe;
pub mod registration_token;
pub mod user;
pub mod waste;
pub mod week;
