pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod api;
pub mod main;
pub mod menu;
pub mod orders;
pub mod portal;
pub mod recipes;
pub mod reports;
pub mod waste;
