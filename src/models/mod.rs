//! Diesel row structs and their conversions to and from domain records.

use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod category;
pub mod config;
pub mod customer;
pub mod ingredient;
pub mod menu_config;
pub mod order;
pub mod recipe;
pub mod registration_token;
pub mod user;
pub mod waste;

/// Decode a JSON text column.
pub(crate) fn decode_document<T: DeserializeOwned>(raw: &str) -> RepositoryResult<T> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::ValidationError(format!("malformed stored document: {e}")))
}

/// Encode a value for a JSON text column.
pub(crate) fn encode_document<T: Serialize + ?Sized>(value: &T) -> RepositoryResult<String> {
    serde_json::to_string(value)
        .map_err(|e| RepositoryError::ValidationError(format!("unencodable document: {e}")))
}
