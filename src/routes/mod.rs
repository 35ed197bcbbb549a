use actix_web::HttpResponse;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde_json::json;

use crate::services::ServiceError;

pub mod api;
pub mod customers;
pub mod main;
pub mod menu;
pub mod orders;
pub mod portal;
pub mod recipes;
pub mod reports;
pub mod waste;

/// Maps a failed service call of a JSON endpoint to its HTTP response.
/// Unexpected errors are logged with `action` for context.
pub(crate) fn json_error(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Conflict => HttpResponse::Conflict().finish(),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({ "error": message })),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn alert_level(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Flash messages as `(content, level)` pairs for pages rendered without a
/// staff session.
pub(crate) fn alerts(flash_messages: &IncomingFlashMessages) -> Vec<(String, &'static str)> {
    flash_messages
        .iter()
        .map(|message| (message.content().to_string(), alert_level(message.level())))
        .collect()
}
