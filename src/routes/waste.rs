use actix_web::{HttpResponse, Responder, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::waste::SaveWasteForm;
use crate::repository::DieselRepository;
use crate::routes::json_error;
use crate::services::waste as waste_service;

#[post("/waste/save")]
/// Records the food a customer sent back for one delivery day.
pub async fn save_waste(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveWasteForm>,
) -> impl Responder {
    match waste_service::save_waste_record(repo.get_ref(), &user, form) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => json_error(err, "save waste record"),
    }
}
