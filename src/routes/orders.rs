use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::orders::SaveOrderForm;
use crate::repository::DieselRepository;
use crate::routes::json_error;
use crate::services::{ServiceError, orders as orders_service, waste as waste_service};

#[post("/orders/save")]
/// Creates the order of a customer for a day or updates the existing one.
pub async fn save_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveOrderForm>,
) -> impl Responder {
    match orders_service::save_order(repo.get_ref(), &user, form) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => json_error(err, "save order"),
    }
}

#[get("/orders/{order_id}/settlement")]
pub async fn show_order_settlement(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let order_id = order_id.into_inner();

    match waste_service::load_order_settlement(repo.get_ref(), &user, order_id) {
        Ok(settlement) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("settlement", &settlement);
            render_template(&tera, "orders/settlement.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Permissões insuficientes.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Pedido não encontrado.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load settlement of order {order_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
