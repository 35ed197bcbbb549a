use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::customers::InviteCustomerForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::orders::CustomerOrdersQuery;
use crate::services::{ServiceError, orders as orders_service, portal as portal_service};

#[get("/customers/{customer_id}/orders")]
pub async fn show_customer_orders(
    customer_id: web::Path<i32>,
    params: web::Query<CustomerOrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let customer_id = customer_id.into_inner();

    match orders_service::list_customer_orders(repo.get_ref(), &user, customer_id, params.0) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "customers",
                &server_config.auth_service_url,
            );
            context.insert("customer", &data.customer);
            context.insert("orders", &data.orders);
            render_template(&tera, "customers/orders.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Permissões insuficientes.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Cliente não encontrado.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list orders of customer {customer_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/customers/invite")]
/// Generates a portal link the customer uses to register.
pub async fn invite_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    app_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<InviteCustomerForm>,
) -> impl Responder {
    match portal_service::create_registration_link(
        repo.get_ref(),
        &user,
        form,
        &app_config.portal_base_url,
    ) {
        Ok(link) => {
            FlashMessage::success(format!("Link de cadastro: {}", link.url)).send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Permissões insuficientes.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to create a registration link: {err}");
            FlashMessage::error("Erro ao gerar o link de cadastro.").send();
            redirect("/")
        }
    }
}
