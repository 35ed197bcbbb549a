//! Public customer portal. These pages are reached through the link handed
//! to each customer and carry no staff session.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::routes::{redirect, render_template};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::forms::customers::RegistrationForm;
use crate::forms::orders::PortalOrderForm;
use crate::repository::DieselRepository;
use crate::routes::{alerts, json_error};
use crate::services::portal::PortalView;
use crate::services::{ServiceError, portal as portal_service};

#[derive(Debug, Default, Deserialize)]
pub struct PortalOrdersQuery {
    pub page: Option<usize>,
}

fn portal_context(flash_messages: &IncomingFlashMessages, reference: &str) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &alerts(flash_messages));
    context.insert("reference", reference);
    context
}

fn not_found(tera: &Tera, flash_messages: &IncomingFlashMessages, reference: &str) -> HttpResponse {
    let context = portal_context(flash_messages, reference);
    match tera.render("portal/not_found.html", &context) {
        Ok(body) => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render portal/not_found.html: {err}");
            HttpResponse::NotFound().finish()
        }
    }
}

#[get("/portal/{reference}")]
pub async fn show_portal(
    reference: web::Path<String>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let reference = reference.into_inner();

    match portal_service::load_portal(repo.get_ref(), &reference) {
        Ok(PortalView::Menu(portal)) => {
            let mut context = portal_context(&flash_messages, &reference);
            context.insert("customer", &portal.customer);
            context.insert("menu", &portal.menu);
            context.insert("recipes", &portal.recipes);
            render_template(&tera, "portal/index.html", &context)
        }
        Ok(PortalView::RegistrationRequired { reference, .. }) => {
            redirect(&format!("/portal/{reference}/cadastro"))
        }
        Err(ServiceError::NotFound) => not_found(&tera, &flash_messages, &reference),
        Err(err) => {
            log::error!("Failed to load portal {reference}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/portal/{reference}/cadastro")]
pub async fn show_registration(
    reference: web::Path<String>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let reference = reference.into_inner();

    match portal_service::load_portal(repo.get_ref(), &reference) {
        Ok(PortalView::RegistrationRequired { customer, .. }) => {
            let mut context = portal_context(&flash_messages, &reference);
            context.insert("customer", &customer);
            render_template(&tera, "portal/register.html", &context)
        }
        Ok(PortalView::Menu(_)) => redirect(&format!("/portal/{reference}")),
        Err(ServiceError::NotFound) => not_found(&tera, &flash_messages, &reference),
        Err(err) => {
            log::error!("Failed to load registration of {reference}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/portal/{reference}/cadastro")]
/// Completes the registration and sends the customer to their menu.
pub async fn submit_registration(
    reference: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RegistrationForm>,
) -> impl Responder {
    let reference = reference.into_inner();

    match portal_service::complete_registration(repo.get_ref(), &reference, form) {
        Ok(customer) => {
            FlashMessage::success("Cadastro concluído.").send();
            redirect(&format!("/portal/{}", customer.public_id))
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/portal/{reference}/cadastro"))
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::warning("Este cadastro já foi concluído.").send();
            redirect(&format!("/portal/{reference}"))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to complete registration of {reference}: {err}");
            FlashMessage::error("Erro ao salvar o cadastro.").send();
            redirect(&format!("/portal/{reference}/cadastro"))
        }
    }
}

#[get("/portal/{reference}/orders")]
pub async fn show_portal_orders(
    reference: web::Path<String>,
    params: web::Query<PortalOrdersQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let reference = reference.into_inner();
    let page = params.page.unwrap_or(1);

    match portal_service::load_portal_orders(repo.get_ref(), &reference, page) {
        Ok(data) => {
            let mut context = portal_context(&flash_messages, &reference);
            context.insert("customer", &data.customer);
            context.insert("orders", &data.orders);
            render_template(&tera, "portal/orders.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(&format!("/portal/{reference}/cadastro")),
        Err(ServiceError::NotFound) => not_found(&tera, &flash_messages, &reference),
        Err(err) => {
            log::error!("Failed to list portal orders of {reference}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/portal/{reference}/orders")]
/// Stores the order a customer submits for one day of the week.
pub async fn submit_portal_order(
    reference: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PortalOrderForm>,
) -> impl Responder {
    let reference = reference.into_inner();

    match portal_service::save_portal_order(repo.get_ref(), &reference, form) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => json_error(err, "save portal order"),
    }
}
