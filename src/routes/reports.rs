use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::repository::DieselRepository;
use crate::services::reports::{AcceptanceQuery, BillingQuery};
use crate::services::{ServiceError, reports as reports_service};

#[get("/reports/acceptance")]
pub async fn show_acceptance_report(
    params: web::Query<AcceptanceQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = chrono::Local::now().date_naive();

    match reports_service::load_acceptance_report(repo.get_ref(), &user, params.0, today) {
        Ok(report) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "reports",
                &server_config.auth_service_url,
            );
            context.insert("customers", &report.customers);
            context.insert("customer", &report.customer);
            context.insert("period", &report.period);
            context.insert("days", &report.days);
            render_template(&tera, "reports/acceptance.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Permissões insuficientes.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to build the acceptance report: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/reports/billing")]
/// Weekly billing per customer, net of returned food.
pub async fn show_billing_report(
    params: web::Query<BillingQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = chrono::Local::now().date_naive();

    match reports_service::load_weekly_billing(repo.get_ref(), &user, params.0, today) {
        Ok(billing) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "reports",
                &server_config.auth_service_url,
            );
            context.insert("billing", &billing);
            render_template(&tera, "reports/billing.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Permissões insuficientes.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/reports/billing")
        }
        Err(err) => {
            log::error!("Failed to build weekly billing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
