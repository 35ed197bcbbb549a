use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::repository::DieselRepository;
use crate::services::{ServiceError, menu as menu_service};

#[get("/menu")]
pub async fn show_menu(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match menu_service::load_menu_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "menu",
                &server_config.auth_service_url,
            );
            context.insert("config", &data.config);
            context.insert("menu", &data.menu);
            context.insert("categories", &data.categories);
            render_template(&tera, "menu/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Permissões insuficientes.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load the menu: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/menu/days/{day}/toggle")]
/// Opens or closes a weekday for portal orders.
pub async fn toggle_menu_day(
    day: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match menu_service::toggle_available_day(repo.get_ref(), &user, day.into_inner()) {
        Ok(toggle) if toggle.changed => {
            FlashMessage::success("Dias disponíveis atualizados.").send();
            redirect("/menu")
        }
        Ok(_) => {
            FlashMessage::warning("Pelo menos um dia precisa continuar disponível.").send();
            redirect("/menu")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Permissões insuficientes.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/menu")
        }
        Err(err) => {
            log::error!("Failed to toggle a menu day: {err}");
            FlashMessage::error("Erro ao atualizar os dias disponíveis.").send();
            redirect("/menu")
        }
    }
}
