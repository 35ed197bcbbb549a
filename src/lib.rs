use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::api::{
    api_add_category, api_add_category_type, api_add_ingredient, api_category_tree,
    api_category_types, api_create_user, api_edit_category, api_edit_category_type,
    api_edit_ingredient, api_edit_user, api_ingredients, api_menu_config, api_save_menu_config,
    api_user,
};
use crate::routes::customers::{invite_customer, show_customer_orders};
use crate::routes::main::show_index;
use crate::routes::menu::{show_menu, toggle_menu_day};
use crate::routes::orders::{save_order, show_order_settlement};
use crate::routes::portal::{
    show_portal, show_portal_orders, show_registration, submit_portal_order, submit_registration,
};
use crate::routes::recipes::{save_recipe, show_recipe};
use crate::routes::reports::{show_acceptance_report, show_billing_report};
use crate::routes::waste::save_waste;

pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "cozinha";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let common_config = CommonServerConfig {
        auth_service_url: server_config.auth_service_url.to_string(),
        secret: server_config.secret.clone(),
    };

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(
                web::scope("/api")
                    .service(api_category_tree)
                    .service(api_add_category)
                    .service(api_edit_category)
                    .service(api_category_types)
                    .service(api_add_category_type)
                    .service(api_edit_category_type)
                    .service(api_ingredients)
                    .service(api_add_ingredient)
                    .service(api_edit_ingredient)
                    .service(api_user)
                    .service(api_create_user)
                    .service(api_edit_user)
                    .service(api_menu_config)
                    .service(api_save_menu_config),
            )
            // Customer portal links work without a staff session.
            .service(show_portal)
            .service(show_registration)
            .service(submit_registration)
            .service(show_portal_orders)
            .service(submit_portal_order)
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(show_menu)
                    .service(toggle_menu_day)
                    .service(show_recipe)
                    .service(save_recipe)
                    .service(save_order)
                    .service(show_order_settlement)
                    .service(save_waste)
                    .service(show_customer_orders)
                    .service(invite_customer)
                    .service(show_acceptance_report)
                    .service(show_billing_report)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
