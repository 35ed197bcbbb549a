use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::recipes::SaveRecipeForm;
use crate::repository::DieselRepository;
use crate::routes::json_error;
use crate::services::recipes::RecipeCostQuery;
use crate::services::{ServiceError, recipes as recipes_service};

#[get("/recipes/{recipe_id}")]
/// Recipe sheet with costs scaled to the requested yield.
pub async fn show_recipe(
    recipe_id: web::Path<i32>,
    params: web::Query<RecipeCostQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let recipe_id = recipe_id.into_inner();

    match recipes_service::load_recipe_cost(repo.get_ref(), &user, recipe_id, params.0) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "recipes",
                &server_config.auth_service_url,
            );
            context.insert("recipe", &data.recipe);
            context.insert("factor", &data.factor);
            context.insert("totals", &data.totals);
            context.insert("lines", &data.lines);
            context.insert("total_cost", &data.total_cost_label);
            context.insert("cost_per_kg", &data.cost_per_kg_label);
            render_template(&tera, "recipes/show.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Permissões insuficientes.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Receita não encontrada.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load recipe {recipe_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/recipes/save")]
pub async fn save_recipe(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveRecipeForm>,
) -> impl Responder {
    match recipes_service::save_recipe(repo.get_ref(), &user, form) {
        Ok(recipe) => HttpResponse::Ok().json(recipe),
        Err(err) => json_error(err, "save recipe"),
    }
}
