use actix_web::{HttpResponse, Responder, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::catalog::{
    AddCategoryPayload, CategoryTypePayload, EditCategoryPayload, IngredientPayload, UserPayload,
};
use crate::forms::menu::MenuConfigForm;
use crate::repository::DieselRepository;
use crate::routes::json_error;
use crate::services::api::{self as api_service, CategoryTreeQuery, IngredientsQuery};
use crate::services::menu as menu_service;

#[get("/category-tree")]
/// Return the category tree of the user's hub, optionally limited to one
/// category type.
///
/// Users without the role stored in `crate::SERVICE_ACCESS_ROLE` receive a `401 Unauthorized` response.
pub async fn api_category_tree(
    params: web::Query<CategoryTreeQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::load_category_tree(repo.get_ref(), &user, params.0) {
        Ok(tree) => HttpResponse::Ok().json(tree),
        Err(err) => json_error(err, "load the category tree"),
    }
}

#[post("/category-tree")]
pub async fn api_add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<AddCategoryPayload>,
) -> impl Responder {
    match api_service::create_category(repo.get_ref(), &user, payload) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => json_error(err, "create category"),
    }
}

#[put("/category-tree")]
pub async fn api_edit_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<EditCategoryPayload>,
) -> impl Responder {
    match api_service::update_category(repo.get_ref(), &user, payload) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => json_error(err, "update category"),
    }
}

#[get("/category-types")]
pub async fn api_category_types(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_category_types(repo.get_ref(), &user) {
        Ok(types) => HttpResponse::Ok().json(types),
        Err(err) => json_error(err, "list category types"),
    }
}

#[post("/category-types")]
pub async fn api_add_category_type(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<CategoryTypePayload>,
) -> impl Responder {
    match api_service::create_category_type(repo.get_ref(), &user, payload) {
        Ok(category_type) => HttpResponse::Created().json(category_type),
        Err(err) => json_error(err, "create category type"),
    }
}

#[put("/category-types")]
pub async fn api_edit_category_type(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<CategoryTypePayload>,
) -> impl Responder {
    match api_service::update_category_type(repo.get_ref(), &user, payload) {
        Ok(category_type) => HttpResponse::Ok().json(category_type),
        Err(err) => json_error(err, "update category type"),
    }
}

#[get("/ingredients")]
/// Return a page of ingredients with optional search.
pub async fn api_ingredients(
    params: web::Query<IngredientsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_ingredients(repo.get_ref(), &user, params.0) {
        Ok(ingredients) => HttpResponse::Ok().json(ingredients),
        Err(err) => json_error(err, "list ingredients"),
    }
}

#[post("/ingredients")]
pub async fn api_add_ingredient(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<IngredientPayload>,
) -> impl Responder {
    match api_service::create_ingredient(repo.get_ref(), &user, payload) {
        Ok(ingredient) => HttpResponse::Created().json(ingredient),
        Err(err) => json_error(err, "create ingredient"),
    }
}

#[put("/ingredients")]
pub async fn api_edit_ingredient(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<IngredientPayload>,
) -> impl Responder {
    match api_service::update_ingredient(repo.get_ref(), &user, payload) {
        Ok(ingredient) => HttpResponse::Ok().json(ingredient),
        Err(err) => json_error(err, "update ingredient"),
    }
}

#[get("/user")]
pub async fn api_user(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match api_service::load_current_user(repo.get_ref(), &user) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => json_error(err, "load user"),
    }
}

#[post("/user")]
/// Create the local profile of the signed-in user if it is missing.
pub async fn api_create_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::load_current_user(repo.get_ref(), &user) {
        Ok(profile) => HttpResponse::Created().json(profile),
        Err(err) => json_error(err, "create user"),
    }
}

#[put("/user")]
pub async fn api_edit_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<UserPayload>,
) -> impl Responder {
    match api_service::update_current_user(repo.get_ref(), &user, payload) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(err) => json_error(err, "update user"),
    }
}

#[get("/menu-config")]
pub async fn api_menu_config(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match menu_service::load_menu_config(repo.get_ref(), &user) {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(err) => json_error(err, "load menu config"),
    }
}

#[put("/menu-config")]
/// Replace the menu configuration document of the user's hub.
pub async fn api_save_menu_config(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<MenuConfigForm>,
) -> impl Responder {
    match menu_service::save_menu_config(repo.get_ref(), &user, form) {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(err) => json_error(err, "save menu config"),
    }
}
