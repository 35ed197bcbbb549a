//! Operations behind the JSON endpoints used by the catalog editors.

use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::category::{Category, CategoryListQuery, CategoryTreeNode, CategoryType};
use crate::domain::ingredient::{Ingredient, IngredientListQuery};
use crate::domain::user::{NewUser, User};
use crate::forms::catalog::{
    AddCategoryPayload, CategoryTypePayload, EditCategoryPayload, IngredientPayload, UserPayload,
};
use crate::repository::{
    CategoryReader, CategoryTypeReader, CategoryTypeWriter, CategoryWriter, IngredientReader,
    IngredientWriter, UserReader, UserWriter,
};
use crate::services::{ServiceError, ServiceResult};

fn ensure_role(user: &AuthenticatedUser) -> ServiceResult<()> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryTreeQuery {
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

fn build_category_tree(categories: &[Category]) -> Vec<CategoryTreeNode> {
    let mut children_by_parent: HashMap<Option<i32>, Vec<&Category>> = HashMap::new();

    for category in categories {
        children_by_parent
            .entry(category.parent_id)
            .or_default()
            .push(category);
    }

    for children in children_by_parent.values_mut() {
        children.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));
    }

    fn build_branch(
        parent_id: Option<i32>,
        grouped: &HashMap<Option<i32>, Vec<&Category>>,
    ) -> Vec<CategoryTreeNode> {
        match grouped.get(&parent_id) {
            Some(children) => children
                .iter()
                .map(|category| {
                    let sub_tree = build_branch(Some(category.id), grouped);
                    CategoryTreeNode::new((*category).clone()).with_children(sub_tree)
                })
                .collect(),
            None => Vec::new(),
        }
    }

    build_branch(None, &children_by_parent)
}

/// Categories of the user's hub as a tree, inactive ones included.
pub fn load_category_tree<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CategoryTreeQuery,
) -> ServiceResult<Vec<CategoryTreeNode>>
where
    R: CategoryReader + ?Sized,
{
    ensure_role(user)?;

    let mut list_query = CategoryListQuery::new(user.hub_id).include_inactive();
    if let Some(category_type) = query.category_type.filter(|value| !value.is_empty()) {
        list_query = list_query.category_type(category_type);
    }

    let categories = repo
        .list_categories(list_query)
        .map_err(ServiceError::from)?;

    Ok(build_category_tree(&categories))
}

/// Creates a category, one level below its parent when one is given.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: AddCategoryPayload,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    ensure_role(user)?;

    let parent_id = payload.parent_id;
    let mut new_category = payload
        .into_new_category(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(parent_id) = parent_id {
        let parent = repo
            .get_category_by_id(parent_id, user.hub_id)
            .map_err(ServiceError::from)?
            .ok_or(ServiceError::NotFound)?;
        new_category = new_category.with_parent(parent.id, parent.level + 1);
    }

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

pub fn update_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: EditCategoryPayload,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    ensure_role(user)?;

    let category_id = payload.id;
    let updates = payload
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category(category_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

pub fn list_category_types<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<CategoryType>>
where
    R: CategoryTypeReader + ?Sized,
{
    ensure_role(user)?;

    repo.list_category_types(user.hub_id)
        .map_err(ServiceError::from)
}

pub fn create_category_type<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: CategoryTypePayload,
) -> ServiceResult<CategoryType>
where
    R: CategoryTypeWriter + ?Sized,
{
    ensure_role(user)?;

    let new_type = payload
        .into_new_category_type(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category_type(&new_type)
        .map_err(ServiceError::from)
}

pub fn update_category_type<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: CategoryTypePayload,
) -> ServiceResult<CategoryType>
where
    R: CategoryTypeWriter + ?Sized,
{
    ensure_role(user)?;

    let Some(type_id) = payload.id else {
        return Err(ServiceError::Form("O campo id é obrigatório.".to_string()));
    };
    let updates = payload
        .into_new_category_type(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category_type(type_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

#[derive(Debug, Default, Deserialize)]
pub struct IngredientsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    #[serde(default)]
    pub include_inactive: bool,
}

pub fn list_ingredients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IngredientsQuery,
) -> ServiceResult<Paginated<Ingredient>>
where
    R: IngredientReader + ?Sized,
{
    ensure_role(user)?;

    let page = query.page.unwrap_or(1);
    let mut list_query =
        IngredientListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        list_query = list_query.search(term);
    }
    if query.include_inactive {
        list_query = list_query.include_inactive();
    }

    let (total, ingredients) = repo
        .list_ingredients(list_query)
        .map_err(ServiceError::from)?;

    Ok(Paginated::new(
        ingredients,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn create_ingredient<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: IngredientPayload,
) -> ServiceResult<Ingredient>
where
    R: IngredientWriter + ?Sized,
{
    ensure_role(user)?;

    let new_ingredient = payload
        .into_new_ingredient(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_ingredient(&new_ingredient)
        .map_err(ServiceError::from)
}

pub fn update_ingredient<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: IngredientPayload,
) -> ServiceResult<Ingredient>
where
    R: IngredientReader + IngredientWriter + ?Sized,
{
    ensure_role(user)?;

    let Some(ingredient_id) = payload.id else {
        return Err(ServiceError::Form("O campo id é obrigatório.".to_string()));
    };
    let updates = payload
        .into_update_ingredient(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.get_ingredient_by_id(ingredient_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.update_ingredient(ingredient_id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}

/// Local profile of the signed-in user, created on first access.
pub fn load_current_user<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_role(user)?;

    let existing = repo
        .get_user_by_email(&user.email, user.hub_id)
        .map_err(ServiceError::from)?;

    match existing {
        Some(profile) => Ok(profile),
        None => repo
            .create_user(&NewUser::from(user))
            .map_err(ServiceError::from),
    }
}

pub fn update_current_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    payload: UserPayload,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let updates = payload
        .into_update_user()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let profile = load_current_user(repo, user)?;

    repo.update_user(profile.id, user.hub_id, &updates)
        .map_err(ServiceError::from)
}
