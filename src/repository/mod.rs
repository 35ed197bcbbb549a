use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::category::{
    Category, CategoryListQuery, CategoryType, NewCategory, NewCategoryType, UpdateCategory,
};
use crate::domain::customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer};
use crate::domain::ingredient::{Ingredient, IngredientListQuery, NewIngredient, UpdateIngredient};
use crate::domain::menu_config::MenuConfig;
use crate::domain::order::{NewOrder, Order, OrderListQuery, UpdateOrder};
use crate::domain::recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe};
use crate::domain::registration_token::{NewRegistrationToken, RegistrationToken};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::domain::waste::{NewWasteRecord, WasteListQuery, WasteRecord};

pub mod category;
pub mod customer;
pub mod ingredient;
pub mod menu_config;
pub mod order;
pub mod recipe;
pub mod registration_token;
pub mod user;
pub mod waste;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the category tree.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over the category tree.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        hub_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

pub trait CategoryTypeReader {
    fn list_category_types(&self, hub_id: i32) -> RepositoryResult<Vec<CategoryType>>;
}

pub trait CategoryTypeWriter {
    fn create_category_type(&self, new_type: &NewCategoryType) -> RepositoryResult<CategoryType>;
    fn update_category_type(
        &self,
        type_id: i32,
        hub_id: i32,
        updates: &NewCategoryType,
    ) -> RepositoryResult<CategoryType>;
}

pub trait IngredientReader {
    fn get_ingredient_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Ingredient>>;
    fn list_ingredients(
        &self,
        query: IngredientListQuery,
    ) -> RepositoryResult<(usize, Vec<Ingredient>)>;
}

pub trait IngredientWriter {
    fn create_ingredient(&self, new_ingredient: &NewIngredient) -> RepositoryResult<Ingredient>;
    fn update_ingredient(
        &self,
        ingredient_id: i32,
        hub_id: i32,
        updates: &UpdateIngredient,
    ) -> RepositoryResult<Ingredient>;
    fn delete_ingredient(&self, ingredient_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

pub trait RecipeReader {
    fn get_recipe_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Recipe>>;
    fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<Recipe>)>;
}

pub trait RecipeWriter {
    fn create_recipe(&self, new_recipe: &NewRecipe) -> RepositoryResult<Recipe>;
    fn update_recipe(
        &self,
        recipe_id: i32,
        hub_id: i32,
        updates: &UpdateRecipe,
    ) -> RepositoryResult<Recipe>;
    fn delete_recipe(&self, recipe_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Customer>>;
    /// Look a customer up by the public id of its portal link. Portal links
    /// carry no hub.
    fn find_customer_by_public_id(&self, public_id: &str) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    /// Update a customer. When `updates` completes the registration, only a
    /// customer still pending registration is matched.
    fn update_customer(
        &self,
        customer_id: i32,
        hub_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
}

pub trait RegistrationTokenReader {
    fn get_registration_token(
        &self,
        hub_id: i32,
        token: &str,
    ) -> RepositoryResult<Option<RegistrationToken>>;
}

pub trait RegistrationTokenWriter {
    fn create_registration_token(
        &self,
        new_token: &NewRegistrationToken,
    ) -> RepositoryResult<RegistrationToken>;
    /// Create the customer and mark the token redeemed in one transaction.
    /// Fails with `NotFound` when the token was never issued or is already
    /// redeemed.
    fn redeem_registration_token(
        &self,
        hub_id: i32,
        token: &str,
        new_customer: &NewCustomer,
    ) -> RepositoryResult<Customer>;
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order(
        &self,
        order_id: i32,
        hub_id: i32,
        updates: &UpdateOrder,
    ) -> RepositoryResult<Order>;
    fn delete_order(&self, order_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

pub trait WasteReader {
    fn list_waste_records(&self, query: WasteListQuery) -> RepositoryResult<Vec<WasteRecord>>;
}

pub trait WasteWriter {
    /// Insert the record or replace the items and notes of the record stored
    /// for the same customer and day.
    fn save_waste_record(&self, record: &NewWasteRecord) -> RepositoryResult<WasteRecord>;
}

pub trait MenuConfigReader {
    /// Configuration of the hub, or the default one when none was saved yet.
    fn get_menu_config(&self, hub_id: i32) -> RepositoryResult<MenuConfig>;
}

pub trait MenuConfigWriter {
    fn save_menu_config(&self, hub_id: i32, config: &MenuConfig) -> RepositoryResult<MenuConfig>;
}

pub trait UserReader {
    fn get_user_by_email(&self, email: &str, hub_id: i32) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, hub_id: i32, updates: &UpdateUser)
    -> RepositoryResult<User>;
}
