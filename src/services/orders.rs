//! Staff side of orders: saving the order of one customer and day, and the
//! order history of a customer.
//!
//! `poll_autosave` and `flush_autosave` are library helpers for editors that
//! keep their own `DebouncedSave` between keystrokes. No HTTP route drives
//! them; the order grid debounces in the browser and posts to `save_order`.

use std::collections::HashMap;
use std::time::Instant;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::autosave::DebouncedSave;
use crate::domain::customer::Customer;
use crate::domain::order::{Order, OrderItem, OrderListQuery};
use crate::domain::recipe::{Recipe, RecipeListQuery};
use crate::forms::orders::{OrderPayload, SaveOrderForm};
use crate::repository::{CustomerReader, OrderReader, OrderWriter, RecipeReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters of a customer's order history.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerOrdersQuery {
    pub week: Option<i32>,
    pub year: Option<i32>,
    pub page: Option<usize>,
}

/// Orders of one customer, newest week first.
#[derive(Serialize)]
pub struct CustomerOrders {
    pub customer: Customer,
    pub orders: Paginated<Order>,
}

/// Complete order lines from the recipe catalog: the recipe name is always
/// taken from the catalog and a missing unit price falls back to the sale
/// price. A line pointing at a recipe outside the catalog rejects the whole
/// order.
pub(crate) fn price_items(
    recipes: &[Recipe],
    items: Vec<OrderItem>,
) -> ServiceResult<Vec<OrderItem>> {
    let by_id: HashMap<i32, &Recipe> = recipes.iter().map(|recipe| (recipe.id, recipe)).collect();

    items
        .into_iter()
        .map(|mut item| {
            let Some(recipe) = by_id.get(&item.recipe_id) else {
                return Err(ServiceError::Form(format!(
                    "Receita {} não está disponível para pedidos.",
                    item.recipe_id
                )));
            };
            item.recipe_name = recipe.name.clone();
            if item.unit_price.is_none() {
                item.unit_price = recipe.sale_price;
            }
            Ok(item)
        })
        .collect()
}

/// Order already stored for the customer and day of `payload`, if any.
pub(crate) fn find_order_for_day<R>(
    repo: &R,
    hub_id: i32,
    payload: &OrderPayload,
) -> ServiceResult<Option<Order>>
where
    R: OrderReader + ?Sized,
{
    let query = OrderListQuery::new(hub_id)
        .customer_id(payload.customer_id)
        .week(payload.week_number, payload.year)
        .day_of_week(payload.day_of_week);

    let (_, orders) = repo.list_orders(query).map_err(ServiceError::from)?;
    Ok(orders.into_iter().next())
}

/// Insert the order, or replace the one stored for the same customer and
/// day. Totals are derived from the lines on both paths.
pub(crate) fn upsert_order<R>(
    repo: &R,
    hub_id: i32,
    existing: Option<&Order>,
    payload: &OrderPayload,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    match existing {
        Some(order) => repo
            .update_order(order.id, hub_id, &payload.to_update_order())
            .map_err(ServiceError::from),
        None => repo
            .create_order(&payload.to_new_order(hub_id))
            .map_err(ServiceError::from),
    }
}

fn load_recipes<R>(repo: &R, query: RecipeListQuery) -> ServiceResult<Vec<Recipe>>
where
    R: RecipeReader + ?Sized,
{
    repo.list_recipes(query)
        .map(|(_, recipes)| recipes)
        .map_err(ServiceError::from)
}

/// Active recipes, the ones customers may order.
pub(crate) fn list_catalog<R>(repo: &R, hub_id: i32) -> ServiceResult<Vec<Recipe>>
where
    R: RecipeReader + ?Sized,
{
    load_recipes(repo, RecipeListQuery::new(hub_id))
}

/// Every recipe of the hub. Staff still edit orders holding recipes that
/// were deactivated after the order was placed.
fn list_staff_catalog<R>(repo: &R, hub_id: i32) -> ServiceResult<Vec<Recipe>>
where
    R: RecipeReader + ?Sized,
{
    load_recipes(repo, RecipeListQuery::new(hub_id).include_inactive())
}

/// Saves the order of one customer and day from the staff order grid.
pub fn save_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveOrderForm,
) -> ServiceResult<Order>
where
    R: CustomerReader + RecipeReader + OrderReader + OrderWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut payload = form
        .into_payload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.get_customer_by_id(payload.customer_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let recipes = list_staff_catalog(repo, user.hub_id)?;
    payload.items = price_items(&recipes, payload.items)?;

    let existing = find_order_for_day(repo, user.hub_id, &payload)?;
    upsert_order(repo, user.hub_id, existing.as_ref(), &payload)
}

/// Lists the orders of one customer of the user's hub.
pub fn list_customer_orders<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
    query: CustomerOrdersQuery,
) -> ServiceResult<CustomerOrders>
where
    R: CustomerReader + OrderReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let customer = repo
        .get_customer_by_id(customer_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let page = query.page.unwrap_or(1);
    let mut list_query = OrderListQuery::new(user.hub_id)
        .customer_id(customer.id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let (Some(week), Some(year)) = (query.week, query.year) {
        list_query = list_query.week(week, year);
    }

    let (total, orders) = repo.list_orders(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(CustomerOrders {
        customer,
        orders: Paginated::new(orders, page, total_pages),
    })
}

fn run_autosave<R>(
    repo: &R,
    user: &AuthenticatedUser,
    autosave: &mut DebouncedSave<SaveOrderForm>,
    value: Option<SaveOrderForm>,
    now: Instant,
) -> ServiceResult<Option<Order>>
where
    R: CustomerReader + RecipeReader + OrderReader + OrderWriter + ?Sized,
{
    let Some(form) = value else {
        return Ok(None);
    };

    let result = save_order(repo, user, form);
    autosave.complete(result.as_ref().map(|_| ()), now);
    if let Err(err) = &result {
        log::warn!("Autosave of order failed, keeping the edit: {err}");
    }
    result.map(Some)
}

/// Saves the pending order edit once its debounce deadline has passed.
pub fn poll_autosave<R>(
    repo: &R,
    user: &AuthenticatedUser,
    autosave: &mut DebouncedSave<SaveOrderForm>,
    now: Instant,
) -> ServiceResult<Option<Order>>
where
    R: CustomerReader + RecipeReader + OrderReader + OrderWriter + ?Sized,
{
    let value = autosave.poll(now);
    run_autosave(repo, user, autosave, value, now)
}

/// Saves the pending order edit immediately, e.g. when the editor closes or
/// to retry after a failure.
pub fn flush_autosave<R>(
    repo: &R,
    user: &AuthenticatedUser,
    autosave: &mut DebouncedSave<SaveOrderForm>,
) -> ServiceResult<Option<Order>>
where
    R: CustomerReader + RecipeReader + OrderReader + OrderWriter + ?Sized,
{
    let value = autosave.flush();
    run_autosave(repo, user, autosave, value, Instant::now())
}
