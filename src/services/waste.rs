use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::order::Order;
use crate::domain::quantity::format_currency;
use crate::domain::waste::{ReturnDepreciation, WasteListQuery, WasteRecord};
use crate::forms::waste::SaveWasteForm;
use crate::repository::{CustomerReader, OrderReader, WasteReader, WasteWriter};
use crate::services::{ServiceError, ServiceResult};

/// Order value after deducting depreciation on the food the customer sent
/// back.
#[derive(Debug, Serialize)]
pub struct OrderSettlement {
    pub order: Order,
    pub waste: Option<WasteRecord>,
    pub depreciation: ReturnDepreciation,
    pub final_value_label: String,
}

/// Stores the leftovers of one customer and day, replacing earlier entries.
pub fn save_waste_record<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveWasteForm,
) -> ServiceResult<WasteRecord>
where
    R: CustomerReader + WasteWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let record = form
        .into_new_waste_record(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.get_customer_by_id(record.customer_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.save_waste_record(&record).map_err(ServiceError::from)
}

/// Waste recorded for the same customer and day as `order`.
pub(crate) fn waste_for_order<R>(repo: &R, order: &Order) -> ServiceResult<Option<WasteRecord>>
where
    R: WasteReader + ?Sized,
{
    let query = WasteListQuery::new(order.hub_id)
        .customer_id(order.customer_id)
        .week(order.week_number, order.year)
        .day_of_week(order.day_of_week);

    let records = repo.list_waste_records(query).map_err(ServiceError::from)?;
    Ok(records.into_iter().find(|record| record.matches_order(order)))
}

/// Settles one order against the returns recorded for it.
pub fn load_order_settlement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
) -> ServiceResult<OrderSettlement>
where
    R: OrderReader + WasteReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let order = repo
        .get_order_by_id(order_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let waste = waste_for_order(repo, &order)?;
    let depreciation = ReturnDepreciation::for_order(&order, waste.as_ref());

    Ok(OrderSettlement {
        final_value_label: format_currency(depreciation.final_value),
        order,
        waste,
        depreciation,
    })
}
