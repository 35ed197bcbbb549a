use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::customer::CustomerListQuery;
use crate::domain::order::{Order, OrderListQuery, OrderStatus};
use crate::domain::quantity::format_currency;
use crate::domain::week::{WORKING_DAYS, iso_week_date, iso_week_of};
use crate::repository::{CustomerReader, OrderReader};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the index page service.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// ISO week to show; defaults to the current one.
    pub week: Option<i32>,
    pub year: Option<i32>,
}

/// Week reference used for the previous/next links.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct WeekRef {
    pub week: i32,
    pub year: i32,
}

impl WeekRef {
    fn monday(self) -> Option<NaiveDate> {
        iso_week_date(self.year, self.week, 1)
    }

    fn shifted(self, days: i64) -> Option<Self> {
        let monday = self.monday()?;
        let date = if days >= 0 {
            monday.checked_add_days(Days::new(days.unsigned_abs()))?
        } else {
            monday.checked_sub_days(Days::new(days.unsigned_abs()))?
        };
        let (week, year) = iso_week_of(date);
        Some(Self { week, year })
    }
}

/// Order row of the weekly overview.
#[derive(Debug, Serialize)]
pub struct OrderRow {
    pub order: Order,
    pub customer_name: String,
    pub total_label: String,
}

/// Orders of one working day.
#[derive(Debug, Serialize)]
pub struct DayOrders {
    pub day_of_week: i32,
    pub date: Option<NaiveDate>,
    pub orders: Vec<OrderRow>,
    pub total_amount: f64,
}

/// Data required to render the main index template.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    pub week: WeekRef,
    pub previous: Option<WeekRef>,
    pub next: Option<WeekRef>,
    pub days: Vec<DayOrders>,
    /// Value of the week, cancelled orders excluded.
    pub week_total: f64,
    pub week_total_label: String,
}

/// Loads the orders of one ISO week grouped by working day.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
    today: NaiveDate,
) -> ServiceResult<IndexPageData>
where
    R: OrderReader + CustomerReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (current_week, current_year) = iso_week_of(today);
    let week = WeekRef {
        week: query.week.unwrap_or(current_week),
        year: query.year.unwrap_or(current_year),
    };
    if week.monday().is_none() {
        return Err(ServiceError::Form(format!(
            "Semana {} de {} não existe.",
            week.week, week.year
        )));
    }

    let (_, orders) = repo
        .list_orders(OrderListQuery::new(user.hub_id).week(week.week, week.year))
        .map_err(ServiceError::from)?;

    let (_, customers) = repo
        .list_customers(CustomerListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;
    let names: HashMap<i32, String> = customers
        .into_iter()
        .map(|customer| (customer.id, customer.name))
        .collect();

    let mut by_day: HashMap<i32, Vec<OrderRow>> = HashMap::new();
    for order in orders {
        let customer_name = names
            .get(&order.customer_id)
            .cloned()
            .unwrap_or_else(|| format!("Cliente #{}", order.customer_id));
        by_day.entry(order.day_of_week).or_default().push(OrderRow {
            total_label: format_currency(order.total_amount),
            customer_name,
            order,
        });
    }

    let mut week_total = 0.0;
    let days = WORKING_DAYS
        .iter()
        .map(|day| {
            let mut orders = by_day.remove(day).unwrap_or_default();
            orders.sort_by(|a, b| a.customer_name.cmp(&b.customer_name));
            let total_amount: f64 = orders
                .iter()
                .filter(|row| row.order.status != OrderStatus::Cancelled)
                .map(|row| row.order.total_amount)
                .sum();
            week_total += total_amount;
            DayOrders {
                day_of_week: *day,
                date: iso_week_date(week.year, week.week, *day),
                orders,
                total_amount,
            }
        })
        .collect();

    Ok(IndexPageData {
        previous: week.shifted(-7),
        next: week.shifted(7),
        week,
        days,
        week_total,
        week_total_label: format_currency(week_total),
    })
}
