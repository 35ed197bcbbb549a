use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::acceptance::{AcceptancePeriod, RecipeAcceptance, aggregate_acceptance};
use crate::domain::customer::{Customer, CustomerListQuery};
use crate::domain::order::{OrderListQuery, OrderStatus};
use crate::domain::quantity::format_currency;
use crate::domain::recipe::RecipeListQuery;
use crate::domain::waste::{ReturnDepreciation, WasteListQuery};
use crate::domain::week::{WORKING_DAYS, iso_week_date, iso_week_of};
use crate::repository::{CustomerReader, OrderReader, RecipeReader, WasteReader};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct AcceptanceQuery {
    pub customer_id: Option<i32>,
    /// One of `7`, `30`, `90` or `all`. Anything else falls back to 30 days.
    pub period: Option<String>,
}

/// Data required to render the acceptance report.
#[derive(Debug, Serialize)]
pub struct AcceptanceReport {
    pub customers: Vec<Customer>,
    pub customer: Option<Customer>,
    pub period: AcceptancePeriod,
    /// Working day (1 to 5) to the acceptance of every recipe sent that day.
    pub days: BTreeMap<i32, Vec<RecipeAcceptance>>,
}

fn empty_days() -> BTreeMap<i32, Vec<RecipeAcceptance>> {
    WORKING_DAYS.iter().map(|day| (*day, Vec::new())).collect()
}

/// Builds the acceptance report of one customer.
///
/// The customer picker is always filled. Failing to load the orders, waste or
/// recipes of the selected customer is logged and yields an empty report.
pub fn load_acceptance_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: AcceptanceQuery,
    today: NaiveDate,
) -> ServiceResult<AcceptanceReport>
where
    R: CustomerReader + OrderReader + WasteReader + RecipeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let period = query
        .period
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();

    let (_, customers) = repo
        .list_customers(CustomerListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;

    let customer = query.customer_id.and_then(|customer_id| {
        customers
            .iter()
            .find(|customer| customer.id == customer_id)
            .cloned()
    });

    let days = match &customer {
        None => empty_days(),
        Some(customer) => {
            let orders = repo.list_orders(OrderListQuery::new(user.hub_id).customer_id(customer.id));
            let waste =
                repo.list_waste_records(WasteListQuery::new(user.hub_id).customer_id(customer.id));
            let recipes = repo.list_recipes(RecipeListQuery::new(user.hub_id).include_inactive());

            match (orders, waste, recipes) {
                (Ok((_, orders)), Ok(waste), Ok((_, recipes))) => {
                    aggregate_acceptance(&orders, &waste, period, customer.id, &recipes, today)
                }
                (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                    log::error!(
                        "Failed to load acceptance data for customer {}: {err}",
                        customer.id
                    );
                    empty_days()
                }
            }
        }
    };

    Ok(AcceptanceReport {
        customers,
        customer,
        period,
        days,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct BillingQuery {
    pub week: Option<i32>,
    pub year: Option<i32>,
}

/// Amount billed to one customer over a week.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BillingRow {
    pub customer_id: i32,
    pub customer_name: String,
    pub order_count: usize,
    pub gross: f64,
    pub depreciation: f64,
    pub net: f64,
    pub net_label: String,
}

#[derive(Debug, Serialize)]
pub struct WeeklyBilling {
    pub week: i32,
    pub year: i32,
    pub rows: Vec<BillingRow>,
    pub gross: f64,
    pub depreciation: f64,
    pub net: f64,
    pub gross_label: String,
    pub depreciation_label: String,
    pub net_label: String,
}

/// Sums the final value of every order of a week per customer, after
/// deducting depreciation on returned food. Cancelled orders are not billed.
pub fn load_weekly_billing<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: BillingQuery,
    today: NaiveDate,
) -> ServiceResult<WeeklyBilling>
where
    R: CustomerReader + OrderReader + WasteReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let (current_week, current_year) = iso_week_of(today);
    let week = query.week.unwrap_or(current_week);
    let year = query.year.unwrap_or(current_year);
    if iso_week_date(year, week, 1).is_none() {
        return Err(ServiceError::Form(format!(
            "Semana {week} de {year} não existe."
        )));
    }

    let (_, orders) = repo
        .list_orders(OrderListQuery::new(user.hub_id).week(week, year))
        .map_err(ServiceError::from)?;
    let waste = repo
        .list_waste_records(WasteListQuery::new(user.hub_id).week(week, year))
        .map_err(ServiceError::from)?;
    let (_, customers) = repo
        .list_customers(CustomerListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;
    let names: HashMap<i32, String> = customers
        .into_iter()
        .map(|customer| (customer.id, customer.name))
        .collect();

    let mut rows: BTreeMap<i32, BillingRow> = BTreeMap::new();
    for order in orders
        .iter()
        .filter(|order| order.status != OrderStatus::Cancelled)
    {
        let record = waste.iter().find(|record| record.matches_order(order));
        let settled = ReturnDepreciation::for_order(order, record);

        let row = rows.entry(order.customer_id).or_insert_with(|| BillingRow {
            customer_id: order.customer_id,
            customer_name: names
                .get(&order.customer_id)
                .cloned()
                .unwrap_or_else(|| format!("Cliente #{}", order.customer_id)),
            order_count: 0,
            gross: 0.0,
            depreciation: 0.0,
            net: 0.0,
            net_label: String::new(),
        });
        row.order_count += 1;
        row.gross += settled.original_total;
        row.depreciation += settled.total_depreciation;
        row.net += settled.final_value;
    }

    let mut rows: Vec<BillingRow> = rows
        .into_values()
        .map(|mut row| {
            row.net_label = format_currency(row.net);
            row
        })
        .collect();
    rows.sort_by(|a, b| a.customer_name.cmp(&b.customer_name));

    let gross: f64 = rows.iter().map(|row| row.gross).sum();
    let depreciation: f64 = rows.iter().map(|row| row.depreciation).sum();
    let net: f64 = rows.iter().map(|row| row.net).sum();

    Ok(WeeklyBilling {
        week,
        year,
        rows,
        gross,
        depreciation,
        net,
        gross_label: format_currency(gross),
        depreciation_label: format_currency(depreciation),
        net_label: format_currency(net),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pushkind_common::repository::errors::RepositoryError;

    use crate::domain::order::{Order, OrderItem};
    use crate::domain::waste::{WasteItem, WasteRecord};
    use crate::repository::mock::MockKitchenRepository;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 8).unwrap_or_default()
    }

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            email: "user@example.com".to_string(),
            hub_id: 9,
            name: "Tester".to_string(),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            exp: 0,
        }
    }

    fn sample_customer(id: i32, name: &str) -> Customer {
        Customer {
            id,
            hub_id: 9,
            public_id: format!("cliente-{id}"),
            name: name.to_string(),
            category: None,
            email: None,
            phone: None,
            document: None,
            billing_address: None,
            pending_registration: false,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_order(id: i32, customer_id: i32, day: i32, quantity: f64, price: f64) -> Order {
        let mut item = OrderItem {
            recipe_id: 1,
            recipe_name: "Arroz".to_string(),
            quantity,
            unit_price: Some(price),
            ..OrderItem::default()
        };
        item.recalculate();
        Order {
            id,
            hub_id: 9,
            customer_id,
            week_number: 10,
            year: 2024,
            day_of_week: day,
            total_items: quantity,
            total_amount: item.total_price,
            items: vec![item],
            total_meals_expected: None,
            status: OrderStatus::Delivered,
            general_notes: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_waste(customer_id: i32, day: i32, wasted: f64, returned: f64) -> WasteRecord {
        WasteRecord {
            id: 1,
            hub_id: 9,
            customer_id,
            week_number: 10,
            year: 2024,
            day_of_week: day,
            items: vec![WasteItem {
                recipe_id: 1,
                waste_quantity: wasted,
                client_returned_quantity: returned,
                ..WasteItem::default()
            }],
            notes: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn acceptance_report_aggregates_selected_customer() {
        let mut repo = MockKitchenRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_customers()
            .times(1)
            .returning(|_| Ok((1, vec![sample_customer(4, "Escola Sol")])));
        repo.expect_list_orders()
            .times(1)
            .withf(|query| query.customer_id == Some(4))
            .returning(|_| {
                Ok((
                    2,
                    vec![
                        sample_order(1, 4, 1, 10.0, 1.0),
                        sample_order(2, 4, 1, 20.0, 1.0),
                    ],
                ))
            });
        repo.expect_list_waste_records()
            .times(1)
            .returning(|_| Ok(vec![sample_waste(4, 1, 3.0, 0.0)]));
        repo.expect_list_recipes()
            .times(1)
            .returning(|_| Ok((0, Vec::new())));

        let query = AcceptanceQuery {
            customer_id: Some(4),
            period: Some("all".to_string()),
        };
        let report = match load_acceptance_report(&repo, &user, query, today()) {
            Ok(report) => report,
            Err(err) => panic!("expected success, got error: {err}"),
        };

        assert_eq!(report.period, AcceptancePeriod::All);
        let monday = &report.days[&1];
        assert_eq!(monday[0].avg_sent, 15.0);
        assert_eq!(monday[0].acceptance, 90.0);
    }

    #[test]
    fn acceptance_report_degrades_to_empty_on_failure() {
        let mut repo = MockKitchenRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_customers()
            .returning(|_| Ok((1, vec![sample_customer(4, "Escola Sol")])));
        repo.expect_list_orders()
            .returning(|_| Err(RepositoryError::DatabaseError("disk I/O error".to_string())));
        repo.expect_list_waste_records().returning(|_| Ok(Vec::new()));
        repo.expect_list_recipes().returning(|_| Ok((0, Vec::new())));

        let query = AcceptanceQuery {
            customer_id: Some(4),
            period: Some("bogus".to_string()),
        };
        let report = load_acceptance_report(&repo, &user, query, today()).expect("report");

        assert_eq!(report.period, AcceptancePeriod::Last30Days);
        assert_eq!(report.days.len(), 5);
        assert!(report.days.values().all(Vec::is_empty));
    }

    #[test]
    fn acceptance_report_without_customer_skips_aggregation() {
        let mut repo = MockKitchenRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_customers()
            .returning(|_| Ok((1, vec![sample_customer(4, "Escola Sol")])));
        repo.expect_list_orders().never();

        let report =
            load_acceptance_report(&repo, &user, AcceptanceQuery::default(), today()).expect("report");

        assert!(report.customer.is_none());
        assert_eq!(report.customers.len(), 1);
    }

    #[test]
    fn weekly_billing_nets_depreciation_per_customer() {
        let mut repo = MockKitchenRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_orders()
            .times(1)
            .withf(|query| query.week_number == Some(10) && query.year == Some(2024))
            .returning(|_| {
                let mut cancelled = sample_order(3, 5, 3, 10.0, 10.0);
                cancelled.status = OrderStatus::Cancelled;
                Ok((
                    3,
                    vec![
                        sample_order(1, 4, 1, 4.0, 10.0),
                        sample_order(2, 4, 2, 2.0, 10.0),
                        cancelled,
                    ],
                ))
            });
        repo.expect_list_waste_records()
            .times(1)
            .returning(|_| Ok(vec![sample_waste(4, 1, 0.0, 2.0)]));
        repo.expect_list_customers().times(1).returning(|_| {
            Ok((
                2,
                vec![sample_customer(4, "Escola Sol"), sample_customer(5, "Creche Lua")],
            ))
        });

        let billing = match load_weekly_billing(&repo, &user, BillingQuery::default(), today()) {
            Ok(billing) => billing,
            Err(err) => panic!("expected success, got error: {err}"),
        };

        assert_eq!(billing.week, 10);
        assert_eq!(billing.rows.len(), 1);
        let row = &billing.rows[0];
        assert_eq!(row.order_count, 2);
        assert_eq!(row.gross, 60.0);
        assert_eq!(row.depreciation, 5.0);
        assert_eq!(row.net, 55.0);
        assert_eq!(billing.net_label, "R$ 55,00");
    }

    #[test]
    fn weekly_billing_requires_role() {
        let repo = MockKitchenRepository::new();
        let user = user_with_roles(&[]);

        assert!(matches!(
            load_weekly_billing(&repo, &user, BillingQuery::default(), today()),
            Err(ServiceError::Unauthorized)
        ));
    }
}
