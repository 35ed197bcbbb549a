//! Per-recipe acceptance of a customer: how much of the food sent on each
//! weekday came back as waste.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::order::Order;
use crate::domain::quantity::round_one_decimal;
use crate::domain::recipe::Recipe;
use crate::domain::waste::WasteRecord;
use crate::domain::week::WORKING_DAYS;

/// Look-back window of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptancePeriod {
    Last7Days,
    #[default]
    Last30Days,
    Last90Days,
    All,
}

impl AcceptancePeriod {
    pub fn days(self) -> Option<u64> {
        match self {
            AcceptancePeriod::Last7Days => Some(7),
            AcceptancePeriod::Last30Days => Some(30),
            AcceptancePeriod::Last90Days => Some(90),
            AcceptancePeriod::All => None,
        }
    }

    /// First date included in the window; `None` when every record counts.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        let days = self.days()?;
        Some(today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AcceptancePeriod::Last7Days => "7",
            AcceptancePeriod::Last30Days => "30",
            AcceptancePeriod::Last90Days => "90",
            AcceptancePeriod::All => "all",
        }
    }
}

/// Error returned for an unknown period selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period `{0}`")]
pub struct UnknownPeriod(pub String);

impl FromStr for AcceptancePeriod {
    type Err = UnknownPeriod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "7" => Ok(AcceptancePeriod::Last7Days),
            "30" => Ok(AcceptancePeriod::Last30Days),
            "90" => Ok(AcceptancePeriod::Last90Days),
            "all" => Ok(AcceptancePeriod::All),
            other => Err(UnknownPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for AcceptancePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AcceptancePeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AcceptancePeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Acceptance figures for one recipe on one weekday.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RecipeAcceptance {
    pub recipe_id: i32,
    pub recipe_name: String,
    pub day_of_week: i32,
    pub order_count: usize,
    pub total_sent: f64,
    pub total_waste: f64,
    pub avg_sent: f64,
    pub avg_waste: f64,
    /// Percentage of sent food that was not wasted, within `0..=100`.
    pub acceptance: f64,
}

#[derive(Default)]
struct Accumulator {
    recipe_name: String,
    order_ids: HashSet<i32>,
    total_sent: f64,
    total_waste: f64,
}

fn within_window(date: Option<NaiveDate>, cutoff: Option<NaiveDate>) -> bool {
    match cutoff {
        None => true,
        Some(cutoff) => date.is_some_and(|date| date >= cutoff),
    }
}

/// Aggregate the acceptance of every recipe sent to `customer_id`, grouped by
/// weekday (1 to 5).
///
/// Waste only counts for a (day, recipe) pair that already has orders in the
/// window; waste for food never ordered in the window is left out. Every
/// weekday is present in the result, each list sorted by descending
/// acceptance.
pub fn aggregate_acceptance(
    orders: &[Order],
    waste_records: &[WasteRecord],
    period: AcceptancePeriod,
    customer_id: i32,
    recipes: &[Recipe],
    today: NaiveDate,
) -> BTreeMap<i32, Vec<RecipeAcceptance>> {
    let cutoff = period.cutoff(today);
    let recipe_names: HashMap<i32, &str> = recipes
        .iter()
        .map(|recipe| (recipe.id, recipe.name.as_str()))
        .collect();

    let mut stats: HashMap<(i32, i32), Accumulator> = HashMap::new();

    let relevant_orders = orders.iter().filter(|order| {
        order.customer_id == customer_id
            && WORKING_DAYS.contains(&order.day_of_week)
            && within_window(order.date(), cutoff)
    });

    for order in relevant_orders {
        for item in order.items.iter().filter(|item| item.quantity > 0.0) {
            let entry = stats.entry((order.day_of_week, item.recipe_id)).or_default();
            if entry.recipe_name.is_empty() {
                entry.recipe_name = recipe_names
                    .get(&item.recipe_id)
                    .map(|name| (*name).to_string())
                    .unwrap_or_else(|| item.recipe_name.clone());
            }
            entry.total_sent += item.quantity;
            entry.order_ids.insert(order.id);
        }
    }

    let relevant_waste = waste_records.iter().filter(|record| {
        record.customer_id == customer_id
            && WORKING_DAYS.contains(&record.day_of_week)
            && within_window(record.date(), cutoff)
    });

    for record in relevant_waste {
        for item in &record.items {
            if let Some(entry) = stats.get_mut(&(record.day_of_week, item.recipe_id)) {
                entry.total_waste += item.waste_quantity;
            }
        }
    }

    let mut by_day: BTreeMap<i32, Vec<RecipeAcceptance>> =
        WORKING_DAYS.iter().map(|day| (*day, Vec::new())).collect();

    for ((day_of_week, recipe_id), entry) in stats {
        let order_count = entry.order_ids.len();
        if order_count == 0 || entry.total_sent == 0.0 {
            continue;
        }

        let count = order_count as f64;
        let acceptance =
            ((entry.total_sent - entry.total_waste) / entry.total_sent * 100.0).clamp(0.0, 100.0);

        by_day.entry(day_of_week).or_default().push(RecipeAcceptance {
            recipe_id,
            recipe_name: entry.recipe_name,
            day_of_week,
            order_count,
            total_sent: round_one_decimal(entry.total_sent),
            total_waste: round_one_decimal(entry.total_waste),
            avg_sent: round_one_decimal(entry.total_sent / count),
            avg_waste: round_one_decimal(entry.total_waste / count),
            acceptance: round_one_decimal(acceptance),
        });
    }

    for list in by_day.values_mut() {
        list.sort_by(|a, b| {
            b.acceptance
                .total_cmp(&a.acceptance)
                .then_with(|| a.recipe_id.cmp(&b.recipe_id))
        });
    }

    by_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::domain::order::{OrderItem, OrderStatus};
    use crate::domain::waste::WasteItem;
    use crate::domain::week::iso_week_of;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).expect("valid date")
    }

    fn order(id: i32, customer_id: i32, date: NaiveDate, day: i32, items: Vec<(i32, f64)>) -> Order {
        let (week_number, year) = iso_week_of(date);
        Order {
            id,
            hub_id: 1,
            customer_id,
            week_number,
            year,
            day_of_week: day,
            items: items
                .into_iter()
                .map(|(recipe_id, quantity)| OrderItem {
                    recipe_id,
                    recipe_name: format!("recipe {recipe_id}"),
                    quantity,
                    ..OrderItem::default()
                })
                .collect(),
            total_items: 0.0,
            total_amount: 0.0,
            total_meals_expected: None,
            status: OrderStatus::Delivered,
            general_notes: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn waste(customer_id: i32, date: NaiveDate, day: i32, items: Vec<(i32, f64)>) -> WasteRecord {
        let (week_number, year) = iso_week_of(date);
        WasteRecord {
            id: 1,
            hub_id: 1,
            customer_id,
            week_number,
            year,
            day_of_week: day,
            items: items
                .into_iter()
                .map(|(recipe_id, waste_quantity)| WasteItem {
                    recipe_id,
                    waste_quantity,
                    ..WasteItem::default()
                })
                .collect(),
            notes: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn monday_weeks_ago(weeks: u64) -> NaiveDate {
        // 2024-06-10 is the Monday of the reference week.
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        monday
            .checked_sub_days(Days::new(weeks * 7))
            .expect("valid date")
    }

    #[test]
    fn computes_averages_and_acceptance() {
        let orders = vec![
            order(1, 5, monday_weeks_ago(0), 1, vec![(10, 10.0)]),
            order(2, 5, monday_weeks_ago(1), 1, vec![(10, 20.0)]),
        ];
        let waste = vec![waste(5, monday_weeks_ago(0), 1, vec![(10, 3.0)])];

        let result = aggregate_acceptance(
            &orders,
            &waste,
            AcceptancePeriod::Last30Days,
            5,
            &[],
            today(),
        );

        let monday = &result[&1];
        assert_eq!(monday.len(), 1);
        let stats = &monday[0];
        assert_eq!(stats.order_count, 2);
        assert_eq!(stats.total_sent, 30.0);
        assert_eq!(stats.avg_sent, 15.0);
        assert_eq!(stats.avg_waste, 1.5);
        assert_eq!(stats.acceptance, 90.0);
        assert_eq!(stats.recipe_name, "recipe 10");
    }

    #[test]
    fn duplicate_lines_in_one_order_count_once() {
        let orders = vec![order(1, 5, monday_weeks_ago(0), 2, vec![(10, 4.0), (10, 6.0)])];

        let result = aggregate_acceptance(&orders, &[], AcceptancePeriod::All, 5, &[], today());

        let stats = &result[&2][0];
        assert_eq!(stats.order_count, 1);
        assert_eq!(stats.total_sent, 10.0);
        assert_eq!(stats.avg_sent, 10.0);
        assert_eq!(stats.acceptance, 100.0);
    }

    #[test]
    fn waste_without_orders_is_ignored() {
        let orders = vec![order(1, 5, monday_weeks_ago(0), 1, vec![(10, 10.0)])];
        let waste = vec![
            waste(5, monday_weeks_ago(0), 1, vec![(11, 4.0)]),
            waste(5, monday_weeks_ago(0), 2, vec![(10, 4.0)]),
        ];

        let result = aggregate_acceptance(&orders, &waste, AcceptancePeriod::All, 5, &[], today());

        assert_eq!(result[&1].len(), 1);
        assert_eq!(result[&1][0].total_waste, 0.0);
        assert!(result[&2].is_empty());
    }

    #[test]
    fn filters_customer_period_and_weekend() {
        let orders = vec![
            order(1, 5, monday_weeks_ago(0), 1, vec![(10, 10.0)]),
            order(2, 6, monday_weeks_ago(0), 1, vec![(10, 10.0)]),
            order(3, 5, monday_weeks_ago(3), 1, vec![(10, 10.0)]),
            order(4, 5, monday_weeks_ago(0), 6, vec![(10, 10.0)]),
            order(5, 5, monday_weeks_ago(0), 1, vec![(12, 0.0)]),
        ];

        let result = aggregate_acceptance(
            &orders,
            &[],
            AcceptancePeriod::Last7Days,
            5,
            &[],
            today(),
        );

        assert_eq!(result.len(), 5);
        assert_eq!(result[&1].len(), 1);
        assert_eq!(result[&1][0].order_count, 1);
        assert!(!result.contains_key(&6));
    }

    #[test]
    fn acceptance_is_clamped_and_sorted() {
        let orders = vec![order(1, 5, monday_weeks_ago(0), 3, vec![(10, 5.0), (11, 10.0)])];
        let waste = vec![waste(5, monday_weeks_ago(0), 3, vec![(10, 8.0), (11, 1.0)])];

        let result = aggregate_acceptance(&orders, &waste, AcceptancePeriod::All, 5, &[], today());

        let wednesday = &result[&3];
        assert_eq!(wednesday[0].recipe_id, 11);
        assert_eq!(wednesday[0].acceptance, 90.0);
        assert_eq!(wednesday[1].recipe_id, 10);
        assert_eq!(wednesday[1].acceptance, 0.0);
    }

    #[test]
    fn period_parses_from_selector() {
        assert_eq!("7".parse::<AcceptancePeriod>(), Ok(AcceptancePeriod::Last7Days));
        assert_eq!("all".parse::<AcceptancePeriod>(), Ok(AcceptancePeriod::All));
        assert!("14".parse::<AcceptancePeriod>().is_err());
        assert_eq!(AcceptancePeriod::All.cutoff(today()), None);
        assert_eq!(
            AcceptancePeriod::Last7Days.cutoff(today()),
            NaiveDate::from_ymd_opt(2024, 6, 7)
        );
    }
}
