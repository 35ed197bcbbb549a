use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderItem, UnitType};
use crate::domain::week::iso_week_date;

/// Share of the original price lost on food a customer sends back.
pub const DEPRECIATION_RATE: f64 = 0.25;

/// Leftovers recorded for one recipe of a delivered order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WasteItem {
    #[serde(default)]
    pub unique_id: Option<String>,
    pub recipe_id: i32,
    /// Quantity thrown away at the customer's site.
    #[serde(default)]
    pub waste_quantity: f64,
    /// Quantity the customer returned to the kitchen.
    #[serde(default)]
    pub client_returned_quantity: f64,
    #[serde(default)]
    pub ordered_unit_type: UnitType,
}

/// Waste recorded for one customer on one day of a week.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WasteRecord {
    pub id: i32,
    pub hub_id: i32,
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    pub items: Vec<WasteItem>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl WasteRecord {
    pub fn date(&self) -> Option<NaiveDate> {
        iso_week_date(self.year, self.week_number, self.day_of_week)
    }

    /// Whether this record belongs to the same customer and day as `order`.
    pub fn matches_order(&self, order: &Order) -> bool {
        self.customer_id == order.customer_id
            && self.week_number == order.week_number
            && self.year == order.year
            && self.day_of_week == order.day_of_week
    }
}

/// Payload required to insert or replace a waste record.
#[derive(Debug, Clone)]
pub struct NewWasteRecord {
    pub hub_id: i32,
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    pub items: Vec<WasteItem>,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewWasteRecord {
    pub fn new(
        hub_id: i32,
        customer_id: i32,
        week_number: i32,
        year: i32,
        day_of_week: i32,
        items: Vec<WasteItem>,
    ) -> Self {
        Self {
            hub_id,
            customer_id,
            week_number,
            year,
            day_of_week,
            items,
            notes: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Query definition used to list waste records.
#[derive(Debug, Clone)]
pub struct WasteListQuery {
    pub hub_id: i32,
    pub customer_id: Option<i32>,
    pub week_number: Option<i32>,
    pub year: Option<i32>,
    pub day_of_week: Option<i32>,
}

impl WasteListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            customer_id: None,
            week_number: None,
            year: None,
            day_of_week: None,
        }
    }

    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn week(mut self, week_number: i32, year: i32) -> Self {
        self.week_number = Some(week_number);
        self.year = Some(year);
        self
    }

    pub fn day_of_week(mut self, day: i32) -> Self {
        self.day_of_week = Some(day);
        self
    }
}

/// Depreciation charged on one returned line.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DepreciatedItem {
    pub recipe_id: i32,
    pub unique_id: Option<String>,
    pub returned_quantity: f64,
    pub original_unit_price: f64,
    pub depreciation: f64,
}

/// Value of an order after deducting depreciation on returned food.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct ReturnDepreciation {
    pub items: Vec<DepreciatedItem>,
    pub original_total: f64,
    pub total_depreciation: f64,
    pub final_value: f64,
}

impl ReturnDepreciation {
    /// Settle `order` against the returns recorded in `waste`.
    pub fn for_order(order: &Order, waste: Option<&WasteRecord>) -> Self {
        let waste_items = waste.map(|record| record.items.as_slice()).unwrap_or(&[]);
        calculate_return_depreciation(&order.items, order.total_amount, waste_items)
    }
}

fn find_order_item<'a>(order_items: &'a [OrderItem], waste: &WasteItem) -> Option<&'a OrderItem> {
    let by_unique_id = waste.unique_id.as_deref().and_then(|unique_id| {
        order_items
            .iter()
            .find(|item| item.unique_id.as_deref() == Some(unique_id))
    });

    by_unique_id.or_else(|| {
        order_items
            .iter()
            .find(|item| item.recipe_id == waste.recipe_id)
    })
}

/// Charge [`DEPRECIATION_RATE`] of the original unit price on every returned
/// quantity.
///
/// Returned lines are paired with order lines by `unique_id`, then by recipe.
/// Lines without a counterpart or without a unit price are skipped. The final
/// value never drops below zero.
pub fn calculate_return_depreciation(
    order_items: &[OrderItem],
    original_total: f64,
    waste_items: &[WasteItem],
) -> ReturnDepreciation {
    let mut items = Vec::new();

    for waste in waste_items
        .iter()
        .filter(|waste| waste.client_returned_quantity > 0.0)
    {
        let Some(order_item) = find_order_item(order_items, waste) else {
            continue;
        };
        let Some(unit_price) = order_item.unit_price else {
            continue;
        };

        items.push(DepreciatedItem {
            recipe_id: waste.recipe_id,
            unique_id: waste.unique_id.clone(),
            returned_quantity: waste.client_returned_quantity,
            original_unit_price: unit_price,
            depreciation: unit_price * waste.client_returned_quantity * DEPRECIATION_RATE,
        });
    }

    let total_depreciation: f64 = items.iter().map(|item| item.depreciation).sum();

    ReturnDepreciation {
        items,
        original_total,
        total_depreciation,
        final_value: (original_total - total_depreciation).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_item(unique_id: Option<&str>, recipe_id: i32, unit_price: Option<f64>) -> OrderItem {
        OrderItem {
            unique_id: unique_id.map(str::to_string),
            recipe_id,
            quantity: 4.0,
            unit_price,
            ..OrderItem::default()
        }
    }

    fn returned(unique_id: Option<&str>, recipe_id: i32, quantity: f64) -> WasteItem {
        WasteItem {
            unique_id: unique_id.map(str::to_string),
            recipe_id,
            client_returned_quantity: quantity,
            ..WasteItem::default()
        }
    }

    #[test]
    fn depreciation_is_a_quarter_of_returned_value() {
        let order_items = vec![order_item(None, 1, Some(10.0))];
        let result = calculate_return_depreciation(&order_items, 40.0, &[returned(None, 1, 2.0)]);

        assert_eq!(result.total_depreciation, 5.0);
        assert_eq!(result.final_value, 35.0);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn unique_id_match_wins_over_recipe() {
        let order_items = vec![
            order_item(Some("a"), 1, Some(10.0)),
            order_item(Some("b"), 1, Some(20.0)),
        ];
        let result =
            calculate_return_depreciation(&order_items, 100.0, &[returned(Some("b"), 1, 1.0)]);

        assert_eq!(result.items[0].original_unit_price, 20.0);
        assert_eq!(result.total_depreciation, 5.0);
    }

    #[test]
    fn unknown_unique_id_falls_back_to_recipe() {
        let order_items = vec![order_item(Some("a"), 7, Some(8.0))];
        let result =
            calculate_return_depreciation(&order_items, 32.0, &[returned(Some("zz"), 7, 1.0)]);

        assert_eq!(result.total_depreciation, 2.0);
    }

    #[test]
    fn unmatched_and_unpriced_returns_are_skipped() {
        let order_items = vec![order_item(None, 1, None)];
        let waste = vec![
            returned(None, 1, 3.0),
            returned(None, 2, 3.0),
            returned(None, 1, 0.0),
        ];

        let result = calculate_return_depreciation(&order_items, 50.0, &waste);

        assert!(result.items.is_empty());
        assert_eq!(result.total_depreciation, 0.0);
        assert_eq!(result.final_value, 50.0);
    }

    #[test]
    fn final_value_never_negative() {
        let order_items = vec![order_item(None, 1, Some(100.0))];
        let result = calculate_return_depreciation(&order_items, 10.0, &[returned(None, 1, 4.0)]);

        assert_eq!(result.total_depreciation, 100.0);
        assert_eq!(result.final_value, 0.0);
    }
}
