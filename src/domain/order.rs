use chrono::{NaiveDate, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::week::iso_week_date;

/// Possible lifecycle states for a customer order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order is still being edited.
    #[default]
    Draft,
    /// Order was submitted by the customer or staff.
    Submitted,
    /// Kitchen confirmed the order.
    Confirmed,
    /// Food was delivered.
    Delivered,
    /// Order was cancelled and should not be produced.
    Cancelled,
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "submitted" => OrderStatus::Submitted,
            "confirmed" => OrderStatus::Confirmed,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Draft,
        }
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Draft => "draft",
            OrderStatus::Submitted => "submitted",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Unit a recipe is ordered in.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// Serving tray; converted to kilograms with the recipe's cuba weight.
    #[default]
    Cuba,
    /// Kilograms.
    Kg,
    /// Individual portions.
    Unid,
}

impl From<&str> for UnitType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "kg" => UnitType::Kg,
            "unid" | "un" | "unidade" => UnitType::Unid,
            _ => UnitType::Cuba,
        }
    }
}

/// One line of an order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct OrderItem {
    /// Client-generated identifier of the line, used to pair returns.
    #[serde(default)]
    pub unique_id: Option<String>,
    pub recipe_id: i32,
    #[serde(default)]
    pub recipe_name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit_type: UnitType,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderItem {
    /// Refresh `total_price` from quantity and unit price.
    pub fn recalculate(&mut self) {
        self.total_price = self.quantity * self.unit_price.unwrap_or(0.0);
    }

    /// Weight of the line in kilograms. Cubas are converted with the recipe's
    /// cuba weight; other units are taken as-is.
    pub fn total_weight(&self, cuba_weight: Option<f64>) -> f64 {
        match self.unit_type {
            UnitType::Cuba => self.quantity * cuba_weight.unwrap_or(0.0),
            UnitType::Kg | UnitType::Unid => self.quantity,
        }
    }
}

/// Aggregates of an order.
///
/// `total_items` adds raw quantities across unit types, so cubas and
/// kilograms end up in the same sum.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct OrderTotals {
    pub total_items: f64,
    pub total_amount: f64,
}

impl OrderTotals {
    pub fn from_items(items: &[OrderItem]) -> Self {
        items.iter().fold(Self::default(), |totals, item| Self {
            total_items: totals.total_items + item.quantity,
            total_amount: totals.total_amount + item.total_price,
        })
    }
}

/// Recalculate every line price and return the matching aggregates.
pub fn recalculate_items(items: &mut [OrderItem]) -> OrderTotals {
    for item in items.iter_mut() {
        item.recalculate();
    }
    OrderTotals::from_items(items)
}

/// Domain representation of an order for one customer and one day of a week.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub hub_id: i32,
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    /// Day of the ISO week, `1` for Monday through `5` for Friday.
    pub day_of_week: i32,
    pub items: Vec<OrderItem>,
    pub total_items: f64,
    pub total_amount: f64,
    pub total_meals_expected: Option<i32>,
    pub status: OrderStatus,
    pub general_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Calendar date the order is delivered on.
    pub fn date(&self) -> Option<NaiveDate> {
        iso_week_date(self.year, self.week_number, self.day_of_week)
    }
}

/// Payload required to insert a new order. Totals are derived from the items.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub hub_id: i32,
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    pub total_meals_expected: Option<i32>,
    pub status: OrderStatus,
    pub general_notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewOrder {
    pub fn new(
        hub_id: i32,
        customer_id: i32,
        week_number: i32,
        year: i32,
        day_of_week: i32,
        mut items: Vec<OrderItem>,
    ) -> Self {
        let totals = recalculate_items(&mut items);
        Self {
            hub_id,
            customer_id,
            week_number,
            year,
            day_of_week,
            items,
            totals,
            total_meals_expected: None,
            status: OrderStatus::default(),
            general_notes: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn with_meals_expected(mut self, meals: i32) -> Self {
        self.total_meals_expected = Some(meals);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.general_notes = Some(notes.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }
}

/// Patch data applied when updating an existing order.
#[derive(Debug, Clone)]
pub struct UpdateOrder {
    /// Replacement items together with their recomputed totals.
    pub items: Option<(Vec<OrderItem>, OrderTotals)>,
    pub status: Option<OrderStatus>,
    pub total_meals_expected: Option<Option<i32>>,
    pub general_notes: Option<Option<String>>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateOrder {
    pub fn new() -> Self {
        Self {
            items: None,
            status: None,
            total_meals_expected: None,
            general_notes: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    /// Replace the order items; totals are recomputed here so they can never
    /// drift from the lines.
    pub fn items(mut self, mut items: Vec<OrderItem>) -> Self {
        let totals = recalculate_items(&mut items);
        self.items = Some((items, totals));
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn total_meals_expected(mut self, meals: Option<i32>) -> Self {
        self.total_meals_expected = Some(meals);
        self
    }

    pub fn general_notes(mut self, notes: Option<impl Into<String>>) -> Self {
        self.general_notes = Some(notes.map(|value| value.into()));
        self
    }
}

/// Query definition used to list orders for a hub.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub hub_id: i32,
    pub customer_id: Option<i32>,
    pub week_number: Option<i32>,
    pub year: Option<i32>,
    pub day_of_week: Option<i32>,
    pub status: Option<OrderStatus>,
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            customer_id: None,
            week_number: None,
            year: None,
            day_of_week: None,
            status: None,
            pagination: None,
        }
    }

    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Restrict the results to one ISO week.
    pub fn week(mut self, week_number: i32, year: i32) -> Self {
        self.week_number = Some(week_number);
        self.year = Some(year);
        self
    }

    pub fn day_of_week(mut self, day: i32) -> Self {
        self.day_of_week = Some(day);
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(recipe_id: i32, quantity: f64, unit_price: f64) -> OrderItem {
        OrderItem {
            recipe_id,
            quantity,
            unit_price: Some(unit_price),
            ..OrderItem::default()
        }
    }

    #[test]
    fn totals_sum_quantities_and_prices() {
        let mut items = vec![item(1, 2.0, 5.0), item(2, 3.0, 4.0)];

        let totals = recalculate_items(&mut items);

        assert_eq!(totals.total_items, 5.0);
        assert_eq!(totals.total_amount, 22.0);
        assert_eq!(items[0].total_price, 10.0);
        assert_eq!(items[1].total_price, 12.0);
    }

    #[test]
    fn total_items_mixes_units_without_conversion() {
        let mut kg = item(2, 1.5, 10.0);
        kg.unit_type = UnitType::Kg;
        let mut items = vec![item(1, 2.0, 5.0), kg];

        let totals = recalculate_items(&mut items);

        assert_eq!(totals.total_items, 3.5);
    }

    #[test]
    fn missing_unit_price_prices_line_at_zero() {
        let mut line = item(1, 2.0, 0.0);
        line.unit_price = None;
        line.total_price = 99.0;

        line.recalculate();

        assert_eq!(line.total_price, 0.0);
    }

    #[test]
    fn total_weight_depends_on_unit() {
        let cuba = item(1, 2.0, 5.0);
        assert_eq!(cuba.total_weight(Some(3.5)), 7.0);
        assert_eq!(cuba.total_weight(None), 0.0);

        let mut kg = item(1, 2.5, 5.0);
        kg.unit_type = UnitType::Kg;
        assert_eq!(kg.total_weight(Some(3.5)), 2.5);
    }

    #[test]
    fn new_order_derives_totals() {
        let order = NewOrder::new(1, 2, 10, 2024, 3, vec![item(1, 2.0, 5.0)]);
        assert_eq!(order.totals.total_items, 2.0);
        assert_eq!(order.totals.total_amount, 10.0);
        assert_eq!(order.status, OrderStatus::Draft);
    }

    #[test]
    fn update_items_recomputes_totals() {
        let update = UpdateOrder::new().items(vec![item(1, 1.0, 7.0), item(2, 2.0, 1.5)]);
        let (items, totals) = update.items.expect("items set");
        assert_eq!(items.len(), 2);
        assert_eq!(totals.total_amount, 10.0);
    }

    #[test]
    fn unit_type_and_status_parse_from_strings() {
        assert_eq!(UnitType::from("KG"), UnitType::Kg);
        assert_eq!(UnitType::from("cuba"), UnitType::Cuba);
        assert_eq!(OrderStatus::from("confirmed"), OrderStatus::Confirmed);
        assert_eq!(OrderStatus::from("unknown"), OrderStatus::Draft);
        let raw: &str = OrderStatus::Submitted.into();
        assert_eq!(raw, "submitted");
    }
}
