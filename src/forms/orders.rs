use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::{NewOrder, OrderItem, OrderStatus, UnitType, UpdateOrder};
use crate::domain::quantity::QuantityValue;
use crate::domain::week::iso_week_date;
use crate::forms::{optional_text, sanitize_inline_text, sanitize_multiline_text};

const NOTES_MAX_LEN: u64 = 4096;

pub type OrderFormResult<T> = Result<T, OrderFormError>;

#[derive(Debug, Error)]
pub enum OrderFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("week {week} of {year} has no day {day}")]
    InvalidWeekDate { week: i32, year: i32, day: i32 },
}

/// One line of a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemForm {
    #[serde(default)]
    pub unique_id: Option<String>,
    #[validate(range(min = 1))]
    pub recipe_id: i32,
    #[serde(default)]
    pub recipe_name: Option<String>,
    #[serde(default)]
    pub quantity: QuantityValue,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub unit_price: Option<QuantityValue>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderItemForm {
    fn into_item(self) -> Option<OrderItem> {
        let quantity = self.quantity.to_f64(0.0);
        // Cleared lines arrive with an empty or zero quantity.
        if quantity <= 0.0 {
            return None;
        }

        Some(OrderItem {
            unique_id: optional_text(self.unique_id.as_deref()),
            recipe_id: self.recipe_id,
            recipe_name: self
                .recipe_name
                .as_deref()
                .map(sanitize_inline_text)
                .unwrap_or_default(),
            quantity,
            unit_type: self
                .unit_type
                .as_deref()
                .map(UnitType::from)
                .unwrap_or_default(),
            unit_price: self.unit_price.map(|price| price.to_f64(0.0)),
            total_price: 0.0,
            notes: optional_text(self.notes.as_deref()),
        })
    }
}

/// Order for one customer and day, as posted by the staff order grid.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveOrderForm {
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(range(min = 1, max = 53))]
    pub week_number: i32,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(range(min = 1, max = 5))]
    pub day_of_week: i32,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<OrderItemForm>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub total_meals_expected: Option<i32>,
    #[serde(default)]
    #[validate(length(max = NOTES_MAX_LEN))]
    pub general_notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Sanitized order ready to be stored.
#[derive(Debug, Clone)]
pub struct OrderPayload {
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    pub items: Vec<OrderItem>,
    pub total_meals_expected: Option<i32>,
    pub general_notes: Option<String>,
    pub status: Option<OrderStatus>,
}

impl SaveOrderForm {
    pub fn into_payload(self) -> OrderFormResult<OrderPayload> {
        self.validate()?;

        if iso_week_date(self.year, self.week_number, self.day_of_week).is_none() {
            return Err(OrderFormError::InvalidWeekDate {
                week: self.week_number,
                year: self.year,
                day: self.day_of_week,
            });
        }

        Ok(OrderPayload {
            customer_id: self.customer_id,
            week_number: self.week_number,
            year: self.year,
            day_of_week: self.day_of_week,
            items: self
                .items
                .into_iter()
                .filter_map(OrderItemForm::into_item)
                .collect(),
            total_meals_expected: self.total_meals_expected,
            general_notes: self
                .general_notes
                .as_deref()
                .map(sanitize_multiline_text)
                .filter(|notes| !notes.is_empty()),
            status: self.status.as_deref().map(OrderStatus::from),
        })
    }
}

impl OrderPayload {
    pub fn to_new_order(&self, hub_id: i32) -> NewOrder {
        let mut order = NewOrder::new(
            hub_id,
            self.customer_id,
            self.week_number,
            self.year,
            self.day_of_week,
            self.items.clone(),
        );
        order.total_meals_expected = self.total_meals_expected;
        order.general_notes = self.general_notes.clone();
        if let Some(status) = self.status {
            order = order.with_status(status);
        }
        order
    }

    pub fn to_update_order(&self) -> UpdateOrder {
        let mut update = UpdateOrder::new()
            .items(self.items.clone())
            .total_meals_expected(self.total_meals_expected)
            .general_notes(self.general_notes.clone());
        if let Some(status) = self.status {
            update = update.status(status);
        }
        update
    }
}

/// Line of an order placed through the customer portal. Prices come from the
/// recipe catalog, never from the customer.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalOrderItemForm {
    #[serde(default)]
    pub unique_id: Option<String>,
    pub recipe_id: i32,
    #[serde(default)]
    pub quantity: QuantityValue,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalOrderForm {
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    #[serde(default)]
    pub items: Vec<PortalOrderItemForm>,
    #[serde(default)]
    pub total_meals_expected: Option<i32>,
    #[serde(default)]
    pub general_notes: Option<String>,
}

impl PortalOrderForm {
    /// Bind the order to `customer_id`; submitted orders are always drafts
    /// until the kitchen confirms them.
    pub fn into_order_form(self, customer_id: i32) -> SaveOrderForm {
        SaveOrderForm {
            customer_id,
            week_number: self.week_number,
            year: self.year,
            day_of_week: self.day_of_week,
            items: self
                .items
                .into_iter()
                .map(|item| OrderItemForm {
                    unique_id: item.unique_id,
                    recipe_id: item.recipe_id,
                    recipe_name: None,
                    quantity: item.quantity,
                    unit_type: item.unit_type,
                    unit_price: None,
                    notes: item.notes,
                })
                .collect(),
            total_meals_expected: self.total_meals_expected,
            general_notes: self.general_notes,
            status: Some(String::from(<&str>::from(OrderStatus::Submitted))),
        }
    }
}
