use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::UnitType;
use crate::domain::quantity::QuantityValue;
use crate::domain::waste::{NewWasteRecord, WasteItem};
use crate::domain::week::iso_week_date;
use crate::forms::{optional_text, sanitize_multiline_text};

const NOTES_MAX_LEN: u64 = 4096;

pub type WasteFormResult<T> = Result<T, WasteFormError>;

#[derive(Debug, Error)]
pub enum WasteFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("week {week} of {year} has no day {day}")]
    InvalidWeekDate { week: i32, year: i32, day: i32 },
}

#[derive(Debug, Deserialize, Validate)]
pub struct WasteItemForm {
    #[serde(default)]
    pub unique_id: Option<String>,
    #[validate(range(min = 1))]
    pub recipe_id: i32,
    #[serde(default)]
    pub waste_quantity: QuantityValue,
    #[serde(default)]
    pub client_returned_quantity: QuantityValue,
    #[serde(default)]
    pub ordered_unit_type: Option<String>,
}

impl WasteItemForm {
    fn into_item(self) -> Option<WasteItem> {
        // Negative entries are typing mistakes, not credits.
        let waste_quantity = self.waste_quantity.to_f64(0.0).max(0.0);
        let client_returned_quantity = self.client_returned_quantity.to_f64(0.0).max(0.0);
        if waste_quantity == 0.0 && client_returned_quantity == 0.0 {
            return None;
        }

        Some(WasteItem {
            unique_id: optional_text(self.unique_id.as_deref()),
            recipe_id: self.recipe_id,
            waste_quantity,
            client_returned_quantity,
            ordered_unit_type: self
                .ordered_unit_type
                .as_deref()
                .map(UnitType::from)
                .unwrap_or_default(),
        })
    }
}

/// Leftovers of one customer on one day, posted as JSON by the waste sheet.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveWasteForm {
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
    pub items: Vec<WasteItemForm>,
    #[serde(default)]
    #[validate(length(max = NOTES_MAX_LEN))]
    pub notes: Option<String>,
}

impl SaveWasteForm {
    pub fn into_new_waste_record(self, hub_id: i32) -> WasteFormResult<NewWasteRecord> {
        self.validate()?;

        if iso_week_date(self.year, self.week_number, self.day_of_week).is_none() {
            return Err(WasteFormError::InvalidWeekDate {
                week: self.week_number,
                year: self.year,
                day: self.day_of_week,
            });
        }

        let items = self
            .items
            .into_iter()
            .filter_map(WasteItemForm::into_item)
            .collect();

        let mut record = NewWasteRecord::new(
            hub_id,
            self.customer_id,
            self.week_number,
            self.year,
            self.day_of_week,
            items,
        );

        if let Some(notes) = self
            .notes
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|notes| !notes.is_empty())
        {
            record = record.with_notes(notes);
        }

        Ok(record)
    }
}
