//! JSON payloads of the catalog API: categories, category types,
//! ingredients and the staff profile.

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, NewCategoryType, UpdateCategory};
use crate::domain::ingredient::{NewIngredient, UpdateIngredient};
use crate::domain::quantity::QuantityValue;
use crate::domain::user::UpdateUser;
use crate::forms::{optional_text, sanitize_inline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const SHORT_MAX_LEN_VALIDATOR: u64 = 32;

pub type CatalogFormResult<T> = Result<T, CatalogFormError>;

#[derive(Debug, Error)]
pub enum CatalogFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("price cannot be negative")]
    NegativePrice,
}

fn required(value: &str, field: &'static str) -> CatalogFormResult<String> {
    let value = sanitize_inline_text(value);
    if value.is_empty() {
        return Err(CatalogFormError::Empty(field));
    }
    Ok(value)
}

fn optional_color(value: Option<&str>) -> CatalogFormResult<Option<String>> {
    let Some(color) = optional_text(value) else {
        return Ok(None);
    };
    let valid = color
        .strip_prefix('#')
        .is_some_and(|digits| {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
        });
    if !valid {
        return Err(CatalogFormError::InvalidColor(color));
    }
    Ok(Some(color.to_uppercase()))
}

/// Body of `POST /api/category-tree`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryPayload {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = SHORT_MAX_LEN_VALIDATOR))]
    pub category_type: String,
    #[serde(default)]
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position: i32,
}

impl AddCategoryPayload {
    /// Build a root category; attaching it below `parent_id` needs the
    /// parent's depth and is done by the caller.
    pub fn into_new_category(self, hub_id: i32) -> CatalogFormResult<NewCategory> {
        self.validate()?;

        let name = required(&self.name, "category name")?;
        let category_type = required(&self.category_type, "category type")?;

        let mut category = NewCategory::new(hub_id, name, category_type).with_position(self.position);
        if let Some(color) = optional_color(self.color.as_deref())? {
            category = category.with_color(color);
        }
        Ok(category)
    }
}

/// Body of `PUT /api/category-tree`.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryPayload {
    #[validate(range(min = 1))]
    pub id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl EditCategoryPayload {
    pub fn into_update_category(self) -> CatalogFormResult<UpdateCategory> {
        self.validate()?;

        Ok(UpdateCategory::new(
            required(&self.name, "category name")?,
            optional_color(self.color.as_deref())?,
            self.position,
            self.is_active,
        ))
    }
}

/// Body of `POST` and `PUT /api/category-types`; `id` is required when
/// updating.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryTypePayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = SHORT_MAX_LEN_VALIDATOR))]
    pub value: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub label: String,
    #[serde(default)]
    pub position: i32,
}

impl CategoryTypePayload {
    /// Type values are used as keys, so they are lowercased with spaces
    /// replaced by underscores.
    pub fn into_new_category_type(self, hub_id: i32) -> CatalogFormResult<NewCategoryType> {
        self.validate()?;

        let value = required(&self.value, "type value")?
            .to_lowercase()
            .replace(' ', "_");
        let label = required(&self.label, "type label")?;

        Ok(NewCategoryType::new(hub_id, value, label).with_position(self.position))
    }
}

/// Body of `POST` and `PUT /api/ingredients`.
#[derive(Debug, Deserialize, Validate)]
pub struct IngredientPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(min = 1, max = SHORT_MAX_LEN_VALIDATOR))]
    pub unit: String,
    #[serde(default)]
    pub current_price: QuantityValue,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl IngredientPayload {
    pub fn into_new_ingredient(self, hub_id: i32) -> CatalogFormResult<NewIngredient> {
        self.validate()?;

        let price = self.current_price.to_f64(0.0);
        if price < 0.0 {
            return Err(CatalogFormError::NegativePrice);
        }

        let mut ingredient = NewIngredient::new(
            hub_id,
            required(&self.name, "ingredient name")?,
            required(&self.unit, "unit")?.to_lowercase(),
            price,
        );
        if let Some(category) = optional_text(self.category.as_deref()) {
            ingredient = ingredient.with_category(category);
        }
        if !self.is_active {
            ingredient = ingredient.inactive();
        }
        Ok(ingredient)
    }

    pub fn into_update_ingredient(self, hub_id: i32) -> CatalogFormResult<UpdateIngredient> {
        self.into_new_ingredient(hub_id).map(UpdateIngredient::from)
    }
}

/// Body of `PUT /api/user`.
#[derive(Debug, Deserialize, Validate)]
pub struct UserPayload {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = SHORT_MAX_LEN_VALIDATOR))]
    pub phone: Option<String>,
}

impl UserPayload {
    pub fn into_update_user(self) -> CatalogFormResult<UpdateUser> {
        self.validate()?;

        Ok(UpdateUser {
            name: required(&self.name, "name")?,
            phone: optional_text(self.phone.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_payload_checks_color() {
        let payload: AddCategoryPayload =
            serde_json::from_str(r##"{"name": " Saladas ", "type": "cardapio", "color": "#0f0"}"##)
                .expect("valid json");
        let category = payload.into_new_category(3).expect("valid payload");
        assert_eq!(category.name, "Saladas");
        assert_eq!(category.category_type, "cardapio");
        assert_eq!(category.color.as_deref(), Some("#0F0"));
        assert_eq!(category.level, 1);

        let payload: AddCategoryPayload =
            serde_json::from_str(r#"{"name": "Saladas", "type": "cardapio", "color": "green"}"#)
                .expect("valid json");
        assert!(matches!(
            payload.into_new_category(3),
            Err(CatalogFormError::InvalidColor(_))
        ));
    }

    #[test]
    fn category_type_values_become_keys() {
        let payload = CategoryTypePayload {
            id: None,
            value: " Bebidas Quentes ".to_string(),
            label: "Bebidas quentes".to_string(),
            position: 2,
        };
        let new_type = payload.into_new_category_type(1).expect("valid payload");
        assert_eq!(new_type.value, "bebidas_quentes");
        assert_eq!(new_type.position, 2);
    }

    #[test]
    fn ingredient_price_accepts_comma_decimals() {
        let payload: IngredientPayload = serde_json::from_str(
            r#"{"name": "Feijão", "unit": "KG", "current_price": "8,90", "is_active": false}"#,
        )
        .expect("valid json");
        let ingredient = payload.into_new_ingredient(1).expect("valid payload");
        assert_eq!(ingredient.unit, "kg");
        assert_eq!(ingredient.current_price, 8.9);
        assert!(!ingredient.is_active);

        let payload: IngredientPayload =
            serde_json::from_str(r#"{"name": "Feijão", "unit": "kg", "current_price": -1.0}"#)
                .expect("valid json");
        assert!(matches!(
            payload.into_new_ingredient(1),
            Err(CatalogFormError::NegativePrice)
        ));
    }

    #[test]
    fn user_payload_drops_blank_phone() {
        let update = UserPayload {
            name: "Ana".to_string(),
            phone: Some(" ".to_string()),
        }
        .into_update_user()
        .expect("valid payload");
        assert_eq!(update.phone, None);
    }
}
