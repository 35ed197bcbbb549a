use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Purchasable ingredient from the hub's catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    /// Purchase unit, e.g. `kg`, `l` or `un`.
    pub unit: String,
    /// Latest price per purchase unit.
    pub current_price: f64,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new ingredient.
#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub hub_id: i32,
    pub name: String,
    pub unit: String,
    pub current_price: f64,
    pub category: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl NewIngredient {
    pub fn new(
        hub_id: i32,
        name: impl Into<String>,
        unit: impl Into<String>,
        current_price: f64,
    ) -> Self {
        Self {
            hub_id,
            name: name.into(),
            unit: unit.into(),
            current_price,
            category: None,
            is_active: true,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Patch data applied when updating an ingredient.
#[derive(Debug, Clone)]
pub struct UpdateIngredient {
    pub name: String,
    pub unit: String,
    pub current_price: f64,
    pub category: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<NewIngredient> for UpdateIngredient {
    fn from(value: NewIngredient) -> Self {
        Self {
            name: value.name,
            unit: value.unit,
            current_price: value.current_price,
            category: value.category,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}

/// Query definition used to list ingredients.
#[derive(Debug, Clone)]
pub struct IngredientListQuery {
    pub hub_id: i32,
    pub search: Option<String>,
    pub include_inactive: bool,
    pub pagination: Option<Pagination>,
}

impl IngredientListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            search: None,
            include_inactive: false,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
