use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ingredient::{
    Ingredient as DomainIngredient, NewIngredient as DomainNewIngredient,
    UpdateIngredient as DomainUpdateIngredient,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct Ingredient {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub unit: String,
    pub current_price: f64,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub unit: &'a str,
    pub current_price: f64,
    pub category: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateIngredient<'a> {
    pub name: &'a str,
    pub unit: &'a str,
    pub current_price: f64,
    pub category: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<Ingredient> for DomainIngredient {
    fn from(value: Ingredient) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            unit: value.unit,
            current_price: value.current_price,
            category: value.category,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewIngredient> for NewIngredient<'a> {
    fn from(value: &'a DomainNewIngredient) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            unit: value.unit.as_str(),
            current_price: value.current_price,
            category: value.category.as_deref(),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateIngredient> for UpdateIngredient<'a> {
    fn from(value: &'a DomainUpdateIngredient) -> Self {
        Self {
            name: value.name.as_str(),
            unit: value.unit.as_str(),
            current_price: value.current_price,
            category: value.category.as_deref(),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
