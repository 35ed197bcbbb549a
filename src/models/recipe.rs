use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryError;

use crate::domain::recipe::{
    NewRecipe as DomainNewRecipe, Recipe as DomainRecipe, UpdateRecipe as DomainUpdateRecipe,
};
use crate::models::{decode_document, encode_document};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct Recipe {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub category: Option<String>,
    /// JSON array of preparation steps.
    pub steps: String,
    pub yield_weight: f64,
    pub cuba_weight: Option<f64>,
    pub cost_per_gram_raw: f64,
    pub cost_per_gram_yield: f64,
    pub sale_price: Option<f64>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub steps: String,
    pub yield_weight: f64,
    pub cuba_weight: Option<f64>,
    pub cost_per_gram_raw: f64,
    pub cost_per_gram_yield: f64,
    pub sale_price: Option<f64>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateRecipe<'a> {
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub steps: String,
    pub yield_weight: f64,
    pub cuba_weight: Option<f64>,
    pub cost_per_gram_raw: f64,
    pub cost_per_gram_yield: f64,
    pub sale_price: Option<f64>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Recipe> for DomainRecipe {
    type Error = RepositoryError;

    fn try_from(value: Recipe) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            category: value.category,
            steps: decode_document(&value.steps)?,
            yield_weight: value.yield_weight,
            cuba_weight: value.cuba_weight,
            cost_per_gram_raw: value.cost_per_gram_raw,
            cost_per_gram_yield: value.cost_per_gram_yield,
            sale_price: value.sale_price,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewRecipe> for NewRecipe<'a> {
    type Error = RepositoryError;

    fn try_from(value: &'a DomainNewRecipe) -> Result<Self, Self::Error> {
        Ok(Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            category: value.category.as_deref(),
            steps: encode_document(&value.steps)?,
            yield_weight: value.metrics.yield_weight,
            cuba_weight: value.cuba_weight,
            cost_per_gram_raw: value.metrics.cost_per_gram_raw,
            cost_per_gram_yield: value.metrics.cost_per_gram_yield,
            sale_price: value.sale_price,
            is_active: value.is_active,
            updated_at: value.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainUpdateRecipe> for UpdateRecipe<'a> {
    type Error = RepositoryError;

    fn try_from(value: &'a DomainUpdateRecipe) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name.as_str(),
            category: value.category.as_deref(),
            steps: encode_document(&value.steps)?,
            yield_weight: value.metrics.yield_weight,
            cuba_weight: value.cuba_weight,
            cost_per_gram_raw: value.metrics.cost_per_gram_raw,
            cost_per_gram_yield: value.metrics.cost_per_gram_yield,
            sale_price: value.sale_price,
            is_active: value.is_active,
            updated_at: value.updated_at,
        })
    }
}
