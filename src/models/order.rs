use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryError;

use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderItem as DomainOrderItem,
    UpdateOrder as DomainUpdateOrder,
};
use crate::models::{decode_document, encode_document};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(belongs_to(super::customer::Customer, foreign_key = customer_id))]
pub struct Order {
    pub id: i32,
    pub hub_id: i32,
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    /// JSON array of order items.
    pub items: String,
    pub total_items: f64,
    pub total_amount: f64,
    pub total_meals_expected: Option<i32>,
    pub status: String,
    pub general_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub hub_id: i32,
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    pub items: String,
    pub total_items: f64,
    pub total_amount: f64,
    pub total_meals_expected: Option<i32>,
    pub status: &'a str,
    pub general_notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct UpdateOrder<'a> {
    pub items: Option<String>,
    pub total_items: Option<f64>,
    pub total_amount: Option<f64>,
    pub total_meals_expected: Option<Option<i32>>,
    pub status: Option<&'a str>,
    pub general_notes: Option<Option<&'a str>>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Order> for DomainOrder {
    type Error = RepositoryError;

    fn try_from(value: Order) -> Result<Self, Self::Error> {
        let items: Vec<DomainOrderItem> = decode_document(&value.items)?;
        Ok(Self {
            id: value.id,
            hub_id: value.hub_id,
            customer_id: value.customer_id,
            week_number: value.week_number,
            year: value.year,
            day_of_week: value.day_of_week,
            items,
            total_items: value.total_items,
            total_amount: value.total_amount,
            total_meals_expected: value.total_meals_expected,
            status: value.status.as_str().into(),
            general_notes: value.general_notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewOrder> for NewOrder<'a> {
    type Error = RepositoryError;

    fn try_from(value: &'a DomainNewOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            hub_id: value.hub_id,
            customer_id: value.customer_id,
            week_number: value.week_number,
            year: value.year,
            day_of_week: value.day_of_week,
            items: encode_document(&value.items)?,
            total_items: value.totals.total_items,
            total_amount: value.totals.total_amount,
            total_meals_expected: value.total_meals_expected,
            status: value.status.into(),
            general_notes: value.general_notes.as_deref(),
            updated_at: value.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainUpdateOrder> for UpdateOrder<'a> {
    type Error = RepositoryError;

    fn try_from(value: &'a DomainUpdateOrder) -> Result<Self, Self::Error> {
        let (items, totals) = match value.items.as_ref() {
            Some((items, totals)) => (Some(encode_document(items)?), Some(*totals)),
            None => (None, None),
        };

        Ok(Self {
            items,
            total_items: totals.map(|totals| totals.total_items),
            total_amount: totals.map(|totals| totals.total_amount),
            total_meals_expected: value.total_meals_expected,
            status: value.status.map(|status| status.into()),
            general_notes: value
                .general_notes
                .as_ref()
                .map(|notes| notes.as_deref()),
            updated_at: value.updated_at,
        })
    }
}
