use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryError;

use crate::domain::waste::{NewWasteRecord as DomainNewWasteRecord, WasteRecord as DomainWasteRecord};
use crate::models::{decode_document, encode_document};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::waste_records)]
#[diesel(belongs_to(super::customer::Customer, foreign_key = customer_id))]
pub struct WasteRecord {
    pub id: i32,
    pub hub_id: i32,
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    /// JSON array of waste items.
    pub items: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::waste_records)]
pub struct NewWasteRecord<'a> {
    pub hub_id: i32,
    pub customer_id: i32,
    pub week_number: i32,
    pub year: i32,
    pub day_of_week: i32,
    pub items: String,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Replacement of the mutable part of an existing record.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::waste_records)]
#[diesel(treat_none_as_null = true)]
pub struct ReplaceWasteRecord<'a> {
    pub items: String,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<WasteRecord> for DomainWasteRecord {
    type Error = RepositoryError;

    fn try_from(value: WasteRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            hub_id: value.hub_id,
            customer_id: value.customer_id,
            week_number: value.week_number,
            year: value.year,
            day_of_week: value.day_of_week,
            items: decode_document(&value.items)?,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewWasteRecord> for NewWasteRecord<'a> {
    type Error = RepositoryError;

    fn try_from(value: &'a DomainNewWasteRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            hub_id: value.hub_id,
            customer_id: value.customer_id,
            week_number: value.week_number,
            year: value.year,
            day_of_week: value.day_of_week,
            items: encode_document(&value.items)?,
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewWasteRecord> for ReplaceWasteRecord<'a> {
    type Error = RepositoryError;

    fn try_from(value: &'a DomainNewWasteRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            items: encode_document(&value.items)?,
            notes: value.notes.as_deref(),
            updated_at: value.updated_at,
        })
    }
}
