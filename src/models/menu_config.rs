use chrono::NaiveDateTime;
use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryError;

use crate::domain::menu_config::MenuConfig as DomainMenuConfig;
use crate::models::decode_document;

/// Menu configuration row; the whole document lives in one JSON column.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::menu_configs)]
pub struct MenuConfig {
    pub id: i32,
    pub hub_id: i32,
    pub document: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::menu_configs)]
pub struct NewMenuConfig {
    pub hub_id: i32,
    pub document: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<MenuConfig> for DomainMenuConfig {
    type Error = RepositoryError;

    fn try_from(value: MenuConfig) -> Result<Self, Self::Error> {
        decode_document(&value.document)
    }
}
