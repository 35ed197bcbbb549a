use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, CategoryType as DomainCategoryType,
    NewCategory as DomainNewCategory, NewCategoryType as DomainNewCategoryType,
    UpdateCategory as DomainUpdateCategory,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub category_type: String,
    pub level: i32,
    pub parent_id: Option<i32>,
    pub color: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub category_type: &'a str,
    pub level: i32,
    pub parent_id: Option<i32>,
    pub color: Option<&'a str>,
    pub position: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCategory<'a> {
    pub name: &'a str,
    pub color: Option<&'a str>,
    pub position: i32,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::category_types)]
pub struct CategoryType {
    pub id: i32,
    pub hub_id: i32,
    pub value: String,
    pub label: String,
    pub position: i32,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::category_types)]
pub struct NewCategoryType<'a> {
    pub hub_id: i32,
    pub value: &'a str,
    pub label: &'a str,
    pub position: i32,
}

impl From<Category> for DomainCategory {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            category_type: value.category_type,
            level: value.level,
            parent_id: value.parent_id,
            color: value.color,
            position: value.position,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(value: &'a DomainNewCategory) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            category_type: value.category_type.as_str(),
            level: value.level,
            parent_id: value.parent_id,
            color: value.color.as_deref(),
            position: value.position,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(value: &'a DomainUpdateCategory) -> Self {
        Self {
            name: value.name.as_str(),
            color: value.color.as_deref(),
            position: value.position,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}

impl From<CategoryType> for DomainCategoryType {
    fn from(value: CategoryType) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            value: value.value,
            label: value.label,
            position: value.position,
        }
    }
}

impl<'a> From<&'a DomainNewCategoryType> for NewCategoryType<'a> {
    fn from(value: &'a DomainNewCategoryType) -> Self {
        Self {
            hub_id: value.hub_id,
            value: value.value.as_str(),
            label: value.label.as_str(),
            position: value.position,
        }
    }
}
