use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: i32,
    pub hub_id: i32,
    pub public_id: String,
    pub name: String,
    pub category: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub billing_address: Option<String>,
    pub pending_registration: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub hub_id: i32,
    pub public_id: &'a str,
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub document: Option<&'a str>,
    pub billing_address: Option<&'a str>,
    pub pending_registration: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
pub struct UpdateCustomer<'a> {
    pub name: &'a str,
    pub category: Option<Option<&'a str>>,
    pub email: Option<Option<&'a str>>,
    pub phone: Option<Option<&'a str>>,
    pub document: Option<Option<&'a str>>,
    pub billing_address: Option<Option<&'a str>>,
    pub pending_registration: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Customer> for DomainCustomer {
    fn from(value: Customer) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            public_id: value.public_id,
            name: value.name,
            category: value.category,
            email: value.email,
            phone: value.phone,
            document: value.document,
            billing_address: value.billing_address,
            pending_registration: value.pending_registration,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(value: &'a DomainNewCustomer) -> Self {
        Self {
            hub_id: value.hub_id,
            public_id: value.public_id.as_str(),
            name: value.name.as_str(),
            category: value.category.as_deref(),
            email: value.email.as_deref(),
            phone: value.phone.as_deref(),
            document: value.document.as_deref(),
            billing_address: value.billing_address.as_deref(),
            pending_registration: value.pending_registration,
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(value: &'a DomainUpdateCustomer) -> Self {
        let profile = &value.profile;
        Self {
            name: profile.name.as_str(),
            category: Some(profile.category.as_deref()),
            email: Some(profile.email.as_deref()),
            phone: Some(profile.phone.as_deref()),
            document: Some(profile.document.as_deref()),
            billing_address: Some(profile.billing_address.as_deref()),
            pending_registration: value.pending_registration,
            updated_at: value.updated_at,
        }
    }
}
