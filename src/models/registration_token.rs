use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::registration_token::{
    NewRegistrationToken as DomainNewRegistrationToken,
    RegistrationToken as DomainRegistrationToken,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::registration_tokens)]
pub struct RegistrationToken {
    pub id: i32,
    pub hub_id: i32,
    pub token: String,
    pub customer_id: Option<i32>,
    pub redeemed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::registration_tokens)]
pub struct NewRegistrationToken<'a> {
    pub hub_id: i32,
    pub token: &'a str,
}

impl From<RegistrationToken> for DomainRegistrationToken {
    fn from(value: RegistrationToken) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            token: value.token,
            customer_id: value.customer_id,
            redeemed_at: value.redeemed_at,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewRegistrationToken> for NewRegistrationToken<'a> {
    fn from(value: &'a DomainNewRegistrationToken) -> Self {
        Self {
            hub_id: value.hub_id,
            token: value.token.as_str(),
        }
    }
}
