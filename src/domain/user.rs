use pushkind_common::domain::auth::AuthenticatedUser;
use serde::{Deserialize, Serialize};

/// Local profile of a staff member, created on first access.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub hub_id: i32,
    pub name: String,
    pub email: String,
}

impl NewUser {
    #[must_use]
    pub fn new(hub_id: i32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            email: email.into().to_lowercase(),
        }
    }
}

impl From<&AuthenticatedUser> for NewUser {
    fn from(value: &AuthenticatedUser) -> Self {
        NewUser::new(value.hub_id, value.name.as_str(), value.email.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct UpdateUser {
    pub name: String,
    pub phone: Option<String>,
}
