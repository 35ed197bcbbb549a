use chrono::NaiveDateTime;
use uuid::Uuid;

/// One-time token behind a `temp-` registration link.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationToken {
    pub id: i32,
    pub hub_id: i32,
    pub token: String,
    /// Customer created when the token was redeemed.
    pub customer_id: Option<i32>,
    pub redeemed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl RegistrationToken {
    pub fn is_redeemed(&self) -> bool {
        self.redeemed_at.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewRegistrationToken {
    pub hub_id: i32,
    pub token: String,
}

impl NewRegistrationToken {
    /// Issue a fresh random token for `hub_id`.
    #[must_use]
    pub fn issue(hub_id: i32) -> Self {
        Self {
            hub_id,
            token: Uuid::new_v4().simple().to_string(),
        }
    }
}
