use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain representation of a customer served by a hub.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub hub_id: i32,
    /// Random identifier used in portal links in place of `id`.
    pub public_id: String,
    pub name: String,
    /// Customer segment, such as "escola" or "empresa".
    pub category: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// CNPJ/CPF used on invoices.
    pub document: Option<String>,
    pub billing_address: Option<String>,
    /// True until the customer completes the self-service registration.
    pub pending_registration: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new customer for a hub.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub hub_id: i32,
    pub public_id: String,
    pub name: String,
    pub category: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub billing_address: Option<String>,
    pub pending_registration: bool,
}

impl NewCustomer {
    /// Build a customer whose profile is already complete.
    #[must_use]
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            public_id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            category: None,
            email: None,
            phone: None,
            document: None,
            billing_address: None,
            pending_registration: false,
        }
    }

    /// Build a placeholder customer that still has to register via the portal.
    #[must_use]
    pub fn pending(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            pending_registration: true,
            ..Self::new(hub_id, name)
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: CustomerProfile) -> Self {
        self.name = profile.name;
        self.category = profile.category;
        self.email = profile.email.map(|email| email.to_lowercase());
        self.phone = profile.phone;
        self.document = profile.document;
        self.billing_address = profile.billing_address;
        self
    }
}

/// Profile fields a customer fills in when registering.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    pub name: String,
    pub category: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub billing_address: Option<String>,
}

/// Patch data applied when a customer's profile is updated.
#[derive(Debug, Clone)]
pub struct UpdateCustomer {
    pub profile: CustomerProfile,
    /// `Some(false)` completes a pending registration.
    pub pending_registration: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl UpdateCustomer {
    pub fn new(profile: CustomerProfile) -> Self {
        Self {
            profile,
            pending_registration: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    pub fn complete_registration(mut self) -> Self {
        self.pending_registration = Some(false);
        self
    }
}

/// Query definition used to list customers of a hub.
#[derive(Debug, Clone)]
pub struct CustomerListQuery {
    pub hub_id: i32,
    pub search: Option<String>,
    pub pending_only: bool,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            search: None,
            pending_only: false,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn pending_only(mut self) -> Self {
        self.pending_only = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
