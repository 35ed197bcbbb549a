//! Public customer portal: registration links, self-service registration and
//! ordering from the hub's menu.
//!
//! Portal pages are reached through a link and carry no staff session. A
//! link names either a customer by its random public id or a one-time
//! registration token of a hub.

use std::fmt;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::repository::errors::RepositoryError;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::order::{Order, OrderListQuery, OrderStatus};
use crate::domain::recipe::Recipe;
use crate::domain::registration_token::NewRegistrationToken;
use crate::forms::customers::{InviteCustomerForm, RegistrationForm};
use crate::forms::orders::PortalOrderForm;
use crate::repository::{
    CategoryReader, CustomerReader, CustomerWriter, MenuConfigReader, OrderReader, OrderWriter,
    RecipeReader, RegistrationTokenReader, RegistrationTokenWriter,
};
use crate::services::menu::{ClientMenu, load_client_menu};
use crate::services::orders::{find_order_for_day, list_catalog, price_items, upsert_order};
use crate::services::{ServiceError, ServiceResult};

const TEMP_PREFIX: &str = "temp-";

fn is_reference_text(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Customer reference found in a portal URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalCustomerRef {
    /// A stored customer, by its public id.
    Existing(String),
    /// A registration token whose customer does not exist yet.
    Pending { hub_id: i32, token: String },
}

impl PortalCustomerRef {
    /// Parses `temp-{hub}-{token}` or a customer public id.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Some(rest) = raw.strip_prefix(TEMP_PREFIX) {
            let (hub_id, token) = rest.split_once('-')?;
            let hub_id: i32 = hub_id.parse().ok().filter(|id| *id > 0)?;
            if !is_reference_text(token) {
                return None;
            }
            return Some(Self::Pending {
                hub_id,
                token: token.to_string(),
            });
        }

        is_reference_text(raw).then(|| Self::Existing(raw.to_string()))
    }
}

impl fmt::Display for PortalCustomerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(public_id) => write!(f, "{public_id}"),
            Self::Pending { hub_id, token } => write!(f, "{TEMP_PREFIX}{hub_id}-{token}"),
        }
    }
}

fn parse_reference(raw: &str) -> ServiceResult<PortalCustomerRef> {
    PortalCustomerRef::parse(raw).ok_or(ServiceError::NotFound)
}

fn find_customer<R>(repo: &R, public_id: &str) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    repo.find_customer_by_public_id(public_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Customer of an existing reference. Registration tokens have none yet.
fn registered_customer<R>(repo: &R, reference: &PortalCustomerRef) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    let PortalCustomerRef::Existing(public_id) = reference else {
        return Err(ServiceError::Unauthorized);
    };

    let customer = find_customer(repo, public_id)?;
    if customer.pending_registration {
        return Err(ServiceError::Unauthorized);
    }
    Ok(customer)
}

/// Menu and catalog offered to a registered customer.
#[derive(Debug, Serialize)]
pub struct PortalMenu {
    pub customer: Customer,
    pub menu: ClientMenu,
    pub recipes: Vec<Recipe>,
}

/// What the portal landing page shows.
#[derive(Debug)]
pub enum PortalView {
    /// The customer has to fill in the registration form first.
    RegistrationRequired {
        reference: PortalCustomerRef,
        customer: Option<Customer>,
    },
    Menu(PortalMenu),
}

/// Resolves a portal link to either the registration form or the menu.
///
/// Tokens that were never issued or are already redeemed are not found.
pub fn load_portal<R>(repo: &R, reference: &str) -> ServiceResult<PortalView>
where
    R: CustomerReader
        + CategoryReader
        + MenuConfigReader
        + RecipeReader
        + RegistrationTokenReader
        + ?Sized,
{
    let reference = parse_reference(reference)?;

    let customer = match &reference {
        PortalCustomerRef::Pending { hub_id, token } => {
            let issued = repo
                .get_registration_token(*hub_id, token)
                .map_err(ServiceError::from)?
                .ok_or(ServiceError::NotFound)?;
            if issued.is_redeemed() {
                return Err(ServiceError::NotFound);
            }
            None
        }
        PortalCustomerRef::Existing(public_id) => Some(find_customer(repo, public_id)?),
    };

    let Some(customer) = customer else {
        return Ok(PortalView::RegistrationRequired {
            reference,
            customer: None,
        });
    };

    if customer.pending_registration {
        return Ok(PortalView::RegistrationRequired {
            reference,
            customer: Some(customer),
        });
    }

    let menu = load_client_menu(repo, customer.hub_id, customer.id)?;
    let recipes = list_catalog(repo, customer.hub_id)?;

    Ok(PortalView::Menu(PortalMenu {
        customer,
        menu,
        recipes,
    }))
}

/// Completes the self-service registration behind a portal link.
///
/// A registration token creates the customer and is consumed with it. A
/// pending customer is completed exactly once. Completing either again is a
/// conflict.
pub fn complete_registration<R>(
    repo: &R,
    reference: &str,
    form: RegistrationForm,
) -> ServiceResult<Customer>
where
    R: CustomerReader
        + CustomerWriter
        + RegistrationTokenReader
        + RegistrationTokenWriter
        + ?Sized,
{
    let reference = parse_reference(reference)?;

    let profile = form
        .into_profile()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    match reference {
        PortalCustomerRef::Pending { hub_id, token } => {
            let issued = repo
                .get_registration_token(hub_id, &token)
                .map_err(ServiceError::from)?
                .ok_or(ServiceError::NotFound)?;
            if issued.is_redeemed() {
                return Err(ServiceError::Conflict);
            }

            let new_customer = NewCustomer::new(hub_id, profile.name.clone()).with_profile(profile);
            match repo.redeem_registration_token(hub_id, &token, &new_customer) {
                Ok(customer) => Ok(customer),
                // Redeemed by another request in between.
                Err(RepositoryError::NotFound) => Err(ServiceError::Conflict),
                Err(err) => Err(ServiceError::from(err)),
            }
        }
        PortalCustomerRef::Existing(public_id) => {
            let customer = find_customer(repo, &public_id)?;

            if !customer.pending_registration {
                return Err(ServiceError::Conflict);
            }

            let updates = UpdateCustomer::new(profile).complete_registration();
            match repo.update_customer(customer.id, customer.hub_id, &updates) {
                Ok(customer) => Ok(customer),
                // Another request completed the registration in between.
                Err(RepositoryError::NotFound) => Err(ServiceError::Conflict),
                Err(err) => Err(ServiceError::from(err)),
            }
        }
    }
}

/// Stores the order a customer submits through the portal.
///
/// Prices come from the recipe catalog. Orders the kitchen already confirmed
/// or delivered cannot be changed from the portal.
pub fn save_portal_order<R>(
    repo: &R,
    reference: &str,
    form: PortalOrderForm,
) -> ServiceResult<Order>
where
    R: CustomerReader + MenuConfigReader + RecipeReader + OrderReader + OrderWriter + ?Sized,
{
    let reference = parse_reference(reference)?;
    let customer = registered_customer(repo, &reference)?;

    let config = repo
        .get_menu_config(customer.hub_id)
        .map_err(ServiceError::from)?;
    if !config.is_day_available(form.day_of_week) {
        return Err(ServiceError::Form(
            "Este dia não está disponível para pedidos.".to_string(),
        ));
    }

    let mut payload = form
        .into_order_form(customer.id)
        .into_payload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let recipes = list_catalog(repo, customer.hub_id)?;
    payload.items = price_items(&recipes, payload.items)?;

    let existing = find_order_for_day(repo, customer.hub_id, &payload)?;
    if existing.as_ref().is_some_and(|order| {
        matches!(order.status, OrderStatus::Confirmed | OrderStatus::Delivered)
    }) {
        return Err(ServiceError::Conflict);
    }

    upsert_order(repo, customer.hub_id, existing.as_ref(), &payload)
}

/// Order history shown in the portal.
#[derive(Serialize)]
pub struct PortalOrders {
    pub customer: Customer,
    pub orders: Paginated<Order>,
}

pub fn load_portal_orders<R>(repo: &R, reference: &str, page: usize) -> ServiceResult<PortalOrders>
where
    R: CustomerReader + OrderReader + ?Sized,
{
    let reference = parse_reference(reference)?;
    let customer = registered_customer(repo, &reference)?;

    let query = OrderListQuery::new(customer.hub_id)
        .customer_id(customer.id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, orders) = repo.list_orders(query).map_err(ServiceError::from)?;

    Ok(PortalOrders {
        customer,
        orders: Paginated::new(orders, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE)),
    })
}

/// Link handed to a customer so they can register themselves.
#[derive(Debug, Serialize)]
pub struct RegistrationLink {
    pub reference: String,
    pub url: String,
    pub customer: Option<Customer>,
}

/// Creates a registration link for the user's hub.
pub fn create_registration_link<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: InviteCustomerForm,
    portal_base_url: &str,
) -> ServiceResult<RegistrationLink>
where
    R: CustomerWriter + RegistrationTokenWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let name = form
        .into_name()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let (reference, customer) = match name {
        Some(name) => {
            let customer = repo
                .create_customer(&NewCustomer::pending(user.hub_id, name))
                .map_err(ServiceError::from)?;
            (PortalCustomerRef::Existing(customer.public_id.clone()), Some(customer))
        }
        None => {
            let issued = repo
                .create_registration_token(&NewRegistrationToken::issue(user.hub_id))
                .map_err(ServiceError::from)?;
            let reference = PortalCustomerRef::Pending {
                hub_id: issued.hub_id,
                token: issued.token,
            };
            (reference, None)
        }
    };

    let reference = reference.to_string();
    Ok(RegistrationLink {
        url: format!(
            "{}/portal/{reference}",
            portal_base_url.trim_end_matches('/')
        ),
        reference,
        customer,
    })
}
