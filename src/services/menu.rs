use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::category::{Category, CategoryListQuery};
use crate::domain::menu_config::{MenuConfig, ResolvedCategory};
use crate::forms::menu::MenuConfigForm;
use crate::repository::{CategoryReader, MenuConfigReader, MenuConfigWriter};
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the menu configuration page.
#[derive(Debug, Serialize)]
pub struct MenuPageData {
    pub config: MenuConfig,
    /// Categories as shown on the menu, after filtering and ordering.
    pub menu: Vec<ResolvedCategory>,
    /// Every category of the hub, for the editor.
    pub categories: Vec<Category>,
}

/// Outcome of flipping one available day.
#[derive(Debug)]
pub struct DayToggle {
    pub config: MenuConfig,
    /// False when the toggle was refused, e.g. for the last remaining day.
    pub changed: bool,
}

/// Menu of a hub as seen by one customer.
#[derive(Debug, Serialize)]
pub struct ClientMenu {
    pub categories: Vec<ResolvedCategory>,
    pub available_days: Vec<i32>,
}

/// Loads the menu configuration of the user's hub.
pub fn load_menu_config<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<MenuConfig>
where
    R: MenuConfigReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_menu_config(user.hub_id)
        .map_err(ServiceError::from)
}

/// Loads the menu configuration page.
pub fn load_menu_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<MenuPageData>
where
    R: CategoryReader + MenuConfigReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let config = repo
        .get_menu_config(user.hub_id)
        .map_err(ServiceError::from)?;
    let categories = repo
        .list_categories(CategoryListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;

    let menu = config
        .resolve_categories(&categories)
        .into_iter()
        .map(|category| ResolvedCategory::for_staff(&config, category))
        .collect();

    Ok(MenuPageData {
        config,
        menu,
        categories,
    })
}

/// Replaces the menu configuration of the user's hub.
pub fn save_menu_config<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: MenuConfigForm,
) -> ServiceResult<MenuConfig>
where
    R: MenuConfigWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let config = form
        .into_menu_config()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.save_menu_config(user.hub_id, &config)
        .map_err(ServiceError::from)
}

/// Adds or removes a serving day. Refused toggles are not persisted.
pub fn toggle_available_day<R>(
    repo: &R,
    user: &AuthenticatedUser,
    day: i32,
) -> ServiceResult<DayToggle>
where
    R: MenuConfigReader + MenuConfigWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut config = repo
        .get_menu_config(user.hub_id)
        .map_err(ServiceError::from)?;

    if !config.toggle_day(day) {
        return Ok(DayToggle {
            config,
            changed: false,
        });
    }

    let config = repo
        .save_menu_config(user.hub_id, &config)
        .map_err(ServiceError::from)?;

    Ok(DayToggle {
        config,
        changed: true,
    })
}

/// Builds the menu a customer of `hub_id` sees. Used by the public portal,
/// so no role is checked.
pub fn load_client_menu<R>(repo: &R, hub_id: i32, customer_id: i32) -> ServiceResult<ClientMenu>
where
    R: CategoryReader + MenuConfigReader + ?Sized,
{
    let config = repo.get_menu_config(hub_id).map_err(ServiceError::from)?;
    let categories = repo
        .list_categories(CategoryListQuery::new(hub_id))
        .map_err(ServiceError::from)?;

    let resolved = config
        .visible_categories_for_client(&categories, customer_id)
        .into_iter()
        .map(|category| ResolvedCategory::for_client(&config, category, customer_id))
        .collect();

    Ok(ClientMenu {
        categories: resolved,
        available_days: config.available_days,
    })
}
