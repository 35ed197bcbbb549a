//! Weekly menu configuration of a hub and the rules that turn it into the
//! category list shown to staff and customers.
//!
//! Several maps act as exception lists: a category missing from
//! `active_categories` is active, and a client missing from
//! `client_category_settings` sees every category with the fixed dropdown
//! count.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::week::WORKING_DAYS;

/// Color used when neither the configuration nor the category defines one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6B7280";

/// Per-client override of one category.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientCategorySetting {
    /// Whether the client sees the category; absent means visible.
    #[serde(default)]
    pub visible: Option<bool>,
    /// Number of dropdowns offered to the client; absent falls back to the
    /// hub-wide fixed count.
    #[serde(default)]
    pub dropdowns: Option<u32>,
}

impl ClientCategorySetting {
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

fn default_available_days() -> Vec<i32> {
    WORKING_DAYS.to_vec()
}

/// Menu configuration document stored once per hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MenuConfig {
    /// Categories explicitly switched on or off; absent means active.
    #[serde(default)]
    pub active_categories: BTreeMap<i32, bool>,
    #[serde(default)]
    pub category_colors: BTreeMap<i32, String>,
    /// Explicit display order of category ids.
    #[serde(default)]
    pub category_order: Vec<i32>,
    /// Number of dropdowns each category offers by default.
    #[serde(default)]
    pub fixed_dropdowns: BTreeMap<i32, u32>,
    /// Days the menu is served, `0` (Sunday) to `6` (Saturday).
    #[serde(default = "default_available_days")]
    pub available_days: Vec<i32>,
    /// Category type values shown in the menu; empty shows every type.
    #[serde(default)]
    pub selected_main_categories: Vec<String>,
    /// Overrides keyed by customer id, then category id.
    #[serde(default)]
    pub client_category_settings: BTreeMap<i32, BTreeMap<i32, ClientCategorySetting>>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            active_categories: BTreeMap::new(),
            category_colors: BTreeMap::new(),
            category_order: Vec::new(),
            fixed_dropdowns: BTreeMap::new(),
            available_days: default_available_days(),
            selected_main_categories: Vec::new(),
            client_category_settings: BTreeMap::new(),
        }
    }
}

impl MenuConfig {
    pub fn is_category_active(&self, category_id: i32) -> bool {
        self.active_categories
            .get(&category_id)
            .copied()
            .unwrap_or(true)
    }

    /// Filter and order `categories` for display.
    ///
    /// Keeps the selected main category types (all when none is selected),
    /// drops categories switched off, then applies `category_order` when it is
    /// set. Categories missing from a non-empty order list are dropped.
    pub fn resolve_categories<'a>(&self, categories: &'a [Category]) -> Vec<&'a Category> {
        let filtered: Vec<&Category> = categories
            .iter()
            .filter(|category| {
                self.selected_main_categories.is_empty()
                    || self
                        .selected_main_categories
                        .iter()
                        .any(|value| *value == category.category_type)
            })
            .filter(|category| self.is_category_active(category.id))
            .collect();

        if self.category_order.is_empty() {
            return filtered;
        }

        let by_id: HashMap<i32, &Category> = filtered
            .iter()
            .map(|category| (category.id, *category))
            .collect();

        self.category_order
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .collect()
    }

    /// Color of a category: configuration override, then the category's own
    /// color, then [`DEFAULT_CATEGORY_COLOR`].
    pub fn category_color<'a>(&'a self, category: &'a Category) -> &'a str {
        self.category_colors
            .get(&category.id)
            .map(String::as_str)
            .or(category.color.as_deref())
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }

    pub fn client_setting(&self, client_id: i32, category_id: i32) -> ClientCategorySetting {
        self.client_category_settings
            .get(&client_id)
            .and_then(|settings| settings.get(&category_id))
            .copied()
            .unwrap_or_default()
    }

    /// Dropdown count for a client, falling back to the hub-wide fixed count
    /// and then to zero.
    pub fn effective_dropdowns(&self, client_id: i32, category_id: i32) -> u32 {
        self.client_setting(client_id, category_id)
            .dropdowns
            .or_else(|| self.fixed_dropdowns.get(&category_id).copied())
            .unwrap_or(0)
    }

    /// Resolved categories further limited to those visible to `client_id`.
    pub fn visible_categories_for_client<'a>(
        &self,
        categories: &'a [Category],
        client_id: i32,
    ) -> Vec<&'a Category> {
        self.resolve_categories(categories)
            .into_iter()
            .filter(|category| self.client_setting(client_id, category.id).is_visible())
            .collect()
    }

    pub fn is_day_available(&self, day: i32) -> bool {
        self.available_days.contains(&day)
    }

    /// Add or remove `day` from the available days. The last remaining day
    /// cannot be removed. Returns whether the configuration changed.
    pub fn toggle_day(&mut self, day: i32) -> bool {
        if !(0..=6).contains(&day) {
            return false;
        }

        if let Some(position) = self.available_days.iter().position(|value| *value == day) {
            if self.available_days.len() == 1 {
                return false;
            }
            self.available_days.remove(position);
        } else {
            self.available_days.push(day);
            self.available_days.sort_unstable();
        }

        true
    }
}

/// Category enriched with the values resolved from the configuration, as
/// rendered by the menu pages.
#[derive(Debug, Serialize, Clone)]
pub struct ResolvedCategory {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: String,
    pub color: String,
    pub dropdowns: u32,
}

impl ResolvedCategory {
    pub fn for_staff(config: &MenuConfig, category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            category_type: category.category_type.clone(),
            color: config.category_color(category).to_string(),
            dropdowns: config.fixed_dropdowns.get(&category.id).copied().unwrap_or(0),
        }
    }

    pub fn for_client(config: &MenuConfig, category: &Category, client_id: i32) -> Self {
        Self {
            dropdowns: config.effective_dropdowns(client_id, category.id),
            ..Self::for_staff(config, category)
        }
    }
}
