use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::menu_config::MenuConfig;
use crate::forms::sanitize_inline_text;

/// Upper bound for the dropdown count of a category.
const MAX_DROPDOWNS: u32 = 20;

pub type MenuConfigFormResult<T> = Result<T, MenuConfigFormError>;

#[derive(Debug, Error, PartialEq)]
pub enum MenuConfigFormError {
    #[error("day {0} is outside 0..=6")]
    InvalidDay(i32),
    #[error("at least one available day is required")]
    NoAvailableDays,
    #[error("invalid color `{color}` for category {category_id}")]
    InvalidColor { category_id: i32, color: String },
    #[error("category {category_id} asks for {dropdowns} dropdowns, at most 20 allowed")]
    TooManyDropdowns { category_id: i32, dropdowns: u32 },
}

/// Menu configuration document as sent by the menu editor.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct MenuConfigForm {
    pub config: MenuConfig,
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
        }
        None => false,
    }
}

impl MenuConfigForm {
    /// Check the document and normalize it: days sorted and deduplicated,
    /// colors uppercased and blank type selections dropped.
    pub fn into_menu_config(self) -> MenuConfigFormResult<MenuConfig> {
        let mut config = self.config;

        if let Some(day) = config.available_days.iter().find(|day| !(0..=6).contains(*day)) {
            return Err(MenuConfigFormError::InvalidDay(*day));
        }
        config.available_days.sort_unstable();
        config.available_days.dedup();
        if config.available_days.is_empty() {
            return Err(MenuConfigFormError::NoAvailableDays);
        }

        for (category_id, color) in config.category_colors.iter_mut() {
            let trimmed = color.trim();
            if !is_hex_color(trimmed) {
                return Err(MenuConfigFormError::InvalidColor {
                    category_id: *category_id,
                    color: color.clone(),
                });
            }
            *color = trimmed.to_uppercase();
        }

        let fixed = config
            .fixed_dropdowns
            .iter()
            .map(|(category_id, dropdowns)| (*category_id, *dropdowns));
        let per_client = config
            .client_category_settings
            .values()
            .flat_map(|settings| settings.iter())
            .filter_map(|(category_id, setting)| {
                setting.dropdowns.map(|dropdowns| (*category_id, dropdowns))
            });
        if let Some((category_id, dropdowns)) = fixed
            .chain(per_client)
            .find(|(_, dropdowns)| *dropdowns > MAX_DROPDOWNS)
        {
            return Err(MenuConfigFormError::TooManyDropdowns {
                category_id,
                dropdowns,
            });
        }

        config.selected_main_categories = config
            .selected_main_categories
            .iter()
            .map(|value| sanitize_inline_text(value))
            .filter(|value| !value.is_empty())
            .collect();

        let mut seen = HashSet::new();
        config.category_order.retain(|id| seen.insert(*id));

        Ok(config)
    }
}
