use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Top-level grouping of categories, such as "Cardápio" or "Bebidas".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryType {
    pub id: i32,
    pub hub_id: i32,
    /// Stable key referenced by [`Category::category_type`].
    pub value: String,
    /// Label shown to users.
    pub label: String,
    pub position: i32,
}

/// Payload used to insert or replace a category type.
#[derive(Debug, Clone)]
pub struct NewCategoryType {
    pub hub_id: i32,
    pub value: String,
    pub label: String,
    pub position: i32,
}

impl NewCategoryType {
    pub fn new(hub_id: i32, value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            hub_id,
            value: value.into(),
            label: label.into(),
            position: 0,
        }
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }
}

/// Node of the category tree belonging to a hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    /// Value of the [`CategoryType`] this category belongs to.
    #[serde(rename = "type")]
    pub category_type: String,
    /// Depth in the tree, starting at 1.
    pub level: i32,
    pub parent_id: Option<i32>,
    pub color: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub hub_id: i32,
    pub name: String,
    pub category_type: String,
    pub level: i32,
    pub parent_id: Option<i32>,
    pub color: Option<String>,
    pub position: i32,
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    pub fn new(hub_id: i32, name: impl Into<String>, category_type: impl Into<String>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            category_type: category_type.into(),
            level: 1,
            parent_id: None,
            color: None,
            position: 0,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach the category below `parent_id` at the given depth.
    pub fn with_parent(mut self, parent_id: i32, level: i32) -> Self {
        self.parent_id = Some(parent_id);
        self.level = level;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
    pub color: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    pub fn new(name: String, color: Option<String>, position: i32, is_active: bool) -> Self {
        Self {
            name,
            color,
            position,
            is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list the categories of a hub.
#[derive(Debug, Clone)]
pub struct CategoryListQuery {
    pub hub_id: i32,
    pub category_type: Option<String>,
    pub include_inactive: bool,
}

impl CategoryListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            category_type: None,
            include_inactive: false,
        }
    }

    pub fn category_type(mut self, value: impl Into<String>) -> Self {
        self.category_type = Some(value.into());
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }
}

/// Category together with its sub-categories, as served by the category API.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CategoryTreeNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryTreeNode>,
}

impl CategoryTreeNode {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl Into<Vec<CategoryTreeNode>>) -> Self {
        self.children = children.into();
        self
    }
}
