use serde::{Deserialize, Serialize};

use super::{require_title, EntityId};
use crate::error::{CatalogError, CatalogResult};

/// A top-level menu.
///
/// Titles are unique across all menus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    /// Number of submenus currently under this menu.
    pub submenus_count: i64,
    /// Dish count as defined by the active [`crate::db::DishCountPolicy`].
    pub dishes_count: i64,
}

/// Input for creating a menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuInput {
    /// Explicit id. When absent the store assigns one.
    #[serde(default)]
    pub id: Option<EntityId>,
    pub title: String,
    pub description: String,
}

impl CreateMenuInput {
    pub fn validate(&self) -> CatalogResult<()> {
        if let Some(id) = self.id {
            if id <= 0 {
                return Err(CatalogError::Validation(format!(
                    "menu id must be positive, got {id}"
                )));
            }
        }
        require_title(&self.title)
    }
}

/// Input for updating a menu. Replaces every mutable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMenuInput {
    pub title: String,
    pub description: String,
}

impl UpdateMenuInput {
    pub fn validate(&self) -> CatalogResult<()> {
        require_title(&self.title)
    }
}
