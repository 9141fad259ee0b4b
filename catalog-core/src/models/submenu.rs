use serde::{Deserialize, Serialize};

use super::{require_title, EntityId};
use crate::error::CatalogResult;

/// A submenu nested under exactly one [`super::Menu`].
///
/// Titles are unique across all submenus, not just within the owning menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submenu {
    pub id: EntityId,
    pub menu_id: EntityId,
    pub title: String,
    pub description: String,
    pub dishes_count: i64,
}

/// Input for creating a submenu. The id is always assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubmenuInput {
    pub title: String,
    pub description: String,
}

impl CreateSubmenuInput {
    pub fn validate(&self) -> CatalogResult<()> {
        require_title(&self.title)
    }
}

/// Input for updating a submenu. Replaces every mutable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubmenuInput {
    pub title: String,
    pub description: String,
}

impl UpdateSubmenuInput {
    pub fn validate(&self) -> CatalogResult<()> {
        require_title(&self.title)
    }
}
