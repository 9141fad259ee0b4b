//! Domain models for the menu catalog.
//!
//! # Hierarchy
//!
//! - [`Menu`]: top-level catalog entry owning zero or more submenus.
//! - [`Submenu`]: owned by exactly one menu, owns zero or more dishes.
//! - [`Dish`]: leaf entry owned by exactly one submenu.
//!
//! Parent links (`menu_id`, `submenu_id`) are fixed at creation. Deleting a parent
//! removes its whole subtree.
//!
//! ## Derived counts
//!
//! `submenus_count` and `dishes_count` are never persisted. They are computed on every
//! read by [`crate::db::aggregate`], so they always reflect the current children.

mod dish;
mod menu;
mod submenu;

pub use dish::*;
pub use menu::*;
pub use submenu::*;

use crate::error::{CatalogError, CatalogResult};

/// Surrogate key type shared by all three tables.
pub type EntityId = i64;

pub(crate) fn require_title(title: &str) -> CatalogResult<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::Validation("title must not be blank".to_string()));
    }
    Ok(())
}
