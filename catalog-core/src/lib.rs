//! Core of the menu catalog: the Menu → Submenu → Dish hierarchy, its SQLite store,
//! scoped lookups, derived counts and cascading mutations.

pub mod db;
pub mod error;
pub mod models;

pub use error::{CatalogError, CatalogResult, EntityKind, ScopePath};
