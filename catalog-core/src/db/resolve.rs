//! Scoped lookups.
//!
//! Resolution walks the identifier path outermost first: the menu must exist, then the
//! submenu must exist *and* belong to that menu, then the dish must exist *and* belong to
//! that submenu. Each step is a plain conjunction of equality predicates. The first step
//! that fails produces [`CatalogError::NotFound`] naming the missing entity together with
//! the full path the caller supplied.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::{CatalogError, CatalogResult, EntityKind, ScopePath};
use crate::models::{Dish, EntityId};

/// Persisted menu columns, before counts are attached.
#[derive(Debug, Clone)]
pub(crate) struct MenuRecord {
    pub id: EntityId,
    pub title: String,
    pub description: String,
}

/// Persisted submenu columns, before counts are attached.
#[derive(Debug, Clone)]
pub(crate) struct SubmenuRecord {
    pub id: EntityId,
    pub menu_id: EntityId,
    pub title: String,
    pub description: String,
}

pub(crate) fn menu_from_row(row: &Row<'_>) -> rusqlite::Result<MenuRecord> {
    Ok(MenuRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
    })
}

pub(crate) fn submenu_from_row(row: &Row<'_>) -> rusqlite::Result<SubmenuRecord> {
    Ok(SubmenuRecord {
        id: row.get(0)?,
        menu_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
    })
}

pub(crate) fn dish_from_row(row: &Row<'_>) -> rusqlite::Result<Dish> {
    Ok(Dish {
        id: row.get(0)?,
        submenu_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        price: row.get(4)?,
    })
}

fn find_menu(conn: &Connection, menu_id: EntityId) -> rusqlite::Result<Option<MenuRecord>> {
    conn.query_row(
        "SELECT id, title, description FROM menu WHERE id = ?1",
        [menu_id],
        menu_from_row,
    )
    .optional()
}

fn find_submenu(
    conn: &Connection,
    menu_id: EntityId,
    submenu_id: EntityId,
) -> rusqlite::Result<Option<SubmenuRecord>> {
    conn.query_row(
        "SELECT id, menu_id, title, description FROM submenu
         WHERE id = ?1 AND menu_id = ?2",
        [submenu_id, menu_id],
        submenu_from_row,
    )
    .optional()
}

fn find_dish(
    conn: &Connection,
    submenu_id: EntityId,
    dish_id: EntityId,
) -> rusqlite::Result<Option<Dish>> {
    conn.query_row(
        "SELECT id, submenu_id, title, description, price FROM dish
         WHERE id = ?1 AND submenu_id = ?2",
        [dish_id, submenu_id],
        dish_from_row,
    )
    .optional()
}

pub(crate) fn menu(conn: &Connection, menu_id: EntityId) -> CatalogResult<MenuRecord> {
    find_menu(conn, menu_id)?
        .ok_or_else(|| CatalogError::not_found(EntityKind::Menu, ScopePath::menu(menu_id)))
}

pub(crate) fn submenu(
    conn: &Connection,
    menu_id: EntityId,
    submenu_id: EntityId,
) -> CatalogResult<SubmenuRecord> {
    let path = ScopePath::submenu(menu_id, submenu_id);
    walk_submenu(conn, path, menu_id, submenu_id)
}

pub(crate) fn dish(
    conn: &Connection,
    menu_id: EntityId,
    submenu_id: EntityId,
    dish_id: EntityId,
) -> CatalogResult<Dish> {
    let path = ScopePath::dish(menu_id, submenu_id, dish_id);
    let submenu = walk_submenu(conn, path, menu_id, submenu_id)?;
    find_dish(conn, submenu.id, dish_id)?
        .ok_or_else(|| CatalogError::not_found(EntityKind::Dish, path))
}

/// Resolve menu then submenu, reporting failures against the caller's full `path`.
fn walk_submenu(
    conn: &Connection,
    path: ScopePath,
    menu_id: EntityId,
    submenu_id: EntityId,
) -> CatalogResult<SubmenuRecord> {
    if find_menu(conn, menu_id)?.is_none() {
        return Err(CatalogError::not_found(EntityKind::Menu, path));
    }
    find_submenu(conn, menu_id, submenu_id)?
        .ok_or_else(|| CatalogError::not_found(EntityKind::Submenu, path))
}
