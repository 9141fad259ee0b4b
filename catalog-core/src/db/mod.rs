pub mod aggregate;
mod resolve;
mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use rusqlite::{Connection, Transaction};

pub use aggregate::DishCountPolicy;

use crate::error::{CatalogError, CatalogResult, EntityKind};
use crate::models::*;
use resolve::{MenuRecord, SubmenuRecord};

/// Handle to the catalog store.
///
/// Clones share one SQLite connection. Every operation locks it and runs inside its own
/// transaction, which commits on success and rolls back when dropped on any error path.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    dish_count: DishCountPolicy,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        tracing::debug!("Opened catalog database at {}", path.display());
        Ok(Self::from_connection(conn))
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "menu-catalog")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("menu_catalog.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            dish_count: DishCountPolicy::default(),
        }
    }

    /// Choose how a menu's `dishes_count` is derived.
    pub fn with_dish_count_policy(mut self, policy: DishCountPolicy) -> Self {
        self.dish_count = policy;
        self
    }

    pub fn dish_count_policy(&self) -> DishCountPolicy {
        self.dish_count
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock();
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // Transactions roll back on unwind, so a poisoned connection is still clean.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` in a fresh transaction, committing only if it returns `Ok`.
    fn transaction<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> CatalogResult<T>,
    ) -> CatalogResult<T> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    // ============================================================
    // Menu operations
    // ============================================================

    pub fn list_menus(&self) -> CatalogResult<Vec<Menu>> {
        self.transaction(|tx| {
            let mut stmt = tx.prepare("SELECT id, title, description FROM menu ORDER BY id")?;
            let records = stmt
                .query_map([], resolve::menu_from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            let menus = records
                .into_iter()
                .map(|record| aggregate::menu(tx, record, self.dish_count))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(menus)
        })
    }

    pub fn get_menu(&self, menu_id: EntityId) -> CatalogResult<Menu> {
        self.transaction(|tx| {
            let record = resolve::menu(tx, menu_id)?;
            Ok(aggregate::menu(tx, record, self.dish_count)?)
        })
    }

    pub fn create_menu(&self, input: CreateMenuInput) -> CatalogResult<Menu> {
        input.validate()?;
        self.transaction(|tx| {
            tx.execute(
                "INSERT INTO menu (id, title, description) VALUES (?1, ?2, ?3)",
                (input.id, &input.title, &input.description),
            )
            .map_err(|e| CatalogError::from_write(EntityKind::Menu, e))?;
            let id = tx.last_insert_rowid();
            tracing::debug!(menu_id = id, "Created menu");

            Ok(Menu {
                id,
                title: input.title,
                description: input.description,
                submenus_count: 0,
                dishes_count: 0,
            })
        })
    }

    pub fn update_menu(&self, menu_id: EntityId, input: UpdateMenuInput) -> CatalogResult<Menu> {
        input.validate()?;
        self.transaction(|tx| {
            resolve::menu(tx, menu_id)?;
            tx.execute(
                "UPDATE menu SET title = ?1, description = ?2 WHERE id = ?3",
                (&input.title, &input.description, menu_id),
            )
            .map_err(|e| CatalogError::from_write(EntityKind::Menu, e))?;
            tracing::debug!(menu_id, "Updated menu");

            let record = MenuRecord {
                id: menu_id,
                title: input.title,
                description: input.description,
            };
            Ok(aggregate::menu(tx, record, self.dish_count)?)
        })
    }

    /// Delete a menu with all of its submenus and dishes.
    ///
    /// Returns `false` without failing when the menu does not exist.
    pub fn delete_menu(&self, menu_id: EntityId) -> CatalogResult<bool> {
        self.transaction(|tx| match resolve::menu(tx, menu_id) {
            Ok(menu) => {
                tx.execute("DELETE FROM menu WHERE id = ?1", [menu.id])?;
                tracing::debug!(menu_id, "Deleted menu");
                Ok(true)
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!(menu_id, "Delete of absent menu ignored");
                Ok(false)
            }
            Err(err) => Err(err),
        })
    }

    // ============================================================
    // Submenu operations
    // ============================================================

    /// Submenus of `menu_id`. An unknown menu yields an empty list.
    pub fn list_submenus(&self, menu_id: EntityId) -> CatalogResult<Vec<Submenu>> {
        self.transaction(|tx| {
            let mut stmt = tx.prepare(
                "SELECT id, menu_id, title, description FROM submenu
                 WHERE menu_id = ?1 ORDER BY id",
            )?;
            let records = stmt
                .query_map([menu_id], resolve::submenu_from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            let submenus = records
                .into_iter()
                .map(|record| aggregate::submenu(tx, record))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(submenus)
        })
    }

    pub fn get_submenu(&self, menu_id: EntityId, submenu_id: EntityId) -> CatalogResult<Submenu> {
        self.transaction(|tx| {
            let record = resolve::submenu(tx, menu_id, submenu_id)?;
            Ok(aggregate::submenu(tx, record)?)
        })
    }

    pub fn create_submenu(
        &self,
        menu_id: EntityId,
        input: CreateSubmenuInput,
    ) -> CatalogResult<Submenu> {
        input.validate()?;
        self.transaction(|tx| {
            let menu = resolve::menu(tx, menu_id)?;
            tx.execute(
                "INSERT INTO submenu (menu_id, title, description) VALUES (?1, ?2, ?3)",
                (menu.id, &input.title, &input.description),
            )
            .map_err(|e| CatalogError::from_write(EntityKind::Submenu, e))?;
            let id = tx.last_insert_rowid();
            tracing::debug!(menu_id, submenu_id = id, "Created submenu");

            Ok(Submenu {
                id,
                menu_id: menu.id,
                title: input.title,
                description: input.description,
                dishes_count: 0,
            })
        })
    }

    pub fn update_submenu(
        &self,
        menu_id: EntityId,
        submenu_id: EntityId,
        input: UpdateSubmenuInput,
    ) -> CatalogResult<Submenu> {
        input.validate()?;
        self.transaction(|tx| {
            let existing = resolve::submenu(tx, menu_id, submenu_id)?;
            tx.execute(
                "UPDATE submenu SET title = ?1, description = ?2 WHERE id = ?3",
                (&input.title, &input.description, existing.id),
            )
            .map_err(|e| CatalogError::from_write(EntityKind::Submenu, e))?;
            tracing::debug!(menu_id, submenu_id, "Updated submenu");

            let record = SubmenuRecord {
                title: input.title,
                description: input.description,
                ..existing
            };
            Ok(aggregate::submenu(tx, record)?)
        })
    }

    /// Delete a submenu with all of its dishes.
    ///
    /// Returns `false` without failing when the submenu does not resolve under `menu_id`.
    pub fn delete_submenu(&self, menu_id: EntityId, submenu_id: EntityId) -> CatalogResult<bool> {
        self.transaction(|tx| match resolve::submenu(tx, menu_id, submenu_id) {
            Ok(submenu) => {
                tx.execute("DELETE FROM submenu WHERE id = ?1", [submenu.id])?;
                tracing::debug!(menu_id, submenu_id, "Deleted submenu");
                Ok(true)
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!(menu_id, submenu_id, "Delete of absent submenu ignored");
                Ok(false)
            }
            Err(err) => Err(err),
        })
    }

    // ============================================================
    // Dish operations
    // ============================================================

    /// Dishes of a submenu. Yields an empty list when the submenu path does not resolve.
    pub fn list_dishes(&self, menu_id: EntityId, submenu_id: EntityId) -> CatalogResult<Vec<Dish>> {
        self.transaction(|tx| {
            let submenu = match resolve::submenu(tx, menu_id, submenu_id) {
                Ok(submenu) => submenu,
                Err(err) if err.is_not_found() => return Ok(Vec::new()),
                Err(err) => return Err(err),
            };

            let mut stmt = tx.prepare(
                "SELECT id, submenu_id, title, description, price FROM dish
                 WHERE submenu_id = ?1 ORDER BY id",
            )?;
            let dishes = stmt
                .query_map([submenu.id], resolve::dish_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(dishes)
        })
    }

    pub fn get_dish(
        &self,
        menu_id: EntityId,
        submenu_id: EntityId,
        dish_id: EntityId,
    ) -> CatalogResult<Dish> {
        self.transaction(|tx| resolve::dish(tx, menu_id, submenu_id, dish_id))
    }

    pub fn create_dish(
        &self,
        menu_id: EntityId,
        submenu_id: EntityId,
        input: CreateDishInput,
    ) -> CatalogResult<Dish> {
        input.validate()?;
        self.transaction(|tx| {
            let submenu = resolve::submenu(tx, menu_id, submenu_id)?;
            tx.execute(
                "INSERT INTO dish (submenu_id, title, description, price) VALUES (?1, ?2, ?3, ?4)",
                (submenu.id, &input.title, &input.description, input.price),
            )
            .map_err(|e| CatalogError::from_write(EntityKind::Dish, e))?;
            let id = tx.last_insert_rowid();
            tracing::debug!(menu_id, submenu_id, dish_id = id, "Created dish");

            Ok(Dish {
                id,
                submenu_id: submenu.id,
                title: input.title,
                description: input.description,
                price: input.price,
            })
        })
    }

    pub fn update_dish(
        &self,
        menu_id: EntityId,
        submenu_id: EntityId,
        dish_id: EntityId,
        input: UpdateDishInput,
    ) -> CatalogResult<Dish> {
        input.validate()?;
        self.transaction(|tx| {
            let existing = resolve::dish(tx, menu_id, submenu_id, dish_id)?;
            tx.execute(
                "UPDATE dish SET title = ?1, description = ?2, price = ?3 WHERE id = ?4",
                (&input.title, &input.description, input.price, existing.id),
            )
            .map_err(|e| CatalogError::from_write(EntityKind::Dish, e))?;
            tracing::debug!(menu_id, submenu_id, dish_id, "Updated dish");

            Ok(Dish {
                title: input.title,
                description: input.description,
                price: input.price,
                ..existing
            })
        })
    }

    /// Delete one dish. Unlike menus and submenus, an absent dish is an error.
    pub fn delete_dish(
        &self,
        menu_id: EntityId,
        submenu_id: EntityId,
        dish_id: EntityId,
    ) -> CatalogResult<()> {
        self.transaction(|tx| {
            let dish = resolve::dish(tx, menu_id, submenu_id, dish_id)?;
            tx.execute("DELETE FROM dish WHERE id = ?1", [dish.id])?;
            tracing::debug!(menu_id, submenu_id, dish_id, "Deleted dish");
            Ok(())
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            dish_count: self.dish_count,
        }
    }
}
