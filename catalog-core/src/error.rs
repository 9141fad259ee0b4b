//! Error taxonomy for catalog operations.

use std::fmt::{Display, Formatter};

use rusqlite::ffi;
use thiserror::Error;

use crate::models::EntityId;

/// The three entity types of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Menu,
    Submenu,
    Dish,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Submenu => "submenu",
            Self::Dish => "dish",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier path supplied by the caller, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopePath {
    pub menu_id: EntityId,
    pub submenu_id: Option<EntityId>,
    pub dish_id: Option<EntityId>,
}

impl ScopePath {
    pub fn menu(menu_id: EntityId) -> Self {
        Self {
            menu_id,
            submenu_id: None,
            dish_id: None,
        }
    }

    pub fn submenu(menu_id: EntityId, submenu_id: EntityId) -> Self {
        Self {
            menu_id,
            submenu_id: Some(submenu_id),
            dish_id: None,
        }
    }

    pub fn dish(menu_id: EntityId, submenu_id: EntityId, dish_id: EntityId) -> Self {
        Self {
            menu_id,
            submenu_id: Some(submenu_id),
            dish_id: Some(dish_id),
        }
    }
}

impl Display for ScopePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "menu_id={}", self.menu_id)?;
        if let Some(submenu_id) = self.submenu_id {
            write!(f, ", submenu_id={submenu_id}")?;
        }
        if let Some(dish_id) = self.dish_id {
            write!(f, ", dish_id={dish_id}")?;
        }
        Ok(())
    }
}

/// Errors surfaced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The entity, or an ancestor in its path, does not exist.
    #[error("{kind} not found ({path})")]
    NotFound { kind: EntityKind, path: ScopePath },

    /// A uniqueness or referential constraint rejected the write.
    #[error("{kind} constraint violated: {reason}")]
    ConstraintViolation { kind: EntityKind, reason: String },

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl CatalogError {
    pub fn not_found(kind: EntityKind, path: ScopePath) -> Self {
        Self::NotFound { kind, path }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Classify a failed INSERT/UPDATE against the table for `kind`.
    pub(crate) fn from_write(kind: EntityKind, err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let reason = match failure.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE => {
                        format!("a {kind} with this title already exists")
                    }
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        format!("a {kind} with this id already exists")
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => format!("parent of {kind} does not exist"),
                    _ => message.unwrap_or_else(|| failure.to_string()),
                };
                Self::ConstraintViolation { kind, reason }
            }
            other => Self::Storage(other),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
