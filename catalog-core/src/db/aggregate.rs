//! Derived child counts.
//!
//! Counts are recomputed from the current rows on every read and never stored.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension};

use super::resolve::{MenuRecord, SubmenuRecord};
use crate::models::{EntityId, Menu, Submenu};

/// How a menu's `dishes_count` is derived.
///
/// - `FirstSubmenu`: dishes of the first submenu (lowest id) only. This is the
///   historical behavior clients were built against and stays the default.
/// - `AllSubmenus`: dishes across every submenu of the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DishCountPolicy {
    #[default]
    FirstSubmenu,
    AllSubmenus,
}

impl DishCountPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSubmenu => "first-submenu",
            Self::AllSubmenus => "all-submenus",
        }
    }
}

impl Display for DishCountPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DishCountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-submenu" => Ok(Self::FirstSubmenu),
            "all-submenus" => Ok(Self::AllSubmenus),
            other => Err(format!(
                "unknown dish count policy `{other}` (expected `first-submenu` or `all-submenus`)"
            )),
        }
    }
}

pub(crate) fn count_submenus(conn: &Connection, menu_id: EntityId) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM submenu WHERE menu_id = ?1",
        [menu_id],
        |row| row.get(0),
    )
}

pub(crate) fn count_dishes(conn: &Connection, submenu_id: EntityId) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM dish WHERE submenu_id = ?1",
        [submenu_id],
        |row| row.get(0),
    )
}

fn menu_dishes(
    conn: &Connection,
    menu_id: EntityId,
    policy: DishCountPolicy,
) -> rusqlite::Result<i64> {
    match policy {
        DishCountPolicy::FirstSubmenu => {
            let first: Option<EntityId> = conn
                .query_row(
                    "SELECT id FROM submenu WHERE menu_id = ?1 ORDER BY id LIMIT 1",
                    [menu_id],
                    |row| row.get(0),
                )
                .optional()?;
            match first {
                Some(submenu_id) => count_dishes(conn, submenu_id),
                None => Ok(0),
            }
        }
        DishCountPolicy::AllSubmenus => conn.query_row(
            "SELECT COUNT(*) FROM dish d
             JOIN submenu s ON d.submenu_id = s.id
             WHERE s.menu_id = ?1",
            [menu_id],
            |row| row.get(0),
        ),
    }
}

/// Attach `submenus_count` and `dishes_count` to a menu row.
pub(crate) fn menu(
    conn: &Connection,
    record: MenuRecord,
    policy: DishCountPolicy,
) -> rusqlite::Result<Menu> {
    let submenus_count = count_submenus(conn, record.id)?;
    // No submenus means no dishes; skip inspecting children.
    let dishes_count = if submenus_count == 0 {
        0
    } else {
        menu_dishes(conn, record.id, policy)?
    };

    Ok(Menu {
        id: record.id,
        title: record.title,
        description: record.description,
        submenus_count,
        dishes_count,
    })
}

/// Attach `dishes_count` to a submenu row.
pub(crate) fn submenu(conn: &Connection, record: SubmenuRecord) -> rusqlite::Result<Submenu> {
    let dishes_count = count_dishes(conn, record.id)?;
    Ok(Submenu {
        id: record.id,
        menu_id: record.menu_id,
        title: record.title,
        description: record.description,
        dishes_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_its_own_names() {
        for policy in [DishCountPolicy::FirstSubmenu, DishCountPolicy::AllSubmenus] {
            assert_eq!(policy.as_str().parse::<DishCountPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn policy_rejects_unknown_names() {
        assert!("sum".parse::<DishCountPolicy>().is_err());
    }

    #[test]
    fn default_policy_keeps_first_submenu_behavior() {
        assert_eq!(DishCountPolicy::default(), DishCountPolicy::FirstSubmenu);
    }
}
