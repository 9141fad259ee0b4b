use serde::{Deserialize, Serialize};

use super::{require_title, EntityId};
use crate::error::{CatalogError, CatalogResult};

/// A dish nested under exactly one [`super::Submenu`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: EntityId,
    pub submenu_id: EntityId,
    pub title: String,
    pub description: String,
    /// Currency-agnostic price.
    pub price: f64,
}

/// Input for creating a dish. The id is always assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDishInput {
    pub title: String,
    pub description: String,
    pub price: f64,
}

impl CreateDishInput {
    pub fn validate(&self) -> CatalogResult<()> {
        require_title(&self.title)?;
        require_price(self.price)
    }
}

/// Input for updating a dish. Replaces every mutable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDishInput {
    pub title: String,
    pub description: String,
    pub price: f64,
}

impl UpdateDishInput {
    pub fn validate(&self) -> CatalogResult<()> {
        require_title(&self.title)?;
        require_price(self.price)
    }
}

fn require_price(price: f64) -> CatalogResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}
