pub mod api;
pub mod config;

pub use catalog_core::{db, error, models};
