//! Command line and environment configuration.
//!
//! Every option can be given as a flag or through its `MENU_CATALOG_*` variable.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::db::{Database, DishCountPolicy};

/// Where the catalog is stored and how derived counts behave.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// SQLite database file. Defaults to the platform data directory.
    #[arg(long, env = "MENU_CATALOG_DATABASE")]
    pub database: Option<PathBuf>,

    /// Keep the catalog in memory only; everything is lost on exit.
    /// Takes precedence over `--database`.
    #[arg(long)]
    pub memory: bool,

    /// How a menu's dishes_count is derived: `first-submenu` or `all-submenus`
    #[arg(
        long,
        env = "MENU_CATALOG_DISH_COUNT",
        default_value_t = DishCountPolicy::FirstSubmenu
    )]
    pub dish_count: DishCountPolicy,
}

impl DatabaseArgs {
    /// Open the configured database and bring its schema up to date.
    pub fn open(&self) -> anyhow::Result<Database> {
        let db = if self.memory {
            tracing::warn!("Using an in-memory catalog; data will not survive a restart");
            Database::open_memory()?
        } else {
            let path = match &self.database {
                Some(path) => path.clone(),
                None => Database::default_path()?,
            };
            tracing::info!("Using catalog database {}", path.display());
            Database::open(path.clone())
                .with_context(|| format!("Failed to open database {}", path.display()))?
        };

        db.migrate().context("Failed to migrate database")?;
        Ok(db.with_dish_count_policy(self.dish_count))
    }
}

/// Options for the HTTP server.
#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "MENU_CATALOG_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port for HTTP API
    #[arg(short, long, env = "MENU_CATALOG_PORT", default_value = "8000")]
    pub port: u16,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServerArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
