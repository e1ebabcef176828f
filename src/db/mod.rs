//! Database module
//!
//! This module handles database connections, migrations, and repositories.

pub mod connection;
pub mod repositories;
pub mod store;

use sqlx::PgPool;

pub use connection::*;
pub use store::{PgStore, Store, StoreTx};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
