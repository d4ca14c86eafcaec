//! Database configuration module for Infobar.
//!
//! This module handles the database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema (including the cascading foreign keys on `Pedidos`) always matches
//! the Rust structs without hand-written SQL.

use crate::entities::{Collaborator, Order, Product};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Default database used when neither `config.toml` nor `DATABASE_URL` name one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://infobar.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, if set.
#[must_use]
pub fn database_url_from_env() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// Establishes a connection pool to the database at `database_url`.
///
/// The returned handle is cheap to clone; every request works against its own clone.
#[instrument(skip_all)]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    let db = Database::connect(database_url).await?;
    info!("Database connection established");
    Ok(db)
}

async fn create_table_for<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }
    Ok(())
}

/// Creates all tables (if missing) using `SeaORM`'s schema generation from entity definitions.
///
/// Parent tables are created before `Pedidos` so its foreign keys resolve.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table_for(db, &schema, Collaborator).await?;
    create_table_for(db, &schema, Product).await?;
    create_table_for(db, &schema, Order).await?;

    info!("Database tables ensured");
    Ok(())
}
