//! Shared test utilities for Infobar.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        collaborator::{self, CollaboratorInput},
        order::{self, PlaceOrderRequest},
        product::{self, ProductInput},
    },
    entities,
    errors::Result,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Password given to every test collaborator.
pub const TEST_PASSWORD: &str = "senha123";

/// Routes test logs through the test harness; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Midnight UTC on the given day.
///
/// # Panics
/// Panics on an invalid calendar date; only meant for literals in tests.
#[allow(clippy::unwrap_used)]
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Builds collaborator input with sensible defaults.
///
/// # Defaults
/// * `role`: "Analista"
/// * `password`: [`TEST_PASSWORD`]
/// * `email`: `"{credential}@infobar.test"`
/// * `birth_date`: 1990-05-20
pub fn test_collaborator_input(name: &str, credential: &str) -> CollaboratorInput {
    CollaboratorInput {
        name: name.to_string(),
        role: "Analista".to_string(),
        credential: credential.to_string(),
        password: TEST_PASSWORD.to_string(),
        email: format!("{credential}@infobar.test"),
        birth_date: utc(1990, 5, 20),
    }
}

/// Creates a test collaborator with sensible defaults.
pub async fn create_test_collaborator(
    db: &DatabaseConnection,
    name: &str,
    credential: &str,
) -> Result<entities::collaborator::Model> {
    collaborator::create_collaborator(db, test_collaborator_input(name, credential)).await
}

/// Creates a test product with a stock of 10.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    barcode: &str,
    price: f64,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        ProductInput {
            name: name.to_string(),
            barcode: barcode.to_string(),
            price,
            quantity: 10,
        },
    )
    .await
}

/// Places a pending order dated at the given instant.
pub async fn create_test_order_at(
    db: &DatabaseConnection,
    collaborator_id: i32,
    product_id: i32,
    order_date: DateTime<Utc>,
) -> Result<entities::order::Model> {
    let (order, _view) = order::place_order(
        db,
        PlaceOrderRequest {
            product_id,
            collaborator_id,
            order_date: order_date.into(),
        },
    )
    .await?;
    Ok(order)
}

/// Places a pending order dated 2024-01-10.
pub async fn create_test_order(
    db: &DatabaseConnection,
    collaborator_id: i32,
    product_id: i32,
) -> Result<entities::order::Model> {
    create_test_order_at(db, collaborator_id, product_id, utc(2024, 1, 10)).await
}

/// Sets up a complete test environment with one collaborator ("Ana") and one product
/// ("Soda", 5.5). Returns (db, collaborator, product) for order-related tests.
pub async fn setup_with_order_parties() -> Result<(
    DatabaseConnection,
    entities::collaborator::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let collaborator = create_test_collaborator(&db, "Ana", "ana").await?;
    let product = create_test_product(&db, "Soda", "111", 5.5).await?;
    Ok((db, collaborator, product))
}
