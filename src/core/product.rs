//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, looking up by barcode, deleting
//! and seeding products. Products are what collaborators take from the snack bar; orders
//! reference them by id, and the order screen resolves scanned barcodes through
//! [`find_product_by_barcode`].

use crate::{
    config::ProductConfig,
    entities::{Order, Product, order, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Fields accepted when creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Display name
    #[serde(rename = "nomeProd")]
    pub name: String,
    /// Barcode printed on the package
    #[serde(rename = "codBarras")]
    pub barcode: String,
    /// Unit price
    #[serde(rename = "preco")]
    pub price: f64,
    /// Inventory count
    #[serde(rename = "quantidade", default)]
    pub quantity: i32,
}

impl ProductInput {
    /// Validates the input, trimming name and barcode.
    ///
    /// # Errors
    /// Returns `Validation` if:
    /// - The name or barcode is empty or whitespace-only
    /// - The price is negative or not finite (NaN, infinity)
    /// - The quantity is negative
    pub fn validate(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        let barcode = self.barcode.trim().to_string();

        if name.is_empty() {
            return Err(validation("Product name cannot be empty"));
        }
        if barcode.is_empty() {
            return Err(validation("Product barcode cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(validation(&format!("Invalid product price: {}", self.price)));
        }
        if self.quantity < 0 {
            return Err(validation(&format!(
                "Invalid product quantity: {}",
                self.quantity
            )));
        }

        Ok(Self {
            name,
            barcode,
            ..self
        })
    }
}

impl From<&ProductConfig> for ProductInput {
    fn from(config: &ProductConfig) -> Self {
        Self {
            name: config.name.clone(),
            barcode: config.barcode.clone(),
            price: config.price,
            quantity: config.quantity,
        }
    }
}

fn validation(message: &str) -> Error {
    Error::Validation {
        message: message.to_string(),
    }
}

/// Minimal product info returned by the barcode confirmation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product id, used when placing the order
    #[serde(rename = "idProd")]
    pub id: i32,
    /// Display name
    #[serde(rename = "nomeProd")]
    pub name: String,
    /// Unit price
    #[serde(rename = "preco")]
    pub price: f64,
}

impl From<product::Model> for ProductSummary {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

/// Retrieves all products, ordered alphabetically by name.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i32,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the product with exactly this barcode.
///
/// # Errors
/// Returns `ProductNotFound` if no product carries the barcode.
pub async fn find_product_by_barcode(
    db: &DatabaseConnection,
    barcode: &str,
) -> Result<product::Model> {
    let found = Product::find()
        .filter(product::Column::Barcode.eq(barcode))
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            key: barcode.to_string(),
        })?;
    debug!("Barcode {barcode} resolved to product {}", found.id);
    Ok(found)
}

/// Creates a new product after validating its input.
#[instrument(skip(db))]
pub async fn create_product(db: &DatabaseConnection, input: ProductInput) -> Result<product::Model> {
    let input = input.validate()?;

    let product = product::ActiveModel {
        name: Set(input.name),
        barcode: Set(input.barcode),
        price: Set(input.price),
        quantity: Set(input.quantity),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    info!(
        "Created product {} '{}' ({})",
        created.id, created.name, created.barcode
    );
    Ok(created)
}

/// Deletes a product and every order that references it, returning the removed product.
///
/// # Errors
/// Returns `ProductNotFound` if no such product exists.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i32) -> Result<product::Model> {
    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            key: product_id.to_string(),
        })?;

    let orders = Order::delete_many()
        .filter(order::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    Product::delete_by_id(product_id).exec(&txn).await?;

    txn.commit().await?;
    info!(
        "Deleted product {product_id} and {} orders referencing it",
        orders.rows_affected
    );
    Ok(product)
}

/// Inserts configured products whose barcode is not in the catalogue yet.
///
/// Returns how many products were created; running it again is a no-op.
#[instrument(skip_all, fields(configured = products.len()))]
pub async fn seed_products(db: &DatabaseConnection, products: &[ProductConfig]) -> Result<usize> {
    let mut created = 0;
    for config in products {
        let exists = Product::find()
            .filter(product::Column::Barcode.eq(config.barcode.trim()))
            .one(db)
            .await?
            .is_some();
        if exists {
            debug!("Product with barcode {} already present", config.barcode);
            continue;
        }
        create_product(db, ProductInput::from(config)).await?;
        created += 1;
    }
    info!("Seeded {created} products");
    Ok(created)
}
