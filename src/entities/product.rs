//! Product entity - A purchasable snack identified by its barcode.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Produtos")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key, column_name = "IdProd")]
    #[serde(rename = "idProd", default)]
    pub id: i32,
    /// Unit price
    #[sea_orm(column_name = "Preco")]
    #[serde(rename = "preco")]
    pub price: f64,
    /// Display name
    #[sea_orm(column_name = "NomeProd")]
    #[serde(rename = "nomeProd")]
    pub name: String,
    /// Barcode printed on the package, used as an external lookup key
    #[sea_orm(column_name = "CodBarras")]
    #[serde(rename = "codBarras")]
    pub barcode: String,
    /// Inventory count (informational only)
    #[sea_orm(column_name = "Quantidade")]
    #[serde(rename = "quantidade")]
    pub quantity: i32,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product appears in many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
