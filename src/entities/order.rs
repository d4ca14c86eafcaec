//! Order entity - Links a collaborator to a product they took.
//!
//! Orders are created as `Pendente` and move one way to `Finalizado` when the
//! collaborator settles their tab. Both foreign keys cascade on delete.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OrderStatus {
    /// Not yet paid for
    #[default]
    #[sea_orm(string_value = "Pendente")]
    #[serde(rename = "Pendente")]
    Pending,
    /// Settled; never goes back to pending
    #[sea_orm(string_value = "Finalizado")]
    #[serde(rename = "Finalizado")]
    Finalized,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Pedidos")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key, column_name = "IdPed")]
    #[serde(rename = "idPed", default)]
    pub id: i32,
    /// When the order was placed, always stored in UTC
    #[sea_orm(column_name = "DataPedido")]
    #[serde(rename = "dataPedido")]
    pub order_date: DateTimeUtc,
    /// Collaborator who placed the order
    #[sea_orm(column_name = "ColaboradorId", indexed)]
    #[serde(rename = "colaboradorId")]
    pub collaborator_id: i32,
    /// Product that was taken
    #[sea_orm(column_name = "ProdutoId", indexed)]
    #[serde(rename = "produtoId")]
    pub product_id: i32,
    /// Current lifecycle status
    #[sea_orm(column_name = "Situacao")]
    #[serde(rename = "situacao", default)]
    pub status: OrderStatus,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one collaborator
    #[sea_orm(
        belongs_to = "super::collaborator::Entity",
        from = "Column::CollaboratorId",
        to = "super::collaborator::Column::Id",
        on_delete = "Cascade"
    )]
    Collaborator,
    /// Each order references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::collaborator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collaborator.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
