//! Collaborator entity - An employee who places snack orders.
//!
//! Collaborators log in with a credential/password pair and accumulate orders
//! until those orders are finalized.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Collaborator database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Colaboradores")]
pub struct Model {
    /// Unique identifier for the collaborator
    #[sea_orm(primary_key, column_name = "IdCol")]
    #[serde(rename = "idCol", default)]
    pub id: i32,
    /// Full name
    #[sea_orm(column_name = "Nome")]
    #[serde(rename = "nome")]
    pub name: String,
    /// Job title
    #[sea_orm(column_name = "Cargo")]
    #[serde(rename = "cargo")]
    pub role: String,
    /// Login identifier
    #[sea_orm(column_name = "Credencial")]
    #[serde(rename = "credencial")]
    pub credential: String,
    /// Login password, stored as given
    #[sea_orm(column_name = "Senha")]
    #[serde(rename = "senha")]
    pub password: String,
    /// Contact email
    #[sea_orm(column_name = "Email")]
    pub email: String,
    /// Date of birth
    #[sea_orm(column_name = "DataNascimento")]
    #[serde(rename = "dataNascimento")]
    pub birth_date: DateTimeUtc,
}

/// Defines relationships between Collaborator and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One collaborator places many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
