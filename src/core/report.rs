//! Report generation business logic.
//!
//! The pending-value report answers "how much does each collaborator owe right now":
//! the sum of product prices over that collaborator's pending orders. Totals are always
//! computed from the orders at request time; nothing is cached on the collaborator.

use crate::{
    entities::{Collaborator, Order, OrderStatus, Product, collaborator, order},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the pending-value report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorTotal {
    /// Collaborator id
    #[serde(rename = "idCol")]
    pub collaborator_id: i32,
    /// Collaborator name
    #[serde(rename = "nome")]
    pub name: String,
    /// Sum of prices of the collaborator's pending orders
    #[serde(rename = "valorTotal")]
    pub total: f64,
}

/// Sums product prices of pending orders, grouped by collaborator.
async fn pending_totals(
    db: &DatabaseConnection,
    collaborator_id: Option<i32>,
) -> Result<HashMap<i32, f64>> {
    let mut query = Order::find().filter(order::Column::Status.eq(OrderStatus::Pending));
    if let Some(id) = collaborator_id {
        query = query.filter(order::Column::CollaboratorId.eq(id));
    }

    let rows = query
        .order_by_asc(order::Column::Id)
        .find_also_related(Product)
        .all(db)
        .await?;

    let mut totals = HashMap::new();
    for (order, product) in rows {
        if let Some(product) = product {
            *totals.entry(order.collaborator_id).or_insert(0.0) += product.price;
        }
    }
    Ok(totals)
}

/// Builds the pending-value report for every collaborator, ordered by id.
///
/// Collaborators with nothing pending are listed with a total of zero.
pub async fn collaborators_with_pending_total(
    db: &DatabaseConnection,
) -> Result<Vec<CollaboratorTotal>> {
    let collaborators = Collaborator::find()
        .order_by_asc(collaborator::Column::Id)
        .all(db)
        .await?;
    let totals = pending_totals(db, None).await?;

    Ok(collaborators
        .into_iter()
        .map(|c| CollaboratorTotal {
            total: totals.get(&c.id).copied().unwrap_or(0.0),
            collaborator_id: c.id,
            name: c.name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::order::finalize_pending_orders_for;
    use crate::test_utils::*;

    async fn pending_total_for(db: &DatabaseConnection, collaborator_id: i32) -> Result<f64> {
        let totals = pending_totals(db, Some(collaborator_id)).await?;
        Ok(totals.get(&collaborator_id).copied().unwrap_or(0.0))
    }

    #[tokio::test]
    async fn test_pending_total_ignores_finalized_orders() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_collaborator(&db, "Ana", "ana").await?;
        let ten = create_test_product(&db, "Sandwich", "1", 10.0).await?;
        let five_and_half = create_test_product(&db, "Juice", "2", 5.5).await?;
        let hundred = create_test_product(&db, "Gift basket", "3", 100.0).await?;

        create_test_order(&db, ana.id, hundred.id).await?;
        finalize_pending_orders_for(&db, ana.id).await?;
        create_test_order(&db, ana.id, ten.id).await?;
        create_test_order(&db, ana.id, five_and_half.id).await?;

        assert_eq!(pending_total_for(&db, ana.id).await?, 15.5);

        let report = collaborators_with_pending_total(&db).await?;
        assert_eq!(
            report,
            vec![CollaboratorTotal {
                collaborator_id: ana.id,
                name: "Ana".to_string(),
                total: 15.5,
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_report_lists_every_collaborator() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(collaborators_with_pending_total(&db).await?.is_empty());

        let ana = create_test_collaborator(&db, "Ana", "ana").await?;
        let bruno = create_test_collaborator(&db, "Bruno", "bruno").await?;
        let soda = create_test_product(&db, "Soda", "1", 4.0).await?;
        create_test_order(&db, bruno.id, soda.id).await?;
        create_test_order(&db, bruno.id, soda.id).await?;

        let report = collaborators_with_pending_total(&db).await?;
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].collaborator_id, ana.id);
        assert_eq!(report[0].total, 0.0);
        assert_eq!(report[1].collaborator_id, bruno.id);
        assert_eq!(report[1].total, 8.0);

        assert_eq!(pending_total_for(&db, 999).await?, 0.0);
        Ok(())
    }
}
