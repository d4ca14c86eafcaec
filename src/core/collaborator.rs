//! Collaborator business logic - Handles all collaborator-related operations.
//!
//! This module provides functions for creating, retrieving, replacing, updating and deleting
//! collaborators, plus the credential lookup used by the login screen and the global
//! "finalize every pending order" operation. Both create variants and the partial update
//! go through [`CollaboratorInput`], which owns the list of writable fields.

use crate::{
    entities::{Collaborator, Order, collaborator, order},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Unchanged, Condition, PaginatorTrait, QueryOrder, Set, TransactionTrait,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Writable collaborator fields, as accepted by the create and edit endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorInput {
    /// Full name
    #[serde(rename = "nome")]
    pub name: String,
    /// Job title
    #[serde(rename = "cargo")]
    pub role: String,
    /// Login identifier
    #[serde(rename = "credencial")]
    pub credential: String,
    /// Login password
    #[serde(rename = "senha")]
    pub password: String,
    /// Contact email
    pub email: String,
    /// Date of birth
    #[serde(rename = "dataNascimento")]
    pub birth_date: DateTime<Utc>,
}

impl CollaboratorInput {
    /// Copies every writable field onto `active`, leaving the id untouched.
    pub fn apply_to(self, active: &mut collaborator::ActiveModel) {
        active.name = Set(self.name);
        active.role = Set(self.role);
        active.credential = Set(self.credential);
        active.password = Set(self.password);
        active.email = Set(self.email);
        active.birth_date = Set(self.birth_date);
    }

    /// Builds a new, not yet persisted collaborator.
    #[must_use]
    pub fn into_active_model(self) -> collaborator::ActiveModel {
        let mut active = collaborator::ActiveModel {
            ..Default::default()
        };
        self.apply_to(&mut active);
        active
    }
}

impl From<collaborator::Model> for CollaboratorInput {
    fn from(model: collaborator::Model) -> Self {
        Self {
            name: model.name,
            role: model.role,
            credential: model.credential,
            password: model.password,
            email: model.email,
            birth_date: model.birth_date,
        }
    }
}

/// Credential/password pair posted by the login screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login identifier
    #[serde(rename = "credencial")]
    pub credential: String,
    /// Login password
    #[serde(rename = "senha")]
    pub password: String,
}

/// Retrieves all collaborators ordered by id. An empty table is not an error.
pub async fn list_collaborators(db: &DatabaseConnection) -> Result<Vec<collaborator::Model>> {
    Collaborator::find()
        .order_by_asc(collaborator::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific collaborator by its unique ID.
pub async fn get_collaborator_by_id(
    db: &DatabaseConnection,
    collaborator_id: i32,
) -> Result<Option<collaborator::Model>> {
    Collaborator::find_by_id(collaborator_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Checks whether a collaborator with this id is stored.
pub async fn collaborator_exists<C>(conn: &C, collaborator_id: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let count = Collaborator::find_by_id(collaborator_id).count(conn).await?;
    Ok(count > 0)
}

/// Creates a collaborator from the writable field set and returns it with its assigned id.
///
/// The raw-entity create endpoint converts its body with `CollaboratorInput::from`, so any
/// client supplied id is ignored.
#[instrument(skip(db, input), fields(credential = %input.credential))]
pub async fn create_collaborator(
    db: &DatabaseConnection,
    input: CollaboratorInput,
) -> Result<collaborator::Model> {
    let created = input.into_active_model().insert(db).await?;
    info!("Created collaborator {} ({})", created.id, created.name);
    Ok(created)
}

/// Overwrites every field of an existing collaborator.
///
/// # Errors
/// - `IdMismatch` if `path_id` differs from the body id; nothing is written
/// - `CollaboratorNotFound` if the row vanished before the write
/// - `Database` for any other update failure, including a conflict on a row that still exists
#[instrument(skip(db, model))]
pub async fn replace_collaborator(
    db: &DatabaseConnection,
    path_id: i32,
    model: collaborator::Model,
) -> Result<collaborator::Model> {
    if path_id != model.id {
        return Err(Error::IdMismatch {
            path_id,
            body_id: model.id,
        });
    }

    let active = collaborator::ActiveModel {
        id: Unchanged(model.id),
        ..CollaboratorInput::from(model).into_active_model()
    };

    match active.update(db).await {
        Ok(updated) => {
            info!("Replaced collaborator {}", updated.id);
            Ok(updated)
        }
        Err(DbErr::RecordNotUpdated) => {
            if collaborator_exists(db, path_id).await? {
                Err(DbErr::RecordNotUpdated.into())
            } else {
                Err(Error::CollaboratorNotFound { id: path_id })
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Copies the writable fields of `input` onto an existing collaborator.
///
/// A non-positive id is rejected before any lookup, so it answers 400 rather than the
/// 404 an unknown positive id gets. The legacy service looked the id up first and
/// reported every unknown id, non-positive ones included, as not found.
///
/// # Errors
/// - `InvalidId` if `collaborator_id` is not positive
/// - `CollaboratorNotFound` if no such collaborator exists
#[instrument(skip(db, input))]
pub async fn update_collaborator(
    db: &DatabaseConnection,
    collaborator_id: i32,
    input: CollaboratorInput,
) -> Result<collaborator::Model> {
    if collaborator_id <= 0 {
        return Err(Error::InvalidId {
            id: collaborator_id,
        });
    }

    let mut active: collaborator::ActiveModel = Collaborator::find_by_id(collaborator_id)
        .one(db)
        .await?
        .ok_or(Error::CollaboratorNotFound {
            id: collaborator_id,
        })?
        .into();

    input.apply_to(&mut active);
    let updated = active.update(db).await?;
    info!("Updated collaborator {}", updated.id);
    Ok(updated)
}

/// Deletes a collaborator together with all of their orders and returns the removed record.
///
/// Orders are removed explicitly in the same transaction, so the cascade does not depend
/// on the database enforcing foreign keys.
#[instrument(skip(db))]
pub async fn delete_collaborator(
    db: &DatabaseConnection,
    collaborator_id: i32,
) -> Result<collaborator::Model> {
    let txn = db.begin().await?;

    let collaborator = Collaborator::find_by_id(collaborator_id)
        .one(&txn)
        .await?
        .ok_or(Error::CollaboratorNotFound {
            id: collaborator_id,
        })?;

    let orders = Order::delete_many()
        .filter(order::Column::CollaboratorId.eq(collaborator_id))
        .exec(&txn)
        .await?;
    Collaborator::delete_by_id(collaborator_id)
        .exec(&txn)
        .await?;

    txn.commit().await?;
    info!(
        "Deleted collaborator {} and {} of their orders",
        collaborator_id, orders.rows_affected
    );
    Ok(collaborator)
}

/// Finds the collaborator whose credential and password both match exactly.
///
/// Passwords are compared as stored plain text.
///
/// # Errors
/// Returns `InvalidCredentials` when no collaborator matches.
#[instrument(skip(db, login), fields(credential = %login.credential))]
pub async fn find_by_credentials(
    db: &DatabaseConnection,
    login: &LoginRequest,
) -> Result<collaborator::Model> {
    let found = Collaborator::find()
        .filter(collaborator::Column::Credential.eq(login.credential.as_str()))
        .filter(collaborator::Column::Password.eq(login.password.as_str()))
        .one(db)
        .await?;

    match found {
        Some(collaborator) => {
            debug!("Login succeeded for collaborator {}", collaborator.id);
            Ok(collaborator)
        }
        None => {
            warn!("Login failed");
            Err(Error::InvalidCredentials)
        }
    }
}

/// Marks every pending order of every collaborator as finalized in one transaction.
///
/// Returns the number of orders that changed status.
///
/// # Errors
/// Returns `NoCollaborators` if there are no collaborators at all.
#[instrument(skip(db))]
pub async fn finalize_all_pending_orders(db: &DatabaseConnection) -> Result<u64> {
    let txn = db.begin().await?;

    if Collaborator::find().count(&txn).await? == 0 {
        return Err(Error::NoCollaborators);
    }

    // Every order belongs to a collaborator; only the status filter applies.
    let finalized = crate::core::order::finalize_pending_where(&txn, Condition::all()).await?;

    txn.commit().await?;
    info!("Finalized {finalized} pending orders across all collaborators");
    Ok(finalized)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::OrderStatus;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_get_collaborator() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_collaborator(&db, test_collaborator_input("Ana", "ana")).await?;
        assert!(created.id > 0);
        assert_eq!(created.name, "Ana");
        assert_eq!(created.credential, "ana");

        let found = get_collaborator_by_id(&db, created.id).await?;
        assert_eq!(found, Some(created));

        let missing = get_collaborator_by_id(&db, 999).await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_collaborators_empty_is_ok() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(list_collaborators(&db).await?.is_empty());

        create_test_collaborator(&db, "Ana", "ana").await?;
        create_test_collaborator(&db, "Bruno", "bruno").await?;
        let all = list_collaborators(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Ana");
        Ok(())
    }

    #[tokio::test]
    async fn test_raw_create_ignores_client_id() -> Result<()> {
        let db = setup_test_db().await?;
        let template = create_test_collaborator(&db, "Ana", "ana").await?;

        let raw = collaborator::Model {
            id: 500,
            name: "Carla".to_string(),
            ..template
        };
        let created = create_collaborator(&db, CollaboratorInput::from(raw)).await?;
        assert_ne!(created.id, 500);
        assert_eq!(created.name, "Carla");
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_collaborator_id_mismatch_does_not_mutate() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_collaborator(&db, "Ana", "ana").await?;

        let body = collaborator::Model {
            name: "Changed".to_string(),
            ..original.clone()
        };
        let result = replace_collaborator(&db, original.id + 1, body).await;
        assert!(matches!(result, Err(Error::IdMismatch { .. })));

        let stored = get_collaborator_by_id(&db, original.id).await?.unwrap();
        assert_eq!(stored, original);
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_collaborator_overwrites_all_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_collaborator(&db, "Ana", "ana").await?;

        let body = collaborator::Model {
            id: original.id,
            name: "Ana Maria".to_string(),
            role: "Gerente".to_string(),
            credential: "anam".to_string(),
            password: "nova".to_string(),
            email: "anam@infobar.test".to_string(),
            birth_date: original.birth_date,
        };
        let replaced = replace_collaborator(&db, original.id, body.clone()).await?;
        assert_eq!(replaced, body);
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_missing_collaborator_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_collaborator(&db, "Ana", "ana").await?;
        delete_collaborator(&db, original.id).await?;

        let result = replace_collaborator(&db, original.id, original.clone()).await;
        assert!(matches!(
            result,
            Err(Error::CollaboratorNotFound { id }) if id == original.id
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_collaborator() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_collaborator(&db, "Ana", "ana").await?;

        let mut input = test_collaborator_input("Ana Paula", "anapaula");
        input.role = "Supervisora".to_string();
        let updated = update_collaborator(&db, original.id, input).await?;

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, "Ana Paula");
        assert_eq!(updated.role, "Supervisora");
        assert_eq!(updated.credential, "anapaula");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_collaborator_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_collaborator(&db, 0, test_collaborator_input("X", "x")).await;
        assert!(matches!(result, Err(Error::InvalidId { id: 0 })));

        let result = update_collaborator(&db, -3, test_collaborator_input("X", "x")).await;
        assert!(matches!(result, Err(Error::InvalidId { id: -3 })));

        let result = update_collaborator(&db, 42, test_collaborator_input("X", "x")).await;
        assert!(matches!(result, Err(Error::CollaboratorNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_collaborator_returns_snapshot_and_cascades() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_collaborator(&db, "Ana", "ana").await?;
        let bruno = create_test_collaborator(&db, "Bruno", "bruno").await?;
        let soda = create_test_product(&db, "Soda", "111", 5.0).await?;
        create_test_order(&db, ana.id, soda.id).await?;
        create_test_order(&db, ana.id, soda.id).await?;
        let kept = create_test_order(&db, bruno.id, soda.id).await?;

        let deleted = delete_collaborator(&db, ana.id).await?;
        assert_eq!(deleted, ana);
        assert!(get_collaborator_by_id(&db, ana.id).await?.is_none());

        let remaining = Order::find().all(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);

        let result = delete_collaborator(&db, ana.id).await;
        assert!(matches!(result, Err(Error::CollaboratorNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_credentials() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_collaborator(&db, "Ana", "ana").await?;

        let login = LoginRequest {
            credential: "ana".to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        assert_eq!(find_by_credentials(&db, &login).await?, ana);

        let wrong_password = LoginRequest {
            credential: "ana".to_string(),
            password: "wrong".to_string(),
        };
        assert!(matches!(
            find_by_credentials(&db, &wrong_password).await,
            Err(Error::InvalidCredentials)
        ));

        let wrong_case = LoginRequest {
            credential: "ANA".to_string(),
            password: TEST_PASSWORD.to_string(),
        };
        assert!(matches!(
            find_by_credentials(&db, &wrong_case).await,
            Err(Error::InvalidCredentials)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_finalize_all_pending_orders() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            finalize_all_pending_orders(&db).await,
            Err(Error::NoCollaborators)
        ));

        let ana = create_test_collaborator(&db, "Ana", "ana").await?;
        let bruno = create_test_collaborator(&db, "Bruno", "bruno").await?;
        let soda = create_test_product(&db, "Soda", "111", 5.0).await?;
        create_test_order(&db, ana.id, soda.id).await?;
        create_test_order(&db, bruno.id, soda.id).await?;
        create_test_order(&db, bruno.id, soda.id).await?;

        assert_eq!(finalize_all_pending_orders(&db).await?, 3);

        let orders = Order::find().all(&db).await?;
        assert!(orders.iter().all(|o| o.status == OrderStatus::Finalized));

        // Nothing left to flip, but collaborators exist
        assert_eq!(finalize_all_pending_orders(&db).await?, 0);
        Ok(())
    }

    #[test]
    fn test_into_active_model_leaves_id_unset() {
        let active = test_collaborator_input("Ana", "ana").into_active_model();
        assert!(active.id.is_not_set());
        assert_eq!(active.name, Set("Ana".to_string()));
        assert_eq!(active.credential, Set("ana".to_string()));
    }

    #[tokio::test]
    async fn test_finalize_all_only_counts_pending_orders() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_collaborator(&db, "Ana", "ana").await?;
        let bruno = create_test_collaborator(&db, "Bruno", "bruno").await?;
        let soda = create_test_product(&db, "Soda", "111", 5.0).await?;

        create_test_order(&db, ana.id, soda.id).await?;
        crate::core::order::finalize_pending_orders_for(&db, ana.id).await?;
        create_test_order(&db, ana.id, soda.id).await?;
        create_test_order(&db, bruno.id, soda.id).await?;

        assert_eq!(finalize_all_pending_orders(&db).await?, 2);
        let finalized = Order::find()
            .filter(order::Column::Status.eq(OrderStatus::Finalized))
            .count(&db)
            .await?;
        assert_eq!(finalized, 3);
        Ok(())
    }
}
