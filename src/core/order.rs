//! Order business logic - Handles order placement, lookup and status transitions.
//!
//! Orders are only created through [`place_order`], which checks that both the product and
//! the collaborator exist before inserting. Status moves one way, `Pending` to `Finalized`;
//! every bulk transition filters on `Pending`, so finalized orders are never touched twice.
//! Read endpoints mostly answer with [`OrderView`], a flattened order + product projection.

use crate::{
    entities::{Collaborator, Order, OrderStatus, Product, order, product},
    errors::{Error, Result},
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use sea_orm::{
    ActiveValue::Unchanged,
    PaginatorTrait, QueryOrder, Set,
    prelude::*,
    sea_query::{Expr, IntoCondition},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Flattened order + product projection used by list and detail responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    /// When the order was placed (UTC)
    #[serde(rename = "dataPedido")]
    pub order_date: DateTimeUtc,
    /// Name of the ordered product
    #[serde(rename = "produtoNome")]
    pub product_name: String,
    /// Price of the ordered product
    #[serde(rename = "preco")]
    pub price: f64,
}

impl OrderView {
    fn new(order: &order::Model, product: &product::Model) -> Self {
        Self {
            order_date: order.order_date,
            product_name: product.name.clone(),
            price: product.price,
        }
    }
}

/// A client supplied instant. Timestamps without an offset are read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderTimestamp {
    /// RFC 3339 timestamp carrying its offset
    WithOffset(DateTime<FixedOffset>),
    /// Timestamp without an offset
    Naive(NaiveDateTime),
}

impl OrderTimestamp {
    /// The same instant in UTC.
    #[must_use]
    pub fn to_utc(self) -> DateTimeUtc {
        match self {
            Self::WithOffset(dt) => dt.with_timezone(&Utc),
            Self::Naive(dt) => dt.and_utc(),
        }
    }
}

impl From<DateTime<FixedOffset>> for OrderTimestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::WithOffset(dt)
    }
}

impl From<DateTimeUtc> for OrderTimestamp {
    fn from(dt: DateTimeUtc) -> Self {
        Self::WithOffset(dt.fixed_offset())
    }
}

/// Body of the place-order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Product being taken
    #[serde(rename = "idProduto")]
    pub product_id: i32,
    /// Collaborator taking it
    #[serde(rename = "idColaborador")]
    pub collaborator_id: i32,
    /// When it was taken, in any UTC offset
    #[serde(rename = "dataPedido")]
    pub order_date: OrderTimestamp,
}

/// Snapshot of a deleted order, including its foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedOrder {
    /// Id the order had
    #[serde(rename = "idPed")]
    pub id: i32,
    /// When the order was placed
    #[serde(rename = "dataPedido")]
    pub order_date: DateTimeUtc,
    /// Collaborator the order belonged to
    #[serde(rename = "idCol")]
    pub collaborator_id: i32,
    /// Product the order referenced
    #[serde(rename = "idProd")]
    pub product_id: i32,
    /// Status at deletion time
    #[serde(rename = "situacao")]
    pub status: OrderStatus,
}

impl From<order::Model> for DeletedOrder {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            order_date: model.order_date,
            collaborator_id: model.collaborator_id,
            product_id: model.product_id,
            status: model.status,
        }
    }
}

/// One end of a period query: a full timestamp, a timestamp without offset (UTC),
/// or a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodBound {
    /// An exact instant in any offset
    DateTime(DateTime<FixedOffset>),
    /// An exact instant without offset, read as UTC
    Naive(NaiveDateTime),
    /// A whole UTC day
    Date(NaiveDate),
}

impl PeriodBound {
    /// Earliest instant covered by this bound.
    pub fn start(self) -> Result<DateTimeUtc> {
        match self {
            Self::DateTime(dt) => Ok(dt.with_timezone(&Utc)),
            Self::Naive(dt) => Ok(dt.and_utc()),
            Self::Date(date) => date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
                .ok_or_else(|| invalid_date(date)),
        }
    }

    /// Latest instant covered by this bound.
    pub fn end(self) -> Result<DateTimeUtc> {
        match self {
            Self::DateTime(dt) => Ok(dt.with_timezone(&Utc)),
            Self::Naive(dt) => Ok(dt.and_utc()),
            Self::Date(date) => date
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .map(|dt| dt.and_utc())
                .ok_or_else(|| invalid_date(date)),
        }
    }
}

fn invalid_date(date: NaiveDate) -> Error {
    Error::Validation {
        message: format!("Invalid date: {date}"),
    }
}

/// Query string of the period endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Inclusive start of the period
    #[serde(rename = "dataInicial")]
    pub start: PeriodBound,
    /// Inclusive end of the period
    #[serde(rename = "dataFinal")]
    pub end: PeriodBound,
    /// Collaborator whose orders are listed
    #[serde(rename = "idCol")]
    pub collaborator_id: i32,
}

/// Orders of one collaborator inside a period, with the sum of their prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Matching orders, oldest first
    #[serde(rename = "pedidos")]
    pub orders: Vec<OrderView>,
    /// Sum of the listed prices
    #[serde(rename = "valorTotal")]
    pub total: f64,
}

/// Retrieves all orders ordered by id.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Order::find()
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific order by its unique ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i32,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the detail view of one order.
///
/// # Errors
/// Returns `OrderNotFound` if the order, or the product it references, does not exist.
pub async fn get_order_view(db: &DatabaseConnection, order_id: i32) -> Result<OrderView> {
    match Order::find_by_id(order_id)
        .find_also_related(Product)
        .one(db)
        .await?
    {
        Some((order, Some(product))) => Ok(OrderView::new(&order, &product)),
        _ => Err(Error::OrderNotFound { id: order_id }),
    }
}

/// Lists every order of a collaborator as detail views, regardless of status, oldest first.
pub async fn list_order_views_for_collaborator(
    db: &DatabaseConnection,
    collaborator_id: i32,
) -> Result<Vec<OrderView>> {
    let rows = Order::find()
        .filter(order::Column::CollaboratorId.eq(collaborator_id))
        .order_by_asc(order::Column::OrderDate)
        .find_also_related(Product)
        .all(db)
        .await?;

    Ok(rows
        .iter()
        .filter_map(|(order, product)| product.as_ref().map(|p| OrderView::new(order, p)))
        .collect())
}

/// Lists a collaborator's orders dated inside the inclusive period, with their total price.
///
/// # Errors
/// - `Validation` if the period ends before it starts
/// - `NoOrdersInPeriod` if nothing matches
#[instrument(skip(db))]
pub async fn orders_in_period(db: &DatabaseConnection, query: &PeriodQuery) -> Result<PeriodReport> {
    let start = query.start.start()?;
    let end = query.end.end()?;
    if end < start {
        return Err(Error::Validation {
            message: format!("Period end {end} is before start {start}"),
        });
    }

    let rows = Order::find()
        .filter(order::Column::CollaboratorId.eq(query.collaborator_id))
        .filter(order::Column::OrderDate.between(start, end))
        .order_by_asc(order::Column::OrderDate)
        .find_also_related(Product)
        .all(db)
        .await?;

    let orders: Vec<OrderView> = rows
        .iter()
        .filter_map(|(order, product)| product.as_ref().map(|p| OrderView::new(order, p)))
        .collect();

    if orders.is_empty() {
        return Err(Error::NoOrdersInPeriod {
            collaborator_id: query.collaborator_id,
        });
    }

    let total = orders.iter().map(|view| view.price).sum();
    debug!("Found {} orders in period, total {total}", orders.len());
    Ok(PeriodReport { orders, total })
}

/// Places a new pending order and returns it together with its detail view.
///
/// The order date is converted to UTC before it is stored.
///
/// # Errors
/// - `InvalidId` if either id is not positive
/// - `ProductNotFound` / `CollaboratorNotFound` if a referenced entity does not exist
#[instrument(skip(db))]
pub async fn place_order(
    db: &DatabaseConnection,
    request: PlaceOrderRequest,
) -> Result<(order::Model, OrderView)> {
    if request.product_id <= 0 {
        return Err(Error::InvalidId {
            id: request.product_id,
        });
    }
    if request.collaborator_id <= 0 {
        return Err(Error::InvalidId {
            id: request.collaborator_id,
        });
    }

    let product = Product::find_by_id(request.product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            key: request.product_id.to_string(),
        })?;
    let collaborator = Collaborator::find_by_id(request.collaborator_id)
        .one(db)
        .await?
        .ok_or(Error::CollaboratorNotFound {
            id: request.collaborator_id,
        })?;

    let new_order = order::ActiveModel {
        order_date: Set(request.order_date.to_utc()),
        collaborator_id: Set(collaborator.id),
        product_id: Set(product.id),
        status: Set(OrderStatus::Pending),
        ..Default::default()
    };
    let created = new_order.insert(db).await?;

    info!(
        "Order {} placed: {} took {} for {:.2}",
        created.id, collaborator.name, product.name, product.price
    );
    let view = OrderView::new(&created, &product);
    Ok((created, view))
}

/// Flips every pending order matching `scope` to finalized and returns how many changed.
pub(crate) async fn finalize_pending_where<C, F>(conn: &C, scope: F) -> Result<u64>
where
    C: ConnectionTrait,
    F: IntoCondition,
{
    let result = Order::update_many()
        .col_expr(order::Column::Status, Expr::value(OrderStatus::Finalized))
        .filter(order::Column::Status.eq(OrderStatus::Pending))
        .filter(scope)
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Finalizes every pending order of one collaborator and returns how many changed.
///
/// # Errors
/// Returns `NoPendingOrders` when the collaborator has nothing pending, which makes a
/// repeated call report not-found rather than silently succeeding.
#[instrument(skip(db))]
pub async fn finalize_pending_orders_for(
    db: &DatabaseConnection,
    collaborator_id: i32,
) -> Result<u64> {
    let finalized =
        finalize_pending_where(db, order::Column::CollaboratorId.eq(collaborator_id)).await?;

    if finalized == 0 {
        return Err(Error::NoPendingOrders { collaborator_id });
    }

    info!("Finalized {finalized} pending orders for collaborator {collaborator_id}");
    Ok(finalized)
}

/// Overwrites every field of an existing order.
///
/// # Errors
/// - `IdMismatch` if `path_id` differs from the body id; nothing is written
/// - `CollaboratorNotFound` / `ProductNotFound` if the body references a missing row
/// - `OrderNotFound` if the row vanished before the write
/// - `Database` for any other update failure
#[instrument(skip(db, model))]
pub async fn replace_order(
    db: &DatabaseConnection,
    path_id: i32,
    model: order::Model,
) -> Result<order::Model> {
    if path_id != model.id {
        return Err(Error::IdMismatch {
            path_id,
            body_id: model.id,
        });
    }

    if Collaborator::find_by_id(model.collaborator_id)
        .count(db)
        .await?
        == 0
    {
        return Err(Error::CollaboratorNotFound {
            id: model.collaborator_id,
        });
    }
    if Product::find_by_id(model.product_id).count(db).await? == 0 {
        return Err(Error::ProductNotFound {
            key: model.product_id.to_string(),
        });
    }

    let active = order::ActiveModel {
        id: Unchanged(model.id),
        order_date: Set(model.order_date.with_timezone(&Utc)),
        collaborator_id: Set(model.collaborator_id),
        product_id: Set(model.product_id),
        status: Set(model.status),
    };

    match active.update(db).await {
        Ok(updated) => {
            info!("Replaced order {}", updated.id);
            Ok(updated)
        }
        Err(DbErr::RecordNotUpdated) => {
            if Order::find_by_id(path_id).count(db).await? > 0 {
                Err(DbErr::RecordNotUpdated.into())
            } else {
                Err(Error::OrderNotFound { id: path_id })
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes an order and returns the removed record.
///
/// # Errors
/// Returns `OrderNotFound` if no such order exists.
#[instrument(skip(db))]
pub async fn delete_order(db: &DatabaseConnection, order_id: i32) -> Result<order::Model> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    order.clone().delete(db).await?;
    info!("Deleted order {order_id}");
    Ok(order)
}
