//! Order endpoints under `/api/Pedidos`.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::state::AppState;
use crate::core::order::{
    self, DeletedOrder, OrderView, PeriodQuery, PeriodReport, PlaceOrderRequest,
};
use crate::core::product::{self, ProductSummary};
use crate::core::report::{self, CollaboratorTotal};
use crate::entities::OrderModel;
use crate::errors::Error;

use super::MessageResponse;

/// GET /api/Pedidos
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<OrderModel>> {
    Ok(Json(order::list_orders(&state.db).await?))
}

/// GET /api/Pedidos/{id}
pub async fn get_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<OrderModel> {
    order::get_order_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::OrderNotFound { id }.into())
}

/// GET /api/Pedidos/PedidoView/{id}
pub async fn get_order_view(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<OrderView> {
    Ok(Json(order::get_order_view(&state.db, id).await?))
}

/// GET /api/Pedidos/ViewCol/{idCol}
pub async fn list_collaborator_order_views(
    State(state): State<AppState>,
    ApiPath(collaborator_id): ApiPath<i32>,
) -> ApiResult<Vec<OrderView>> {
    Ok(Json(
        order::list_order_views_for_collaborator(&state.db, collaborator_id).await?,
    ))
}

/// GET /api/Pedidos/ValorTotal
///
/// Same freshly computed report as `/api/Colaboradores/ValorTotal`.
pub async fn pending_totals(State(state): State<AppState>) -> ApiResult<Vec<CollaboratorTotal>> {
    Ok(Json(report::collaborators_with_pending_total(&state.db).await?))
}

/// POST /api/Pedidos/FinalizarPedidos/{idCol}
pub async fn finalize_collaborator_orders(
    State(state): State<AppState>,
    ApiPath(collaborator_id): ApiPath<i32>,
) -> ApiResult<MessageResponse> {
    let finalized = order::finalize_pending_orders_for(&state.db, collaborator_id).await?;
    Ok(Json(MessageResponse::with_count(
        "Pending orders finalized",
        finalized,
    )))
}

/// GET /api/Pedidos/CodBarrasConfirma/{codigo}
pub async fn confirm_barcode(
    State(state): State<AppState>,
    ApiPath(code): ApiPath<String>,
) -> ApiResult<ProductSummary> {
    let found = product::find_product_by_barcode(&state.db, &code).await?;
    Ok(Json(ProductSummary::from(found)))
}

/// GET /api/Pedidos/Periodo?dataInicial=..&dataFinal=..&idCol=..
pub async fn orders_in_period(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> ApiResult<PeriodReport> {
    Ok(Json(order::orders_in_period(&state.db, &query).await?))
}

/// PUT /api/Pedidos/{id}
///
/// Full replace; answers 204 on success.
pub async fn replace_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<OrderModel>,
) -> Result<StatusCode, ApiError> {
    order::replace_order(&state.db, id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/Pedidos/AddPedido
///
/// Answers 201 with the order's detail view and a `Location` pointing at it.
pub async fn place_order(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PlaceOrderRequest>,
) -> Result<Response, ApiError> {
    let (placed, view) = order::place_order(&state.db, body).await?;
    let location = format!("/api/Pedidos/PedidoView/{}", placed.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(view)).into_response())
}

/// DELETE /api/Pedidos/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError> {
    order::delete_order(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/Pedidos/DeletePedido/{id}
pub async fn delete_order_with_snapshot(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<DeletedOrder> {
    let deleted = order::delete_order(&state.db, id).await?;
    Ok(Json(DeletedOrder::from(deleted)))
}
