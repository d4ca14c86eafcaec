//! Collaborator endpoints under `/api/Colaboradores`.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::state::AppState;
use crate::core::collaborator::{self, CollaboratorInput, LoginRequest};
use crate::core::report::{self, CollaboratorTotal};
use crate::entities::CollaboratorModel;
use crate::errors::Error;

use super::MessageResponse;

fn created(model: CollaboratorModel) -> Response {
    let location = format!("/api/Colaboradores/{}", model.id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(model),
    )
        .into_response()
}

/// GET /api/Colaboradores
pub async fn list_collaborators(State(state): State<AppState>) -> ApiResult<Vec<CollaboratorModel>> {
    Ok(Json(collaborator::list_collaborators(&state.db).await?))
}

/// GET /api/Colaboradores/ValorTotal
pub async fn pending_totals(State(state): State<AppState>) -> ApiResult<Vec<CollaboratorTotal>> {
    Ok(Json(report::collaborators_with_pending_total(&state.db).await?))
}

/// GET /api/Colaboradores/{id}
pub async fn get_collaborator(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<CollaboratorModel> {
    collaborator::get_collaborator_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::CollaboratorNotFound { id }.into())
}

/// PUT /api/Colaboradores/{id}
///
/// Full replace; answers 204 on success.
pub async fn replace_collaborator(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<CollaboratorModel>,
) -> Result<StatusCode, ApiError> {
    collaborator::replace_collaborator(&state.db, id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/Colaboradores/EditColaborador/{id}
pub async fn edit_collaborator(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<CollaboratorInput>,
) -> ApiResult<CollaboratorModel> {
    Ok(Json(
        collaborator::update_collaborator(&state.db, id, body).await?,
    ))
}

/// POST /api/Colaboradores
///
/// Accepts the full entity shape; a client supplied id is ignored.
pub async fn create_collaborator(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CollaboratorModel>,
) -> Result<Response, ApiError> {
    let created_model =
        collaborator::create_collaborator(&state.db, CollaboratorInput::from(body)).await?;
    Ok(created(created_model))
}

/// POST /api/Colaboradores/AddColaborador
pub async fn add_collaborator(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CollaboratorInput>,
) -> Result<Response, ApiError> {
    let created_model = collaborator::create_collaborator(&state.db, body).await?;
    Ok(created(created_model))
}

/// POST /api/Colaboradores/BuscaLogin
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<CollaboratorModel> {
    Ok(Json(collaborator::find_by_credentials(&state.db, &body).await?))
}

/// POST /api/Colaboradores/FinalizarPedidosTodos
pub async fn finalize_all_orders(State(state): State<AppState>) -> ApiResult<MessageResponse> {
    let finalized = collaborator::finalize_all_pending_orders(&state.db).await?;
    Ok(Json(MessageResponse::with_count(
        "All pending orders finalized",
        finalized,
    )))
}

/// DELETE /api/Colaboradores/DeleteCol/{id}
///
/// Returns the deleted collaborator; their orders are removed with them.
pub async fn delete_collaborator(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<CollaboratorModel> {
    Ok(Json(collaborator::delete_collaborator(&state.db, id).await?))
}
