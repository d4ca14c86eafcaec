//! Product catalogue endpoints under `/api/Produtos`.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::state::AppState;
use crate::core::product::{self, ProductInput};
use crate::entities::ProductModel;
use crate::errors::Error;

/// GET /api/Produtos
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<ProductModel>> {
    Ok(Json(product::list_products(&state.db).await?))
}

/// GET /api/Produtos/{id}
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ProductModel> {
    product::get_product_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::ProductNotFound { key: id.to_string() }.into())
}

/// POST /api/Produtos
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProductInput>,
) -> Result<Response, ApiError> {
    let created = product::create_product(&state.db, body).await?;
    let location = format!("/api/Produtos/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

/// DELETE /api/Produtos/{id}
///
/// Orders referencing the product are deleted with it.
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<ProductModel> {
    Ok(Json(product::delete_product(&state.db, id).await?))
}
