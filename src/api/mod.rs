//! HTTP surface of the snack bar backend.
//!
//! Every route lives under `/api`, split by resource. Handlers are thin: they extract the
//! request, call into [`crate::core`] and let [`error::ApiError`] turn failures into
//! status codes.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::Result;
use handlers::{collaborators, orders, products};
pub use state::AppState;

/// Builds the application router with all routes and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Collaborators
        .route(
            "/api/Colaboradores",
            get(collaborators::list_collaborators).post(collaborators::create_collaborator),
        )
        .route(
            "/api/Colaboradores/ValorTotal",
            get(collaborators::pending_totals),
        )
        .route(
            "/api/Colaboradores/AddColaborador",
            post(collaborators::add_collaborator),
        )
        .route("/api/Colaboradores/BuscaLogin", post(collaborators::login))
        .route(
            "/api/Colaboradores/FinalizarPedidosTodos",
            post(collaborators::finalize_all_orders),
        )
        .route(
            "/api/Colaboradores/EditColaborador/{id}",
            put(collaborators::edit_collaborator),
        )
        .route(
            "/api/Colaboradores/DeleteCol/{id}",
            delete(collaborators::delete_collaborator),
        )
        .route(
            "/api/Colaboradores/{id}",
            get(collaborators::get_collaborator).put(collaborators::replace_collaborator),
        )
        // Orders
        .route("/api/Pedidos", get(orders::list_orders))
        .route("/api/Pedidos/ValorTotal", get(orders::pending_totals))
        .route("/api/Pedidos/Periodo", get(orders::orders_in_period))
        .route("/api/Pedidos/AddPedido", post(orders::place_order))
        .route("/api/Pedidos/PedidoView/{id}", get(orders::get_order_view))
        .route(
            "/api/Pedidos/ViewCol/{idCol}",
            get(orders::list_collaborator_order_views),
        )
        .route(
            "/api/Pedidos/FinalizarPedidos/{idCol}",
            post(orders::finalize_collaborator_orders),
        )
        .route(
            "/api/Pedidos/CodBarrasConfirma/{codigo}",
            get(orders::confirm_barcode),
        )
        .route(
            "/api/Pedidos/DeletePedido/{id}",
            delete(orders::delete_order_with_snapshot),
        )
        .route(
            "/api/Pedidos/{id}",
            get(orders::get_order)
                .put(orders::replace_order)
                .delete(orders::delete_order),
        )
        // Products
        .route(
            "/api/Produtos",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/Produtos/{id}",
            get(products::get_product).delete(products::delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `bind_addr` and serves the API until Ctrl-C.
pub async fn serve(bind_addr: &str, db: DatabaseConnection) -> Result<()> {
    let app = router(AppState::new(db));
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Infobar API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Infobar API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
