use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/report/:company", get(handlers::get_report))
        .route("/api/analyze", post(handlers::analyze_articles))
        .route("/api/report", post(handlers::build_report))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve the API until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> cn_core::Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use cn_core::{Error, Result};
}
