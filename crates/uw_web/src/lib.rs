use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/topics", get(handlers::list_topics))
        .route("/api/outlets", get(handlers::list_outlets))
        .route("/api/summaries", get(handlers::get_summaries))
        .route("/api/focus", get(handlers::get_focus).delete(handlers::close_focus))
        .route("/api/focus/:leaning", post(handlers::select_focus))
        .route("/api/coverage", get(handlers::get_coverage))
        .route("/api/coverage/timeline", get(handlers::get_timeline))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use uw_core::{Error, Result};
}
