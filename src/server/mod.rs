use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

pub use self::state::AppState;

use handlers::{feed_events_stream, get_feed, get_settings, index_html, select_marker, serve_icon};

// Create the main application router
fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/api/feed", get(get_feed))
        .route("/api/feed/select", post(select_marker))
        .route("/api/settings", get(get_settings))
        .route("/api/events", get(feed_events_stream))
        .route("/icons/*filepath", get(serve_icon))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<()> {
    let app = create_app(state);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;

    info!("map server started at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
