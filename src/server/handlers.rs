use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path as AxumPath, State},
    http::{header, StatusCode},
    response::{Html, Json, Response, Sse},
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;
use tracing::debug;

use crate::feed::{FeedEvent, FeedEventData, FeedItem};
use crate::html_template::get_map_html;
use crate::settings::Settings;

use super::state::AppState;

/// Simple MIME type detection based on file extension
fn get_mime_type(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()) {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

// HTTP API Handlers
pub async fn index_html(State(state): State<AppState>) -> Html<String> {
    let map = state.map.lock().unwrap();
    get_map_html(&map)
}

#[derive(Debug, Serialize)]
pub struct FeedSnapshot {
    pub shown: bool,
    pub items: Vec<FeedItem>,
}

pub async fn get_feed(State(state): State<AppState>) -> Json<FeedSnapshot> {
    Json(FeedSnapshot {
        shown: state.store.feed_shown(),
        items: state.store.feed(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub longitude: f64,
    pub latitude: f64,
}

// Dispatch the click action of the marker at the posted coordinate. Clicks
// arrive one at a time from the page; each completes before the next fires.
pub async fn select_marker(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    debug!(
        longitude = request.longitude,
        latitude = request.latitude,
        "marker selected"
    );

    let map = state.map.lock().unwrap();
    let marker = map
        .marker_at(request.longitude, request.latitude)
        .ok_or(StatusCode::NOT_FOUND)?;
    marker.click();

    Ok(Json(serde_json::json!({ "status": "success" })))
}

pub async fn serve_icon(
    State(state): State<AppState>,
    AxumPath(filepath): AxumPath<String>,
) -> Result<Response, StatusCode> {
    if filepath.contains("..") {
        return Err(StatusCode::BAD_REQUEST);
    }

    let icons_dir = {
        let settings = state.settings.lock().unwrap();
        settings.icons_dir.clone()
    };

    let path = std::path::Path::new(&icons_dir).join(&filepath);

    if !path.exists() {
        return Err(StatusCode::NOT_FOUND);
    }

    let content_type = get_mime_type(&path);

    match std::fs::read(&path) {
        Ok(data) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "public, max-age=3600")
            .body(data.into())
            .unwrap()),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

// API endpoint to get current settings
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, StatusCode> {
    let settings = state.settings.lock().unwrap();
    Ok(Json((*settings).clone()))
}

// SSE endpoint for live feed updates
pub async fn feed_events_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let (tx, rx) = mpsc::channel(100);

    // Subscribe to the store's event channel
    let mut event_receiver = state.store.subscribe();

    // Forward store events to the SSE stream
    tokio::spawn(async move {
        loop {
            tokio::select! {
                event = event_receiver.recv() => {
                    match event {
                        Ok(feed_event) => {
                            let sse_event = SseEvent::default()
                                .json_data(&feed_event)
                                .unwrap_or_else(|_| SseEvent::default().data("Error serializing event"));

                            if tx.send(Ok(sse_event)).await.is_err() {
                                break; // Client disconnected
                            }
                        }
                        Err(_) => break, // Channel closed
                    }
                }
                _ = tokio::time::sleep(Duration::from_secs(30)) => {
                    // Send periodic heartbeat
                    let heartbeat = FeedEvent {
                        event_type: "heartbeat".to_string(),
                        data: FeedEventData {
                            message: Some("SSE connection alive".to_string()),
                            ..Default::default()
                        },
                    };

                    let sse_event = SseEvent::default()
                        .json_data(&heartbeat)
                        .unwrap_or_else(|_| SseEvent::default().data("Error serializing heartbeat"));

                    if tx.send(Ok(sse_event)).await.is_err() {
                        break; // Client disconnected
                    }
                }
            }
        }
    });

    let stream = ReceiverStream::new(rx);

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive-message"),
    )
}

// Helper struct for SSE events
use axum::response::sse::Event as SseEvent;
