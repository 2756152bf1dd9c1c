use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

// Import modules
mod badge;
mod constants;
mod feed;
mod html_template;
mod icons;
mod marker;
mod server;
mod settings;
mod utils;

use feed::{FeedItem, FeedStore};
use icons::IconMaps;
use marker::{add_badge_marker, MarkerMap};
use server::{start_server, AppState};
use settings::Settings;

/// Attach one badge marker per feed entry. Entries whose tag pair has no
/// icon mapping are skipped with a warning rather than placed on the map.
fn build_marker_map(items: &[FeedItem], icons: &IconMaps, store: &FeedStore) -> MarkerMap {
    let mut map = MarkerMap::new();
    let mut skipped = 0usize;

    for item in items {
        let attached = add_badge_marker(
            &mut map,
            item.longitude,
            item.latitude,
            &item.zoning_tag,
            &item.progress_tag,
            icons,
            store,
        );
        if attached.is_none() {
            skipped += 1;
        }
    }

    if skipped > 0 {
        warn!("{} feed entries have no icon mapping and were not placed", skipped);
    }

    map
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = Settings::load().context("Failed to load settings")?;
    if !Settings::config_path().exists() {
        if let Err(e) = settings.save() {
            warn!("failed to write default settings file: {}", e);
        }
    }

    let icons = match settings.icon_map_path.as_deref() {
        Some(path) => IconMaps::from_json_file(Path::new(path))
            .with_context(|| format!("Failed to load icon maps from {}", path))?,
        None => IconMaps::builtin(),
    };

    let items = match settings.feed_path.as_deref() {
        Some(path) => feed::load_feed(Path::new(path))
            .with_context(|| format!("Failed to load feed from {}", path))?,
        None => {
            info!("no feed file configured, using the sample feed");
            feed::sample_feed()
        }
    };
    info!("{} feed entries loaded", items.len());

    let store = FeedStore::with_items(items.clone());
    let map = build_marker_map(&items, &icons, &store);
    info!("{} markers attached to the map", map.len());

    let port = settings.port;

    if settings.auto_open_browser {
        let url = format!("http://127.0.0.1:{}", port);
        tokio::spawn(async move {
            // Give the listener a moment to bind
            tokio::time::sleep(Duration::from_millis(300)).await;
            if let Err(e) = utils::open_browser(&url) {
                warn!("failed to open browser: {}", e);
            }
        });
    }

    let app_state = AppState {
        store,
        map: Arc::new(Mutex::new(map)),
        settings: Arc::new(Mutex::new(settings)),
    };

    start_server(app_state, port).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_map_skips_entries_without_icons() {
        let icons = IconMaps::builtin();
        let mut items = feed::sample_feed();
        items[0].zoning_tag = "spaceport".to_string();
        let store = FeedStore::with_items(items.clone());

        let map = build_marker_map(&items, &icons, &store);

        assert_eq!(map.len(), items.len() - 1);
    }

    #[test]
    fn sample_feed_is_fully_mapped() {
        let icons = IconMaps::builtin();
        let items = feed::sample_feed();
        let store = FeedStore::with_items(items.clone());

        let map = build_marker_map(&items, &icons, &store);

        assert_eq!(map.len(), items.len());
    }
}
