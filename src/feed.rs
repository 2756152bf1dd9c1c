use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// One entry shown in the feed panel. Entries have no stable map identity of
// their own; markers address them by exact (longitude, latitude) match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: u32,
    pub title: String,
    pub address: String,
    pub zoning_tag: String,
    pub progress_tag: String,
    pub longitude: f64,
    pub latitude: f64,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub highlighted: bool,
}

// SSE event types published by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEvent {
    pub event_type: String,
    pub data: FeedEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedEventData {
    pub shown: Option<bool>,
    pub total: Option<usize>,
    pub highlighted: Option<usize>,
    pub message: Option<String>,
}

/// Shared feed state: the item collection and the panel visibility flag.
///
/// The store is the single owner of mutable state; markers and HTTP handlers
/// hold clones. Every change is broadcast as a [`FeedEvent`] so the panel can
/// refresh live.
#[derive(Clone)]
pub struct FeedStore {
    items: Arc<RwLock<Vec<FeedItem>>>,
    shown: Arc<RwLock<bool>>,
    event_sender: broadcast::Sender<FeedEvent>,
}

impl FeedStore {
    pub fn new() -> Self {
        let (event_sender, _) = broadcast::channel(100);
        FeedStore {
            items: Arc::new(RwLock::new(Vec::new())),
            shown: Arc::new(RwLock::new(false)),
            event_sender,
        }
    }

    pub fn with_items(items: Vec<FeedItem>) -> Self {
        let store = FeedStore::new();
        *store.items.write().unwrap() = items;
        store
    }

    /// Snapshot of the current feed, in stored order.
    pub fn feed(&self) -> Vec<FeedItem> {
        self.items.read().unwrap().clone()
    }

    /// Replace the whole collection. There is no partial update.
    pub fn replace_feed(&self, items: Vec<FeedItem>) {
        let highlighted = items.iter().filter(|item| item.highlighted).count();
        let total = items.len();
        *self.items.write().unwrap() = items;

        let _ = self.event_sender.send(FeedEvent {
            event_type: "feed_replaced".to_string(),
            data: FeedEventData {
                total: Some(total),
                highlighted: Some(highlighted),
                ..Default::default()
            },
        });
    }

    pub fn feed_shown(&self) -> bool {
        *self.shown.read().unwrap()
    }

    pub fn set_feed_shown(&self, shown: bool) {
        *self.shown.write().unwrap() = shown;

        let _ = self.event_sender.send(FeedEvent {
            event_type: "panel_visibility".to_string(),
            data: FeedEventData {
                shown: Some(shown),
                ..Default::default()
            },
        });
    }

    /// Recompute highlights against one coordinate and replace the feed:
    /// items at exactly (longitude, latitude) become highlighted, every other
    /// item loses any previous highlight.
    pub fn highlight_at(&self, longitude: f64, latitude: f64) {
        let updated = self
            .feed()
            .into_iter()
            .map(|mut item| {
                item.highlighted = item.longitude == longitude && item.latitude == latitude;
                item
            })
            .collect();

        self.replace_feed(updated);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.event_sender.subscribe()
    }
}

impl Default for FeedStore {
    fn default() -> Self {
        FeedStore::new()
    }
}

/// Load a feed collection from a JSON file.
pub fn load_feed(path: &Path) -> Result<Vec<FeedItem>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed file {}", path.display()))?;
    let items: Vec<FeedItem> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse feed file {}", path.display()))?;
    Ok(items)
}

/// A small demo feed used when no feed file is configured.
pub fn sample_feed() -> Vec<FeedItem> {
    let now = Utc::now();
    let entry = |id: u32,
                 title: &str,
                 address: &str,
                 zoning_tag: &str,
                 progress_tag: &str,
                 longitude: f64,
                 latitude: f64,
                 days_ago: i64| FeedItem {
        id,
        title: title.to_string(),
        address: address.to_string(),
        zoning_tag: zoning_tag.to_string(),
        progress_tag: progress_tag.to_string(),
        longitude,
        latitude,
        date_created: now - Duration::days(days_ago),
        highlighted: false,
    };

    vec![
        entry(
            1,
            "Riverside Apartments",
            "214 NW Bank St",
            "residential",
            "under_construction",
            -122.6784,
            45.5231,
            2,
        ),
        entry(
            2,
            "Harbor Logistics Hub",
            "9 Terminal Way",
            "industrial",
            "permitted",
            -122.7103,
            45.5512,
            5,
        ),
        entry(
            3,
            "Market Hall Renovation",
            "88 SE Pine St",
            "commercial",
            "proposed",
            -122.6541,
            45.5198,
            9,
        ),
        entry(
            4,
            "Riverside Apartments Phase II",
            "214 NW Bank St",
            "residential",
            "proposed",
            -122.6784,
            45.5231,
            12,
        ),
        entry(
            5,
            "Cedar Grove School",
            "301 N Cedar Ave",
            "institutional",
            "completed",
            -122.6902,
            45.5377,
            30,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_at(id: u32, longitude: f64, latitude: f64) -> FeedItem {
        FeedItem {
            id,
            title: format!("Entry {}", id),
            address: String::new(),
            zoning_tag: "residential".to_string(),
            progress_tag: "proposed".to_string(),
            longitude,
            latitude,
            date_created: Utc::now(),
            highlighted: false,
        }
    }

    #[test]
    fn highlight_at_marks_every_exact_match_and_clears_the_rest() {
        let store = FeedStore::with_items(vec![
            item_at(1, 1.0, 1.0),
            item_at(2, 2.0, 2.0),
            item_at(3, 1.0, 1.0),
        ]);

        store.highlight_at(1.0, 1.0);

        let feed = store.feed();
        assert!(feed[0].highlighted);
        assert!(!feed[1].highlighted);
        assert!(feed[2].highlighted);
    }

    #[test]
    fn highlight_at_clears_previous_highlight_elsewhere() {
        let store = FeedStore::with_items(vec![item_at(1, 1.0, 1.0), item_at(2, 2.0, 2.0)]);

        store.highlight_at(2.0, 2.0);
        store.highlight_at(1.0, 1.0);

        let feed = store.feed();
        assert!(feed[0].highlighted);
        assert!(!feed[1].highlighted);
    }

    #[test]
    fn replace_feed_is_wholesale() {
        let store = FeedStore::with_items(vec![item_at(1, 1.0, 1.0), item_at(2, 2.0, 2.0)]);

        store.replace_feed(vec![item_at(7, 3.0, 3.0)]);

        let feed = store.feed();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, 7);
    }

    #[test]
    fn visibility_flag_round_trips() {
        let store = FeedStore::new();
        assert!(!store.feed_shown());

        store.set_feed_shown(true);
        assert!(store.feed_shown());

        store.set_feed_shown(true);
        assert!(store.feed_shown());
    }

    #[test]
    fn changes_are_broadcast_to_subscribers() {
        let store = FeedStore::with_items(vec![item_at(1, 1.0, 1.0)]);
        let mut events = store.subscribe();

        store.highlight_at(1.0, 1.0);
        let event = events.try_recv().unwrap();
        assert_eq!(event.event_type, "feed_replaced");
        assert_eq!(event.data.highlighted, Some(1));
        assert_eq!(event.data.total, Some(1));

        store.set_feed_shown(true);
        let event = events.try_recv().unwrap();
        assert_eq!(event.event_type, "panel_visibility");
        assert_eq!(event.data.shown, Some(true));
    }

    #[test]
    fn feed_items_round_trip_through_json() {
        let items = sample_feed();
        let raw = serde_json::to_string(&items).unwrap();
        let parsed: Vec<FeedItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), items.len());
        assert_eq!(parsed[0].title, items[0].title);
    }

    #[test]
    fn highlighted_defaults_to_false_when_absent_from_json() {
        let raw = r#"[{
            "id": 1,
            "title": "Entry",
            "address": "1 Main St",
            "zoning_tag": "commercial",
            "progress_tag": "proposed",
            "longitude": -122.65,
            "latitude": 45.52,
            "date_created": "2026-07-01T12:00:00Z"
        }]"#;
        let parsed: Vec<FeedItem> = serde_json::from_str(raw).unwrap();
        assert!(!parsed[0].highlighted);
    }
}
