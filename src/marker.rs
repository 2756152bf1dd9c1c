//! Badge marker construction.
//!
//! `add_badge_marker` is the one entry point: resolve the icon pair, build
//! the badge element, wire the click action against the feed store and hand
//! the marker to the map surface. Construction is synchronous and stateless;
//! all mutable state lives in the [`FeedStore`].

use tracing::warn;

use crate::badge::Badge;
use crate::feed::FeedStore;
use crate::icons::IconMaps;

pub type MarkerId = usize;

type ClickAction = Box<dyn Fn() + Send + Sync>;

/// A badge marker bound to one coordinate, ready to render on a map surface.
pub struct Marker {
    badge: Badge,
    longitude: f64,
    latitude: f64,
    on_click: ClickAction,
}

impl Marker {
    pub fn badge(&self) -> &Badge {
        &self.badge
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Run the click action. The UI layer dispatches clicks one at a time.
    pub fn click(&self) {
        (self.on_click)()
    }
}

/// The mapping-surface seam: attaching a marker renders it and yields the
/// handle it can later be addressed by.
pub trait MapCanvas {
    fn attach(&mut self, marker: Marker) -> MarkerId;
}

/// In-process map surface. Owns the attached markers and resolves them by
/// handle or by exact coordinate, the same identity the feed uses.
#[derive(Default)]
pub struct MarkerMap {
    markers: Vec<Marker>,
}

impl MarkerMap {
    pub fn new() -> Self {
        MarkerMap::default()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn marker_at(&self, longitude: f64, latitude: f64) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|m| m.longitude == longitude && m.latitude == latitude)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MapCanvas for MarkerMap {
    fn attach(&mut self, marker: Marker) -> MarkerId {
        self.markers.push(marker);
        self.markers.len() - 1
    }
}

/// Build a badge marker for one coordinate and tag pair and attach it to the
/// canvas, returning the attached handle.
///
/// When either tag has no icon the marker is not created at all: the miss is
/// logged and `None` comes back. A badge with undefined images must never
/// reach the map.
///
/// Clicking the marker shows the feed panel, highlights exactly the feed
/// items at this coordinate and replaces the feed wholesale.
pub fn add_badge_marker(
    canvas: &mut impl MapCanvas,
    longitude: f64,
    latitude: f64,
    zoning_tag: &str,
    progress_tag: &str,
    icons: &IconMaps,
    store: &FeedStore,
) -> Option<MarkerId> {
    let Some(pair) = icons.resolve(zoning_tag, progress_tag) else {
        warn!(zoning_tag, progress_tag, "no icon found for tag pair, marker skipped");
        return None;
    };

    let badge = Badge::new(pair);

    let feed = store.clone();
    let on_click: ClickAction = Box::new(move || {
        feed.set_feed_shown(true);
        feed.highlight_at(longitude, latitude);
    });

    Some(canvas.attach(Marker {
        badge,
        longitude,
        latitude,
        on_click,
    }))
}
