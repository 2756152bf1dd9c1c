use std::sync::{Arc, Mutex};

use crate::feed::FeedStore;
use crate::marker::MarkerMap;
use crate::settings::Settings;

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: FeedStore,
    pub map: Arc<Mutex<MarkerMap>>,
    pub settings: Arc<Mutex<Settings>>,
}
