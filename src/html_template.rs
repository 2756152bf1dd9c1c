use axum::response::Html;
use serde::Serialize;

use crate::marker::MarkerMap;

// Render data for one marker: where it sits and the element the map binds.
#[derive(Debug, Serialize)]
struct MarkerDescriptor {
    longitude: f64,
    latitude: f64,
    html: String,
}

pub fn get_map_html(map: &MarkerMap) -> Html<String> {
    let descriptors: Vec<MarkerDescriptor> = map
        .markers()
        .iter()
        .map(|marker| MarkerDescriptor {
            longitude: marker.longitude(),
            latitude: marker.latitude(),
            html: marker.badge().to_html(),
        })
        .collect();

    let markers_json =
        serde_json::to_string(&descriptors).unwrap_or_else(|_| "[]".to_string());

    let html = MAP_HTML.replace("/* MARKERS_JSON_PLACEHOLDER */ []", &markers_json);
    Html(html)
}

// HTML template for the map page
const MAP_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ZoneMap</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
        #map { flex: 1; height: 100vh; }
        #feed-panel {
            width: 25%;
            min-width: 320px;
            height: 100vh;
            background: white;
            border-left: 2px solid #ccc;
            overflow-y: auto;
            display: none;
        }
        #feed-panel h3 {
            margin: 0;
            padding: 14px 16px;
            border-bottom: 1px solid #eee;
            color: #333;
        }
        .feed-item {
            padding: 12px 16px;
            border-bottom: 1px solid #eee;
        }
        .feed-item.highlighted {
            background: #fff8dc;
            border-left: 4px solid #f0a500;
        }
        .feed-item .title {
            font-weight: bold;
            margin-bottom: 4px;
        }
        .feed-item .address {
            color: #666;
            font-size: 0.9em;
        }
        .feed-item .tags {
            margin-top: 4px;
            font-size: 0.8em;
            color: #888;
        }
        .feed-item .datetime {
            margin-top: 2px;
            font-size: 0.8em;
            color: #aaa;
        }
    </style>
</head>
<body>
    <div style="display: flex; height: 100vh; margin: 0; padding: 0;">
        <div id="map"></div>
        <div id="feed-panel">
            <h3>Feed</h3>
            <div id="feed-items"></div>
        </div>
    </div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        // Initialize map
        const map = L.map('map').setView([45.53, -122.68], 12);

        L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
            attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
        }).addTo(map);

        // Server-built badge markers
        const badgeMarkers = /* MARKERS_JSON_PLACEHOLDER */ [];

        badgeMarkers.forEach(descriptor => {
            const icon = L.divIcon({
                html: descriptor.html,
                className: '',
                iconSize: [32, 32],
                iconAnchor: [16, 16]
            });

            const marker = L.marker([descriptor.latitude, descriptor.longitude], { icon: icon });
            marker.on('click', () => selectMarker(descriptor.longitude, descriptor.latitude));
            marker.addTo(map);
        });

        if (badgeMarkers.length > 0) {
            const bounds = L.latLngBounds(badgeMarkers.map(d => [d.latitude, d.longitude]));
            map.fitBounds(bounds, { padding: [40, 40] });
        }

        // Dispatch the click to the server-side marker at this coordinate
        async function selectMarker(longitude, latitude) {
            try {
                await fetch('/api/feed/select', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ longitude: longitude, latitude: latitude })
                });
                await loadFeed();
            } catch (error) {
                console.error('Failed to select marker:', error);
            }
        }

        async function loadFeed() {
            try {
                const response = await fetch('/api/feed');
                const snapshot = await response.json();
                renderFeed(snapshot);
            } catch (error) {
                console.error('Failed to load feed:', error);
            }
        }

        function renderFeed(snapshot) {
            const panel = document.getElementById('feed-panel');
            panel.style.display = snapshot.shown ? 'block' : 'none';

            const container = document.getElementById('feed-items');
            container.innerHTML = '';

            snapshot.items.forEach(item => {
                const el = document.createElement('div');
                el.className = item.highlighted ? 'feed-item highlighted' : 'feed-item';
                el.innerHTML = `
                    <div class="title">${item.title}</div>
                    <div class="address">${item.address}</div>
                    <div class="tags">${item.zoning_tag} &middot; ${item.progress_tag}</div>
                    <div class="datetime">${new Date(item.date_created).toLocaleDateString()}</div>
                `;
                container.appendChild(el);
            });
        }

        // Live feed updates
        const events = new EventSource('/api/events');
        events.onmessage = () => loadFeed();

        loadFeed();
    </script>
</body>
</html>"##;
