//! Icon lookup for badge markers.
//!
//! Two independent vocabularies drive the badge: zoning classifications
//! (left icon) and construction-progress stages (right icon). Both halves
//! are required; a miss on either table yields no icons at all.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Built-in zoning tag → icon path table.
pub static ZONING_ICONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("residential", "/icons/zoning/residential.svg");
    m.insert("commercial", "/icons/zoning/commercial.svg");
    m.insert("industrial", "/icons/zoning/industrial.svg");
    m.insert("mixed_use", "/icons/zoning/mixed_use.svg");
    m.insert("agricultural", "/icons/zoning/agricultural.svg");
    m.insert("institutional", "/icons/zoning/institutional.svg");
    m
});

/// Built-in construction-progress tag → icon path table.
pub static PROGRESS_ICONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("proposed", "/icons/progress/proposed.svg");
    m.insert("permitted", "/icons/progress/permitted.svg");
    m.insert("under_construction", "/icons/progress/under_construction.svg");
    m.insert("completed", "/icons/progress/completed.svg");
    m.insert("stalled", "/icons/progress/stalled.svg");
    m
});

/// The two icon references for one badge, in [zoning, progress] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPair<'a> {
    pub zoning: &'a str,
    pub progress: &'a str,
}

// File format for user-supplied icon maps
#[derive(Deserialize)]
struct IconMapFile {
    zoning: HashMap<String, String>,
    progress: HashMap<String, String>,
}

/// Immutable pair of lookup tables, injected into the marker builder.
#[derive(Debug, Clone)]
pub struct IconMaps {
    zoning: HashMap<String, String>,
    progress: HashMap<String, String>,
}

impl IconMaps {
    /// The built-in vocabulary.
    pub fn builtin() -> Self {
        IconMaps {
            zoning: ZONING_ICONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            progress: PROGRESS_ICONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Load both tables from a JSON file with `zoning` and `progress` objects.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read icon map file {}", path.display()))?;
        let file: IconMapFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse icon map file {}", path.display()))?;
        Ok(IconMaps {
            zoning: file.zoning,
            progress: file.progress,
        })
    }

    /// Resolve a tag pair to its icon pair. Both lookups must hit; otherwise
    /// there is no partial result. Absence is a normal outcome, not an error.
    pub fn resolve(&self, zoning_tag: &str, progress_tag: &str) -> Option<IconPair<'_>> {
        let zoning = self.zoning.get(zoning_tag)?;
        let progress = self.progress.get(progress_tag)?;
        Some(IconPair { zoning, progress })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_tag_pair() {
        let icons = IconMaps::builtin();
        let pair = icons.resolve("residential", "permitted").unwrap();
        assert_eq!(pair.zoning, "/icons/zoning/residential.svg");
        assert_eq!(pair.progress, "/icons/progress/permitted.svg");
    }

    #[test]
    fn unknown_zoning_tag_yields_nothing() {
        let icons = IconMaps::builtin();
        assert!(icons.resolve("spaceport", "permitted").is_none());
    }

    #[test]
    fn unknown_progress_tag_yields_nothing() {
        // Never a partial pair: a valid zoning tag alone is not enough.
        let icons = IconMaps::builtin();
        assert!(icons.resolve("residential", "abandoned").is_none());
    }

    #[test]
    fn both_tags_unknown_yields_nothing() {
        let icons = IconMaps::builtin();
        assert!(icons.resolve("", "").is_none());
    }

    #[test]
    fn builtin_tables_cover_expected_vocabulary() {
        let icons = IconMaps::builtin();
        for zoning in ZONING_ICONS.keys() {
            for progress in PROGRESS_ICONS.keys() {
                assert!(icons.resolve(zoning, progress).is_some());
            }
        }
    }
}
