//! Optional GeoJSON zones overlay.
//!
//! The overlay is a `Feature` or `FeatureCollection` whose properties carry
//! a display name and optional trip/tooltip text. It is consumed only by
//! the presentation layer and has no effect on the pipeline's data model,
//! so failures here are non-fatal at the call site.

use std::path::Path;

use serde_json::Value;
use travelog_core::error::{Result, TravelogError};
use tracing::debug;

/// One named overlay region from the zones feed.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Display name; `"Zone"` when the feature carries none.
    pub name: String,
    /// Optional trip description shown alongside the name.
    pub trip: Option<String>,
    /// Optional tooltip text.
    pub tooltip: Option<String>,
}

/// Load and parse the zones overlay at `path`.
pub fn load_zones(path: &Path) -> Result<Vec<Zone>> {
    let content = std::fs::read_to_string(path).map_err(|source| TravelogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let geo: Value = serde_json::from_str(&content)?;
    let zones = parse_zones(&geo);

    debug!("Loaded {} zones from {}", zones.len(), path.display());

    Ok(zones)
}

/// Extract zones from a parsed GeoJSON document.
///
/// Accepts a single `Feature` or a `FeatureCollection`; any other shape
/// yields no zones.
pub fn parse_zones(geo: &Value) -> Vec<Zone> {
    let features: Vec<&Value> = match geo.get("type").and_then(|t| t.as_str()) {
        Some("Feature") => vec![geo],
        Some("FeatureCollection") => geo
            .get("features")
            .and_then(|f| f.as_array())
            .map(|items| items.iter().collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    features.iter().map(|feature| zone_from(feature)).collect()
}

fn zone_from(feature: &Value) -> Zone {
    let props = feature.get("properties");
    Zone {
        name: props
            .and_then(|p| p.get("name"))
            .and_then(|v| v.as_str())
            .unwrap_or("Zone")
            .to_string(),
        trip: props
            .and_then(|p| p.get("trip"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        tooltip: props
            .and_then(|p| p.get("tooltip"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
