//! Trip feed loading for Travelog.
//!
//! Reads the JSON array of trip records from the configured feed file and
//! converts each element into a [`RawRecord`] for downstream processing.
//! Individual malformed fields degrade to `None`; a malformed record never
//! aborts the run.

use std::path::Path;

use serde_json::Value;
use travelog_core::error::{Result, TravelogError};
use travelog_core::models::{Coordinate, RawRecord};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and parse the trip feed at `path`.
///
/// A read or JSON-parse failure is fatal to the run and returned as an
/// error. A payload that parses but is not a JSON array degrades to an
/// empty record list with a warning; the pipeline then runs and emits an
/// empty snapshot.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| TravelogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let payload: Value = serde_json::from_str(&content)?;
    let records = parse_payload(&payload);

    debug!(
        "Loaded {} trip records from {}",
        records.len(),
        path.display()
    );

    Ok(records)
}

/// Convert a parsed payload into records.
///
/// Non-array payloads yield an empty collection rather than an error.
pub fn parse_payload(payload: &Value) -> Vec<RawRecord> {
    match payload.as_array() {
        Some(items) => items.iter().map(record_from_value).collect(),
        None => {
            warn!("Trip feed payload is not a JSON array; treating as empty");
            Vec::new()
        }
    }
}

/// Map one raw JSON object to a [`RawRecord`].
///
/// Each field is validated independently: a wrong-shaped coordinate array,
/// a non-string label, or a non-numeric distance contributes `None` while
/// the remaining fields are still extracted.
pub fn record_from_value(data: &Value) -> RawRecord {
    RawRecord {
        arrival: coordinate_from(data.get("arrival")),
        departure: coordinate_from(data.get("departure")),
        arrival_label: string_from(data.get("arrival_label")),
        departure_label: string_from(data.get("departure_label")),
        arrival_date: string_from(data.get("arrival_date")),
        departure_date: string_from(data.get("departure_date")),
        kind: data
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        distance_km: data.get("distance_km").and_then(|v| v.as_f64()),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Validate a `[lat, lon]` coordinate pair.
///
/// Anything other than a 2-element array of numbers yields `None`.
fn coordinate_from(value: Option<&Value>) -> Option<Coordinate> {
    let items = value?.as_array()?;
    if items.len() != 2 {
        return None;
    }
    Some(Coordinate {
        lat: items[0].as_f64()?,
        lon: items[1].as_f64()?,
    })
}

fn string_from(value: Option<&Value>) -> Option<String> {
    value?.as_str().map(|s| s.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_feed(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    // ── record_from_value ─────────────────────────────────────────────────────

    #[test]
    fn test_record_from_value_full() {
        let data = serde_json::json!({
            "departure": [48.85, 2.35],
            "arrival": [41.9, 12.5],
            "departure_label": "Paris, FR",
            "arrival_label": "Rome, IT",
            "departure_date": "2024-03-01",
            "arrival_date": "2024-03-01",
            "type": "flight",
            "distance_km": 1100,
        });
        let record = record_from_value(&data);

        assert_eq!(record.departure, Some(Coordinate::new(48.85, 2.35)));
        assert_eq!(record.arrival, Some(Coordinate::new(41.9, 12.5)));
        assert_eq!(record.departure_label.as_deref(), Some("Paris, FR"));
        assert_eq!(record.kind, "flight");
        assert_eq!(record.distance_km, Some(1100.0));
    }

    #[test]
    fn test_record_from_value_wrong_length_coordinate() {
        let data = serde_json::json!({ "arrival": [1], "type": "hotel" });
        let record = record_from_value(&data);
        assert_eq!(record.arrival, None);
        assert_eq!(record.kind, "hotel");
    }

    #[test]
    fn test_record_from_value_non_numeric_coordinate() {
        let data = serde_json::json!({ "arrival": ["a", "b"] });
        assert_eq!(record_from_value(&data).arrival, None);
    }

    #[test]
    fn test_record_from_value_non_string_label() {
        let data = serde_json::json!({
            "arrival": [41.9, 12.5],
            "arrival_label": 42,
        });
        let record = record_from_value(&data);
        // The malformed label degrades to None; the coordinate survives.
        assert_eq!(record.arrival_label, None);
        assert!(record.arrival.is_some());
    }

    #[test]
    fn test_record_from_value_non_numeric_distance() {
        let data = serde_json::json!({ "distance_km": "far" });
        assert_eq!(record_from_value(&data).distance_km, None);
    }

    #[test]
    fn test_record_from_value_empty_object() {
        let record = record_from_value(&serde_json::json!({}));
        assert!(record.arrival.is_none());
        assert!(record.departure.is_none());
        assert_eq!(record.kind, "");
        assert!(record.distance_km.is_none());
    }

    // ── parse_payload ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_payload_array() {
        let payload = serde_json::json!([
            { "arrival": [41.9, 12.5], "type": "hotel" },
            { "type": "note" },
        ]);
        let records = parse_payload(&payload);
        assert_eq!(records.len(), 2);
        assert!(records[0].arrival.is_some());
        assert!(records[1].arrival.is_none());
    }

    #[test]
    fn test_parse_payload_non_array_degrades_to_empty() {
        let payload = serde_json::json!({ "not": "an array" });
        assert!(parse_payload(&payload).is_empty());
    }

    // ── load_records ──────────────────────────────────────────────────────────

    #[test]
    fn test_load_records_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_feed(
            dir.path(),
            "cities.json",
            r#"[{ "arrival": [41.9, 12.5], "arrival_label": "Rome, IT", "type": "hotel" }]"#,
        );

        let records = load_records(&path).expect("load");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].arrival_label.as_deref(), Some("Rome, IT"));
    }

    #[test]
    fn test_load_records_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = load_records(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(TravelogError::FileRead { .. })));
    }

    #[test]
    fn test_load_records_invalid_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_feed(dir.path(), "cities.json", "{broken");
        let result = load_records(&path);
        assert!(matches!(result, Err(TravelogError::JsonParse(_))));
    }

    #[test]
    fn test_load_records_non_array_payload_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_feed(dir.path(), "cities.json", r#"{"records": []}"#);
        let records = load_records(&path).expect("load");
        assert!(records.is_empty());
    }
}
