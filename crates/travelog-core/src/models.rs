use serde::{Deserialize, Serialize};

use crate::normalize;

/// A geographic point as a latitude / longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One raw trip event as delivered by the data feed.
///
/// Every field except `kind` is optional; the reader degrades any malformed
/// field (wrong-shaped coordinate array, non-string label, non-numeric
/// distance) to `None` so that the rest of the record is still processed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Arrival point, when the feed carried a valid `[lat, lon]` pair.
    pub arrival: Option<Coordinate>,
    /// Departure point, when the feed carried a valid `[lat, lon]` pair.
    pub departure: Option<Coordinate>,
    /// Free-text arrival place label; the city name is the first
    /// comma-delimited token.
    pub arrival_label: Option<String>,
    /// Free-text departure place label.
    pub departure_label: Option<String>,
    /// Raw ISO-8601-prefixed arrival date string, kept verbatim.
    pub arrival_date: Option<String>,
    /// Raw ISO-8601-prefixed departure date string, kept verbatim.
    pub departure_date: Option<String>,
    /// Transport/stay descriptor from the feed's `type` field
    /// (e.g. "flight", "train", "hotel").
    #[serde(rename = "type")]
    pub kind: String,
    /// Distance covered in kilometres, when the feed carried a number.
    pub distance_km: Option<f64>,
}

impl RawRecord {
    /// Key used by the aggregator's ordering pass: the raw departure date,
    /// falling back to the arrival date, falling back to the empty string.
    ///
    /// Comparison is plain lexicographic on the full raw value; callers must
    /// use a stable sort so records with equal keys keep their input order.
    pub fn sort_key(&self) -> &str {
        self.departure_date
            .as_deref()
            .or(self.arrival_date.as_deref())
            .unwrap_or("")
    }
}

/// A deduplicated named geographic point derived from arrival/departure
/// labels.
///
/// Identity is `key` (the normalized city name). The name and position are
/// those of the first record that produced the key after the ordering pass;
/// later records with the same key are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Normalized dedup key (lowercased, diacritics stripped, trimmed).
    pub key: String,
    /// Display name as it first appeared in the feed.
    pub name: String,
    /// Map position taken from the first record producing this key.
    pub position: Coordinate,
}

/// A directed movement between two coordinates with a mode and dates.
///
/// Produced only from records carrying both coordinate pairs; never
/// deduplicated, one segment per qualifying record in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSegment {
    /// Origin city label (first comma token of the departure label).
    pub origin: String,
    /// Destination city label.
    pub destination: String,
    /// Transport descriptor from the feed (e.g. "flight").
    pub kind: String,
    pub origin_position: Coordinate,
    pub destination_position: Coordinate,
    /// Raw departure date, kept for sorting and detail views.
    pub departure_date: Option<String>,
    /// Raw arrival date.
    pub arrival_date: Option<String>,
    /// Distance in kilometres, when the record carried a number.
    pub distance_km: Option<f64>,
}

impl TransportSegment {
    /// Card/popup title, e.g. `"Paris → Rome"`.
    pub fn title(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }

    /// Formatted date range, e.g. `"01/03/2024 → 01/03/2024"`.
    pub fn date_label(&self) -> String {
        format!(
            "{} → {}",
            normalize::format_display_date(self.departure_date.as_deref()),
            normalize::format_display_date(self.arrival_date.as_deref()),
        )
    }

    /// UI styling category derived from the `kind` descriptor.
    pub fn mode(&self) -> TransportMode {
        TransportMode::from_descriptor(&self.kind)
    }
}

/// A dwelling period at one city between two dates.
///
/// Produced only from records with an arrival point but no valid departure
/// pair. `start <= end` holds on the date prefix (inverted raw dates are
/// swapped); `nights` is present only when the computed count is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayInterval {
    /// City label (first comma token of the arrival label).
    pub city: String,
    /// Stay descriptor from the feed (e.g. "hotel").
    pub kind: String,
    /// Raw start date (earlier of the record's two dates).
    pub start: Option<String>,
    /// Raw end date.
    pub end: Option<String>,
    /// Whole-night count, only when positive.
    pub nights: Option<i64>,
}

impl StayInterval {
    /// Formatted date range, e.g. `"03/05/2024 → 10/05/2024"`.
    pub fn date_label(&self) -> String {
        format!(
            "{} → {}",
            normalize::format_display_date(self.start.as_deref()),
            normalize::format_display_date(self.end.as_deref()),
        )
    }
}

/// Styling category for a transport descriptor.
///
/// Matching is case- and diacritic-insensitive substring search so that
/// feed values like "Flight", "avion" or "night train" all classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Flight,
    Train,
    Other,
}

impl TransportMode {
    /// Derive the mode from a free-text descriptor.
    pub fn from_descriptor(kind: &str) -> Self {
        let k = normalize::normalize_key(kind);
        if k.contains("train") {
            return TransportMode::Train;
        }
        if k.contains("flight") || k.contains("plane") || k.contains("avion") {
            return TransportMode::Flight;
        }
        TransportMode::Other
    }
}
