//! Record classification into Transport / Stay / Skip.
//!
//! The checks are explicit and ordered: Transport is decided first and wins
//! over Stay whenever both coordinate pairs are present, regardless of the
//! record's other fields.

use crate::models::{RawRecord, StayInterval, TransportSegment};
use crate::normalize::{city_name, date_prefix, nights_between};

/// Outcome of classifying one raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A directed movement between two coordinates.
    Transport(TransportSegment),
    /// A dwelling period at the arrival point.
    Stay(StayInterval),
    /// No derived entity (missing or departure-only coordinates).
    Skip,
}

/// Classify one raw record.
///
/// * Transport iff both `departure` and `arrival` carry valid pairs.
/// * Stay iff only `arrival` does; inverted date pairs are swapped before
///   night counting, and `nights` is kept only when positive.
/// * Skip for everything else. Departure-only records are skipped here;
///   their city registration side effect happens in the aggregator.
pub fn classify(record: &RawRecord) -> Classification {
    if let (Some(departure), Some(arrival)) = (record.departure, record.arrival) {
        return Classification::Transport(TransportSegment {
            origin: city_name(record.departure_label.as_deref()),
            destination: city_name(record.arrival_label.as_deref()),
            kind: record.kind.clone(),
            origin_position: departure,
            destination_position: arrival,
            departure_date: record.departure_date.clone(),
            arrival_date: record.arrival_date.clone(),
            distance_km: record.distance_km,
        });
    }

    if record.arrival.is_some() {
        let mut start = record.arrival_date.clone();
        let mut end = record.departure_date.clone();
        if let (Some(a), Some(d)) = (start.as_deref(), end.as_deref()) {
            if date_prefix(a) > date_prefix(d) {
                std::mem::swap(&mut start, &mut end);
            }
        }

        let nights = nights_between(start.as_deref(), end.as_deref()).filter(|n| *n > 0);

        return Classification::Stay(StayInterval {
            city: city_name(record.arrival_label.as_deref()),
            kind: record.kind.clone(),
            start,
            end,
            nights,
        });
    }

    Classification::Skip
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn transport_record() -> RawRecord {
        RawRecord {
            departure: Some(Coordinate::new(48.85, 2.35)),
            arrival: Some(Coordinate::new(41.9, 12.5)),
            departure_label: Some("Paris, FR".to_string()),
            arrival_label: Some("Rome, IT".to_string()),
            departure_date: Some("2024-03-01".to_string()),
            arrival_date: Some("2024-03-01".to_string()),
            kind: "flight".to_string(),
            distance_km: Some(1100.0),
        }
    }

    fn stay_record() -> RawRecord {
        RawRecord {
            arrival: Some(Coordinate::new(41.9, 12.5)),
            arrival_label: Some("Rome, IT".to_string()),
            arrival_date: Some("2024-03-01".to_string()),
            departure_date: Some("2024-03-05".to_string()),
            kind: "hotel".to_string(),
            ..Default::default()
        }
    }

    // ── Transport ─────────────────────────────────────────────────────────────

    #[test]
    fn test_transport_when_both_pairs_present() {
        match classify(&transport_record()) {
            Classification::Transport(segment) => {
                assert_eq!(segment.origin, "Paris");
                assert_eq!(segment.destination, "Rome");
                assert_eq!(segment.kind, "flight");
                assert_eq!(segment.distance_km, Some(1100.0));
                assert_eq!(segment.departure_date.as_deref(), Some("2024-03-01"));
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_priority_over_stay() {
        // Dates that would make a valid stay must not turn a two-endpoint
        // record into a StayInterval.
        let record = RawRecord {
            arrival_date: Some("2024-03-01".to_string()),
            departure_date: Some("2024-03-05".to_string()),
            ..transport_record()
        };
        assert!(matches!(classify(&record), Classification::Transport(_)));
    }

    #[test]
    fn test_transport_missing_labels_yield_empty_names() {
        let record = RawRecord {
            departure_label: None,
            arrival_label: None,
            ..transport_record()
        };
        match classify(&record) {
            Classification::Transport(segment) => {
                assert_eq!(segment.origin, "");
                assert_eq!(segment.destination, "");
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    // ── Stay ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_stay_when_arrival_only() {
        match classify(&stay_record()) {
            Classification::Stay(stay) => {
                assert_eq!(stay.city, "Rome");
                assert_eq!(stay.kind, "hotel");
                assert_eq!(stay.start.as_deref(), Some("2024-03-01"));
                assert_eq!(stay.end.as_deref(), Some("2024-03-05"));
                assert_eq!(stay.nights, Some(4));
            }
            other => panic!("expected Stay, got {other:?}"),
        }
    }

    #[test]
    fn test_stay_inverted_dates_swapped() {
        let record = RawRecord {
            arrival_date: Some("2024-05-10".to_string()),
            departure_date: Some("2024-05-03".to_string()),
            ..stay_record()
        };
        match classify(&record) {
            Classification::Stay(stay) => {
                assert_eq!(stay.start.as_deref(), Some("2024-05-03"));
                assert_eq!(stay.end.as_deref(), Some("2024-05-10"));
                assert_eq!(stay.nights, Some(7));
            }
            other => panic!("expected Stay, got {other:?}"),
        }
    }

    #[test]
    fn test_stay_zero_nights_omitted() {
        let record = RawRecord {
            departure_date: Some("2024-03-01".to_string()),
            ..stay_record()
        };
        match classify(&record) {
            Classification::Stay(stay) => assert_eq!(stay.nights, None),
            other => panic!("expected Stay, got {other:?}"),
        }
    }

    #[test]
    fn test_stay_missing_date_omits_nights() {
        let record = RawRecord {
            departure_date: None,
            ..stay_record()
        };
        match classify(&record) {
            Classification::Stay(stay) => {
                assert_eq!(stay.nights, None);
                assert_eq!(stay.start.as_deref(), Some("2024-03-01"));
                assert_eq!(stay.end, None);
            }
            other => panic!("expected Stay, got {other:?}"),
        }
    }

    // ── Skip ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_skip_when_no_coordinates() {
        let record = RawRecord {
            kind: "flight".to_string(),
            ..Default::default()
        };
        assert_eq!(classify(&record), Classification::Skip);
    }

    #[test]
    fn test_skip_departure_only() {
        let record = RawRecord {
            departure: Some(Coordinate::new(48.85, 2.35)),
            departure_label: Some("Paris, FR".to_string()),
            kind: "flight".to_string(),
            ..Default::default()
        };
        assert_eq!(classify(&record), Classification::Skip);
    }
}
