//! Presentation state for the TUI.
//!
//! [`PanelState`] is the terminal-side implementation of the
//! [`Presenter`] boundary: it accumulates the entities a snapshot emits
//! and owns the row selection the event loop moves around. The event loop
//! clears it before presenting each fresh snapshot.

use travelog_core::models::{City, StayInterval, TransportSegment};
use travelog_core::presenter::{Presenter, SegmentHandle};

/// Accumulated view state built from one presented snapshot.
#[derive(Debug, Default)]
pub struct PanelState {
    /// Cities in presentation order.
    pub cities: Vec<City>,
    /// Transport segments in presentation order.
    pub trips: Vec<TransportSegment>,
    /// Stay intervals in presentation order.
    pub stays: Vec<StayInterval>,
    /// Rollup: total nights across all stays.
    pub total_nights: i64,
    /// Rollup: total kilometres across all transports.
    pub total_km: f64,
    /// Currently highlighted trip row, if any.
    pub selected: Option<SegmentHandle>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Move the highlight one trip row down, clamping at the last row.
    pub fn select_next(&mut self) {
        if self.trips.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(self.trips.len() - 1),
            None => 0,
        });
    }

    /// Move the highlight one trip row up, clamping at the first row.
    pub fn select_previous(&mut self) {
        if self.trips.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
    }

    /// The currently highlighted trip, if any.
    pub fn selected_trip(&self) -> Option<&TransportSegment> {
        self.selected.and_then(|i| self.trips.get(i))
    }

    /// `true` when no snapshot has produced any entity yet.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.trips.is_empty() && self.stays.is_empty()
    }
}

impl Presenter for PanelState {
    fn clear_all(&mut self) {
        self.cities.clear();
        self.trips.clear();
        self.stays.clear();
        self.total_nights = 0;
        self.total_km = 0.0;
        // Selection is reconciled after the new snapshot is presented, so a
        // refresh does not lose the user's place.
    }

    fn on_city(&mut self, city: &City) {
        self.cities.push(city.clone());
    }

    fn on_transport(&mut self, segment: &TransportSegment) -> SegmentHandle {
        self.trips.push(segment.clone());
        self.trips.len() - 1
    }

    fn on_stay(&mut self, interval: &StayInterval) {
        self.stays.push(interval.clone());
    }

    fn on_rollups(&mut self, total_nights: i64, total_km: f64) {
        self.total_nights = total_nights;
        self.total_km = total_km;
        // Clamp a stale selection against the new trip count.
        if let Some(i) = self.selected {
            self.selected = if self.trips.is_empty() {
                None
            } else {
                Some(i.min(self.trips.len() - 1))
            };
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use travelog_core::models::Coordinate;

    fn trip(origin: &str, destination: &str) -> TransportSegment {
        TransportSegment {
            origin: origin.to_string(),
            destination: destination.to_string(),
            kind: "flight".to_string(),
            origin_position: Coordinate::new(0.0, 0.0),
            destination_position: Coordinate::new(1.0, 1.0),
            departure_date: Some("2024-03-01".to_string()),
            arrival_date: Some("2024-03-01".to_string()),
            distance_km: Some(1100.0),
        }
    }

    fn stay(city: &str) -> StayInterval {
        StayInterval {
            city: city.to_string(),
            kind: "hotel".to_string(),
            start: Some("2024-03-01".to_string()),
            end: Some("2024-03-05".to_string()),
            nights: Some(4),
        }
    }

    // ── Presenter contract ────────────────────────────────────────────────────

    #[test]
    fn test_on_transport_returns_sequential_handles() {
        let mut panel = PanelState::new();
        let h0 = panel.on_transport(&trip("Paris", "Rome"));
        let h1 = panel.on_transport(&trip("Rome", "Athens"));
        assert_eq!(h0, 0);
        assert_eq!(h1, 1);
        assert_eq!(panel.trips[h1].destination, "Athens");
    }

    #[test]
    fn test_clear_all_resets_entities_and_rollups() {
        let mut panel = PanelState::new();
        panel.on_city(&City {
            key: "rome".to_string(),
            name: "Rome".to_string(),
            position: Coordinate::new(41.9, 12.5),
        });
        panel.on_transport(&trip("Paris", "Rome"));
        panel.on_stay(&stay("Rome"));
        panel.on_rollups(4, 1100.0);

        panel.clear_all();
        assert!(panel.is_empty());
        assert_eq!(panel.total_nights, 0);
        assert_eq!(panel.total_km, 0.0);
    }

    #[test]
    fn test_rollups_stored() {
        let mut panel = PanelState::new();
        panel.on_rollups(12, 3400.5);
        assert_eq!(panel.total_nights, 12);
        assert!((panel.total_km - 3400.5).abs() < 1e-9);
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    #[test]
    fn test_select_next_and_previous_clamp() {
        let mut panel = PanelState::new();
        panel.on_transport(&trip("A", "B"));
        panel.on_transport(&trip("B", "C"));

        panel.select_next();
        assert_eq!(panel.selected, Some(0));
        panel.select_next();
        assert_eq!(panel.selected, Some(1));
        // Clamped at the last row.
        panel.select_next();
        assert_eq!(panel.selected, Some(1));

        panel.select_previous();
        assert_eq!(panel.selected, Some(0));
        panel.select_previous();
        assert_eq!(panel.selected, Some(0));
    }

    #[test]
    fn test_select_on_empty_panel() {
        let mut panel = PanelState::new();
        panel.select_next();
        assert_eq!(panel.selected, None);
        assert!(panel.selected_trip().is_none());
    }

    #[test]
    fn test_selection_survives_refresh_with_clamp() {
        let mut panel = PanelState::new();
        panel.on_transport(&trip("A", "B"));
        panel.on_transport(&trip("B", "C"));
        panel.select_next();
        panel.select_next();
        assert_eq!(panel.selected, Some(1));

        // Refresh presents a smaller snapshot.
        panel.clear_all();
        panel.on_transport(&trip("A", "B"));
        panel.on_rollups(0, 0.0);

        assert_eq!(panel.selected, Some(0));
        assert_eq!(panel.selected_trip().map(|t| t.origin.as_str()), Some("A"));
    }

    #[test]
    fn test_selection_cleared_when_trips_vanish() {
        let mut panel = PanelState::new();
        panel.on_transport(&trip("A", "B"));
        panel.select_next();

        panel.clear_all();
        panel.on_rollups(0, 0.0);

        assert_eq!(panel.selected, None);
    }
}
