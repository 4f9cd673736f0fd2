//! Presentation boundary between the pipeline and whatever draws it.
//!
//! The aggregator emits a finished snapshot through this trait; the
//! terminal panel is the production implementation, tests use a recorder.

use crate::models::{City, StayInterval, TransportSegment};

/// Opaque handle to a presented transport segment.
///
/// Returned by [`Presenter::on_transport`] so callers can later trigger a
/// detail view for that segment (popup, selection, ...).
pub type SegmentHandle = usize;

/// Receives the derived entities of one pipeline run.
///
/// `clear_all` is invoked by the *caller* before a fresh snapshot is
/// presented; the emission itself never interleaves clearing with entities,
/// so collaborators only ever observe a complete snapshot.
pub trait Presenter {
    /// Remove every previously presented entity.
    fn clear_all(&mut self);

    /// One deduplicated city marker.
    fn on_city(&mut self, city: &City);

    /// One transport segment; the returned handle identifies it for detail
    /// views.
    fn on_transport(&mut self, segment: &TransportSegment) -> SegmentHandle;

    /// One stay interval.
    fn on_stay(&mut self, interval: &StayInterval);

    /// Final aggregate KPIs, emitted once after all entities.
    fn on_rollups(&mut self, total_nights: i64, total_km: f64);
}
