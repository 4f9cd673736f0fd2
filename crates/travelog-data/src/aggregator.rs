//! The aggregation pipeline: raw records in, one atomic snapshot out.
//!
//! Owns the three derived collections (cities, transports, stays) and the
//! two rollups (total nights, total kilometres). Each run rebuilds
//! everything from scratch; nothing is carried over between runs.

use std::collections::HashSet;

use travelog_core::classifier::{classify, Classification};
use travelog_core::models::{City, Coordinate, RawRecord, StayInterval, TransportSegment};
use travelog_core::normalize::{city_name, normalize_key};
use travelog_core::presenter::Presenter;
use tracing::debug;

// ── TripSnapshot ──────────────────────────────────────────────────────────────

/// The complete output of one pipeline run.
///
/// Handed to the presentation layer as a single atomic unit; no partial
/// state is observable while the pipeline runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSnapshot {
    /// Deduplicated cities in first-seen order (after the sorting pass).
    pub cities: Vec<City>,
    /// Transport segments in sorted record order, never deduplicated.
    pub transports: Vec<TransportSegment>,
    /// Stay intervals in sorted record order.
    pub stays: Vec<StayInterval>,
    /// Sum of positive night counts over all stays.
    pub total_nights: i64,
    /// Sum of numeric distances over all transports, in kilometres.
    pub total_km: f64,
}

impl TripSnapshot {
    /// Emit the whole snapshot through a [`Presenter`].
    ///
    /// Entities first (cities, transports, stays), rollups last. Does not
    /// clear: callers invoke [`Presenter::clear_all`] before presenting a
    /// fresh run.
    pub fn present(&self, presenter: &mut dyn Presenter) {
        for city in &self.cities {
            presenter.on_city(city);
        }
        for segment in &self.transports {
            let _handle = presenter.on_transport(segment);
        }
        for stay in &self.stays {
            presenter.on_stay(stay);
        }
        presenter.on_rollups(self.total_nights, self.total_km);
    }

    /// `true` when no record produced any derived entity.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.transports.is_empty() && self.stays.is_empty()
    }
}

// ── TripAggregator ────────────────────────────────────────────────────────────

/// Folds a record collection into a [`TripSnapshot`].
#[derive(Debug, Default)]
pub struct TripAggregator {
    cities: Vec<City>,
    seen_keys: HashSet<String>,
    transports: Vec<TransportSegment>,
    stays: Vec<StayInterval>,
    total_nights: i64,
    total_km: f64,
}

impl TripAggregator {
    /// Run the full pipeline over `records`.
    ///
    /// 1. Stable ascending sort on the raw date sort key, so records with
    ///    equal or absent keys keep their input order.
    /// 2. City registration for *every* record with a valid coordinate
    ///    side, independent of classification — a departure-only record
    ///    still places its departure city.
    /// 3. Classification fold into the transport/stay collections and the
    ///    rollups.
    pub fn build(mut records: Vec<RawRecord>) -> TripSnapshot {
        records.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));

        let mut agg = TripAggregator::default();
        for record in &records {
            agg.register_cities(record);
            agg.fold(record);
        }

        debug!(
            cities = agg.cities.len(),
            transports = agg.transports.len(),
            stays = agg.stays.len(),
            "pipeline run complete"
        );

        TripSnapshot {
            cities: agg.cities,
            transports: agg.transports,
            stays: agg.stays,
            total_nights: agg.total_nights,
            total_km: agg.total_km,
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Register both coordinate sides of a record as cities.
    fn register_cities(&mut self, record: &RawRecord) {
        if let Some(position) = record.arrival {
            self.register_city(record.arrival_label.as_deref(), position);
        }
        if let Some(position) = record.departure {
            self.register_city(record.departure_label.as_deref(), position);
        }
    }

    /// First-write-wins city registration keyed by the normalized name.
    fn register_city(&mut self, label: Option<&str>, position: Coordinate) {
        let name = city_name(label);
        let key = normalize_key(&name);
        if self.seen_keys.insert(key.clone()) {
            self.cities.push(City {
                key,
                name,
                position,
            });
        }
    }

    /// Classify one record and fold the result into the collections.
    fn fold(&mut self, record: &RawRecord) {
        match classify(record) {
            Classification::Transport(segment) => {
                if let Some(km) = segment.distance_km {
                    self.total_km += km;
                }
                self.transports.push(segment);
            }
            Classification::Stay(stay) => {
                if let Some(nights) = stay.nights {
                    self.total_nights += nights;
                }
                self.stays.push(stay);
            }
            Classification::Skip => {}
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
