//! Append-only event log with status derivation at ingestion.

use domain::models::ProximityEvent;
use domain::services::derivation::derive_statuses;

use crate::hub_directory::HubDirectory;

/// Growing log of proximity events across all beacons.
///
/// Batches are appended, never deduplicated or compacted: re-ingesting the
/// same events doubles them. Statuses are assigned once, at ingestion.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<ProximityEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a status for every event in `batch` (in batch order, with
    /// flags shared across the whole batch), then appends the batch.
    pub fn ingest(&mut self, mut batch: Vec<ProximityEvent>, hubs: &HubDirectory) {
        derive_statuses(&mut batch, |serial| hubs.role_of(serial));
        self.events.extend(batch);
    }

    /// All events for `serial`, ascending by time. The sort is stable, so
    /// events with equal timestamps keep their ingestion order.
    pub fn by_beacon(&self, serial: &str) -> Vec<ProximityEvent> {
        let mut events: Vec<ProximityEvent> = self
            .events
            .iter()
            .filter(|event| event.beacon_serial == serial)
            .cloned()
            .collect();
        events.sort_by_key(|event| event.time);
        events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
