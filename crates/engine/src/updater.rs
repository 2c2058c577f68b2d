//! Live location updater: sequential per-device polling.

use std::sync::Arc;

use tracing::{debug, warn};

use client::{ClientConfig, ClientError, TrackingApi};

use crate::TrackerEngine;

/// Outcome of polling one device during a refresh.
#[derive(Debug)]
pub struct DeviceRefreshOutcome {
    pub serial: String,
    /// Primary fetch: number of triangulation samples applied.
    pub location: Result<usize, ClientError>,
    /// Secondary fetch: number of events ingested. `None` when the primary
    /// fetch failed (the secondary is never attempted then).
    pub events: Option<Result<usize, ClientError>>,
}

impl DeviceRefreshOutcome {
    pub fn location_updated(&self) -> bool {
        self.location.is_ok()
    }
}

/// Per-refresh report: one outcome per polled device, so partial failure is
/// observable instead of buried in logs.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub outcomes: Vec<DeviceRefreshOutcome>,
    /// Devices skipped because their serial was empty.
    pub skipped: usize,
}

impl RefreshReport {
    pub fn updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.location_updated()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.updated()
    }
}

/// Drives the per-device poll loop.
///
/// Strictly sequential: one outstanding request at a time, to bound load on
/// the upstream service. No retries inside a single `refresh()`; the
/// scheduler achieves eventual freshness by invoking it repeatedly.
pub struct LiveLocationUpdater {
    api: Arc<dyn TrackingApi>,
    event_fetch_count: u32,
    triangulation_fetch_count: u32,
}

impl LiveLocationUpdater {
    pub fn new(api: Arc<dyn TrackingApi>, config: &ClientConfig) -> Self {
        Self {
            api,
            event_fetch_count: config.event_fetch_count,
            triangulation_fetch_count: config.triangulation_fetch_count,
        }
    }

    /// Walks the registry's device list once, in list order.
    ///
    /// For each device: fetch triangulation samples and replace its state;
    /// on success, also fetch recent events and ingest them. Each fetch
    /// failure is isolated to its device (and, for the secondary fetch, to
    /// that fetch alone) and recorded in the report.
    pub async fn refresh(&self, engine: &mut TrackerEngine) -> RefreshReport {
        let serials: Vec<String> = engine
            .devices
            .devices()
            .iter()
            .map(|device| device.serial_number.clone())
            .collect();

        let mut report = RefreshReport::default();

        for serial in serials {
            if serial.is_empty() {
                report.skipped += 1;
                continue;
            }

            let location = match self
                .api
                .triangulation_points(&serial, self.triangulation_fetch_count)
                .await
            {
                Ok(samples) => {
                    let count = samples.len();
                    engine.devices.set_location(&serial, samples);
                    Ok(count)
                }
                Err(e) => {
                    warn!(serial = %serial, error = %e, "Location fetch failed, continuing");
                    report.outcomes.push(DeviceRefreshOutcome {
                        serial,
                        location: Err(e),
                        events: None,
                    });
                    continue;
                }
            };

            // Secondary fetch; its failure is swallowed independently of
            // the primary outcome.
            let events = match self
                .api
                .events_for_beacon(&serial, self.event_fetch_count)
                .await
            {
                Ok(batch) => {
                    let count = batch.len();
                    engine.events.ingest(batch, &engine.hubs);
                    Ok(count)
                }
                Err(e) => {
                    debug!(serial = %serial, error = %e, "Event fetch failed, keeping location update");
                    Err(e)
                }
            };

            report.outcomes.push(DeviceRefreshOutcome {
                serial,
                location,
                events: Some(events),
            });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use domain::models::{
        Circle, Device, EventStatus, Hub, Point, ProximityEvent, TriangulationSample,
    };

    fn device(serial: &str) -> Device {
        Device {
            serial_number: serial.to_string(),
            asset_type: None,
            asset_description: Some(format!("JL {}", serial)),
            owner: None,
            customer_specific_id: None,
            device_state: None,
        }
    }

    fn sample() -> TriangulationSample {
        let circle = Circle {
            centre: Point { x: 0.0, y: 0.0 },
            radius: 1.0,
        };
        TriangulationSample {
            circle1: circle,
            circle2: circle,
            circle3: circle,
            intersection_point: Point { x: 1.0, y: 1.0 },
            final_point: Point { x: 1.0, y: 1.0 },
        }
    }

    fn transport_error() -> ClientError {
        ClientError::UnexpectedStatus {
            status: 503,
            body: "unavailable".to_string(),
        }
    }

    /// In-memory transport with per-serial failure injection.
    struct MockApi {
        fail_locations: HashSet<String>,
        fail_events: HashSet<String>,
        in_flight: AtomicUsize,
    }

    impl MockApi {
        fn new() -> Self {
            Self {
                fail_locations: HashSet::new(),
                fail_events: HashSet::new(),
                in_flight: AtomicUsize::new(0),
            }
        }

        fn enter(&self) {
            let previous = self.in_flight.fetch_add(1, Ordering::SeqCst);
            assert_eq!(previous, 0, "more than one outstanding request");
        }

        fn exit(&self) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl TrackingApi for MockApi {
        async fn list_tags(&self) -> Result<Vec<Device>, ClientError> {
            Ok(vec![])
        }

        async fn list_hubs(&self) -> Result<Vec<Hub>, ClientError> {
            Ok(vec![])
        }

        async fn events_for_beacon(
            &self,
            serial: &str,
            _count: u32,
        ) -> Result<Vec<ProximityEvent>, ClientError> {
            self.enter();
            tokio::task::yield_now().await;
            self.exit();

            if self.fail_events.contains(serial) {
                return Err(transport_error());
            }
            Ok(vec![ProximityEvent {
                id: 1,
                time: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
                sequence: 1,
                beacon_serial: serial.to_string(),
                hub_serial: None,
                decibels: -60.0,
                status: EventStatus::None,
            }])
        }

        async fn triangulation_points(
            &self,
            serial: &str,
            _count: u32,
        ) -> Result<Vec<TriangulationSample>, ClientError> {
            self.enter();
            tokio::task::yield_now().await;
            self.exit();

            if self.fail_locations.contains(serial) {
                return Err(transport_error());
            }
            Ok(vec![sample()])
        }
    }

    fn engine_with(serials: &[&str]) -> TrackerEngine {
        let mut engine = TrackerEngine::new();
        engine
            .devices
            .load(serials.iter().map(|&s| device(s)).collect());
        engine
    }

    fn updater(api: MockApi) -> LiveLocationUpdater {
        LiveLocationUpdater::new(Arc::new(api), &ClientConfig::default())
    }

    #[tokio::test]
    async fn failed_device_does_not_abort_the_run() {
        let mut api = MockApi::new();
        api.fail_locations.insert("BCN-2".to_string());

        let mut engine = engine_with(&["BCN-1", "BCN-2", "BCN-3"]);
        let report = updater(api).refresh(&mut engine).await;

        assert_eq!(report.updated(), 2);
        assert_eq!(report.failed(), 1);
        assert!(engine.devices.devices()[0].device_state.is_some());
        assert!(engine.devices.devices()[1].device_state.is_none());
        assert!(engine.devices.devices()[2].device_state.is_some());
    }

    #[tokio::test]
    async fn event_fetch_failure_keeps_the_location_update() {
        let mut api = MockApi::new();
        api.fail_events.insert("BCN-1".to_string());

        let mut engine = engine_with(&["BCN-1"]);
        let report = updater(api).refresh(&mut engine).await;

        assert_eq!(report.updated(), 1);
        assert!(engine.devices.devices()[0].device_state.is_some());
        assert!(engine.events.is_empty());
        assert!(matches!(report.outcomes[0].events, Some(Err(_))));
    }

    #[tokio::test]
    async fn events_are_ingested_after_a_successful_location_fetch() {
        let api = MockApi::new();
        let mut engine = engine_with(&["BCN-1"]);
        updater(api).refresh(&mut engine).await;

        assert_eq!(engine.events.len(), 1);
        assert_eq!(engine.events.by_beacon("BCN-1").len(), 1);
    }

    #[tokio::test]
    async fn empty_serials_are_skipped() {
        let api = MockApi::new();
        let mut engine = engine_with(&["", "BCN-1"]);
        let report = updater(api).refresh(&mut engine).await;

        assert_eq!(report.skipped, 1);
        assert_eq!(report.outcomes.len(), 1);
    }

    #[tokio::test]
    async fn no_event_fetch_after_a_failed_location_fetch() {
        let mut api = MockApi::new();
        api.fail_locations.insert("BCN-1".to_string());

        let mut engine = engine_with(&["BCN-1"]);
        let report = updater(api).refresh(&mut engine).await;

        assert!(report.outcomes[0].events.is_none());
        assert!(engine.events.is_empty());
    }
}
