//! Time-window classification of events into status categories.
//!
//! Used by the filter engine, not by ingestion. `now` is an explicit input
//! so results are deterministic under test.

use chrono::{DateTime, Utc};

use crate::models::{ProximityEvent, StatusCategory};

/// Events no older than this count as "found".
pub const FOUND_WINDOW_MINUTES: i64 = 30;

/// Events at least this old count as "missing" (24 hours).
pub const MISSING_THRESHOLD_MINUTES: i64 = 1440;

/// Whether `event` falls into `category` at time `now`.
///
/// `has_resolved_hub` is whether the event's hub serial resolves against
/// the current hub directory; the caller owns that lookup.
///
/// The age may be negative for events timestamped in the future; those
/// classify as ActiveFound. ArrivedAtDestination and Deactivated overlap
/// deliberately: an old event at a known hub satisfies both.
pub fn matches_category(
    event: &ProximityEvent,
    has_resolved_hub: bool,
    now: DateTime<Utc>,
    category: StatusCategory,
) -> bool {
    let age_minutes = (now - event.time).num_minutes();

    match category {
        StatusCategory::ActiveFound => age_minutes <= FOUND_WINDOW_MINUTES,
        StatusCategory::ActiveOnRoute => {
            age_minutes > FOUND_WINDOW_MINUTES && age_minutes < MISSING_THRESHOLD_MINUTES
        }
        StatusCategory::ActiveMissing => age_minutes >= MISSING_THRESHOLD_MINUTES,
        StatusCategory::ArrivedAtDestination => {
            age_minutes >= FOUND_WINDOW_MINUTES && has_resolved_hub
        }
        StatusCategory::Deactivated => age_minutes > FOUND_WINDOW_MINUTES && has_resolved_hub,
    }
}

/// All categories `event` falls into at time `now`.
pub fn categories(
    event: &ProximityEvent,
    has_resolved_hub: bool,
    now: DateTime<Utc>,
) -> Vec<StatusCategory> {
    [
        StatusCategory::ActiveFound,
        StatusCategory::ActiveOnRoute,
        StatusCategory::ActiveMissing,
        StatusCategory::ArrivedAtDestination,
        StatusCategory::Deactivated,
    ]
    .into_iter()
    .filter(|category| matches_category(event, has_resolved_hub, now, *category))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use chrono::{Duration, TimeZone, Utc};

    fn event_aged(minutes: i64, now: DateTime<Utc>) -> ProximityEvent {
        ProximityEvent {
            id: 1,
            time: now - Duration::minutes(minutes),
            sequence: 1,
            beacon_serial: "BCN-1".to_string(),
            hub_serial: Some("HUB-1".to_string()),
            decibels: -55.0,
            status: EventStatus::None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn recent_event_is_active_found() {
        let event = event_aged(20, now());
        assert!(matches_category(
            &event,
            true,
            now(),
            StatusCategory::ActiveFound
        ));
        assert!(!matches_category(
            &event,
            true,
            now(),
            StatusCategory::ActiveOnRoute
        ));
    }

    #[test]
    fn hundred_minute_old_event_is_on_route() {
        let event = event_aged(100, now());
        assert!(matches_category(
            &event,
            true,
            now(),
            StatusCategory::ActiveOnRoute
        ));
        assert!(!matches_category(
            &event,
            true,
            now(),
            StatusCategory::ActiveFound
        ));
    }

    #[test]
    fn day_old_event_is_missing() {
        let event = event_aged(1500, now());
        assert!(matches_category(
            &event,
            true,
            now(),
            StatusCategory::ActiveMissing
        ));
        assert!(!matches_category(
            &event,
            true,
            now(),
            StatusCategory::ActiveOnRoute
        ));
    }

    #[test]
    fn arrived_and_deactivated_overlap() {
        let event = event_aged(40, now());
        let cats = categories(&event, true, now());
        assert!(cats.contains(&StatusCategory::ArrivedAtDestination));
        assert!(cats.contains(&StatusCategory::Deactivated));
    }

    #[test]
    fn unresolved_hub_blocks_arrival_categories() {
        let event = event_aged(40, now());
        assert!(!matches_category(
            &event,
            false,
            now(),
            StatusCategory::ArrivedAtDestination
        ));
        assert!(!matches_category(
            &event,
            false,
            now(),
            StatusCategory::Deactivated
        ));
        // Time-only categories are unaffected by hub resolution.
        assert!(matches_category(
            &event,
            false,
            now(),
            StatusCategory::ActiveOnRoute
        ));
    }

    #[test]
    fn future_event_is_active_found() {
        let event = event_aged(-15, now());
        assert!(matches_category(
            &event,
            true,
            now(),
            StatusCategory::ActiveFound
        ));
    }
}
