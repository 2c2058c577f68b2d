//! Read-side projection of the device registry through a filter criterion.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use domain::models::{Device, FilterCriterion, StatusCategory};
use domain::services::classification::matches_category;

use crate::device_registry::DeviceRegistry;
use crate::event_log::EventLog;
use crate::hub_directory::HubDirectory;

/// Computes the visible subset of `registry` under `criterion`.
///
/// Pure read-side: no mutation anywhere. `now` is threaded explicitly so
/// status filtering is deterministic under test.
///
/// Text criteria are inclusion filters: keep devices whose field contains
/// the value (case-folded); devices missing the field are excluded.
///
/// Status criteria are EXCLUSION filters: a device whose asset description
/// matches that of any beacon with an event in the category is removed.
/// Surprising, but it is the deliberate dashboard contract; do not flip
/// the polarity.
pub fn visible<'a>(
    registry: &'a DeviceRegistry,
    hubs: &HubDirectory,
    events: &EventLog,
    criterion: &FilterCriterion,
    now: DateTime<Utc>,
) -> Vec<&'a Device> {
    match criterion {
        FilterCriterion::None => registry.devices().iter().collect(),

        FilterCriterion::MatchNothing => Vec::new(),

        FilterCriterion::Text { field, value } => {
            if value.is_empty() {
                return registry.devices().iter().collect();
            }
            let needle = value.to_lowercase();
            registry
                .devices()
                .iter()
                .filter(|device| match field.value_of(device) {
                    Some(attr) => attr.to_lowercase().contains(&needle),
                    None => false,
                })
                .collect()
        }

        FilterCriterion::Status(category) => {
            let matched = matched_descriptions(registry, hubs, events, *category, now);
            registry
                .devices()
                .iter()
                .filter(|device| match device.asset_description.as_deref() {
                    Some(description) => !matched.contains(description),
                    None => true,
                })
                .collect()
        }
    }
}

/// Asset descriptions of devices having at least one event in `category`.
fn matched_descriptions<'a>(
    registry: &'a DeviceRegistry,
    hubs: &HubDirectory,
    events: &EventLog,
    category: StatusCategory,
    now: DateTime<Utc>,
) -> HashSet<&'a str> {
    registry
        .devices()
        .iter()
        .filter_map(|device| {
            let description = device.asset_description.as_deref()?;
            let has_match = events
                .by_beacon(&device.serial_number)
                .iter()
                .any(|event| {
                    let resolved = event
                        .hub_serial
                        .as_deref()
                        .and_then(|serial| hubs.lookup(serial))
                        .is_some();
                    matches_category(event, resolved, now, category)
                });
            has_match.then_some(description)
        })
        .collect()
}
