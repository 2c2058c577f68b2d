//! Lifecycle status derivation for ingested event batches.
//!
//! Replayed once per ingested batch: the first northern-gate detection in
//! the batch means "Activated", later ones "Left"; the first southern-gate
//! detection means "Arrived", later ones "Deactivated". Everything else
//! (unresolved hub, non-gate hub) gets no status.
//!
//! The first/subsequent flags are scoped to the whole batch, not to a
//! single beacon: beacons processed in the same ingestion call share them.
//! Per-beacon isolation would likely be more correct, but the batch-wide
//! scope is the established contract dashboards depend on; revisit only
//! with a correctness review. The flags live in a call-local struct so the
//! coupling at least cannot leak across ingestion calls.

use crate::models::{EventStatus, GateRole, ProximityEvent};

/// First-occurrence flags for one ingestion call.
#[derive(Debug, Default)]
struct GateFlags {
    activated: bool,
    arrived: bool,
}

/// Assigns a status to every event in `batch`, in batch order.
///
/// `role_of` resolves a hub serial to its gate role; it returns `None` for
/// unknown hubs and for hubs that are not gates.
pub fn derive_statuses<F>(batch: &mut [ProximityEvent], role_of: F)
where
    F: Fn(&str) -> Option<GateRole>,
{
    let mut flags = GateFlags::default();

    for event in batch.iter_mut() {
        let role = event.hub_serial.as_deref().and_then(&role_of);

        event.status = match role {
            Some(GateRole::North) => {
                if flags.activated {
                    EventStatus::Left
                } else {
                    flags.activated = true;
                    EventStatus::Activated
                }
            }
            Some(GateRole::South) => {
                if flags.arrived {
                    EventStatus::Deactivated
                } else {
                    flags.arrived = true;
                    EventStatus::Arrived
                }
            }
            None => EventStatus::None,
        };
    }
}
