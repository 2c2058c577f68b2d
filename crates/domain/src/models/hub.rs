//! Hub domain model.

use serde::{Deserialize, Serialize};

use super::triangulation::Point;

/// Hub name token marking the northern site gate.
pub const NORTH_GATE_MARKER: &str = "NH";

/// Hub name token marking the southern site gate.
pub const SOUTH_GATE_MARKER: &str = "SH";

/// Role a hub plays in a beacon's journey, derived from its name token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRole {
    /// Northern gate: beacons passing it are activated / leaving.
    North,
    /// Southern gate: beacons passing it have arrived / are deactivated.
    South,
}

/// A fixed anchor point that detects nearby beacons and emits events.
///
/// Hubs are loaded as a full snapshot per refresh and treated as read-only
/// by every other component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hub {
    #[serde(rename = "SerialNumber")]
    pub serial_number: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub hub_type: String,
    #[serde(rename = "Location")]
    pub location: Point,
}

impl Hub {
    /// Gate role encoded in the hub name, if any. Non-gate hubs return
    /// `None` and do not participate in status derivation.
    pub fn gate_role(&self) -> Option<GateRole> {
        match self.name.as_str() {
            NORTH_GATE_MARKER => Some(GateRole::North),
            SOUTH_GATE_MARKER => Some(GateRole::South),
            _ => None,
        }
    }
}
