//! Hub directory: serial → hub lookup table.

use std::collections::HashMap;

use domain::models::{GateRole, Hub};

/// Immutable-per-refresh mapping from hub serial to the hub record.
///
/// Each load is a full snapshot replace; there are no merge semantics.
#[derive(Debug, Default)]
pub struct HubDirectory {
    by_serial: HashMap<String, Hub>,
}

impl HubDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire table with `hubs`.
    pub fn load(&mut self, hubs: Vec<Hub>) {
        self.by_serial = hubs
            .into_iter()
            .map(|hub| (hub.serial_number.clone(), hub))
            .collect();
    }

    pub fn lookup(&self, serial: &str) -> Option<&Hub> {
        self.by_serial.get(serial)
    }

    /// Gate role of the hub with `serial`, if the hub is known and is a gate.
    pub fn role_of(&self, serial: &str) -> Option<GateRole> {
        self.lookup(serial).and_then(Hub::gate_role)
    }

    pub fn len(&self) -> usize {
        self.by_serial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_serial.is_empty()
    }
}
