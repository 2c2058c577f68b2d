//! Device registry: the canonical tag list and the active selection.

use domain::models::{Device, TriangulationSample};
use tracing::debug;

/// Holds every loaded device plus the currently selected one.
///
/// Loads accumulate: devices from separate loads are concatenated and
/// duplicates by serial are NOT collapsed. Callers must avoid reloading the
/// same source twice; this matches the established dashboard behavior.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    active_serial: Option<String>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `devices` to the collection.
    pub fn load(&mut self, devices: Vec<Device>) {
        self.devices.extend(devices);
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Selects the device with `serial` as active. Unknown serials are a
    /// silent no-op; the previous selection stays.
    pub fn set_active(&mut self, serial: &str) {
        if self.devices.iter().any(|d| d.serial_number == serial) {
            self.active_serial = Some(serial.to_string());
        } else {
            debug!(serial = %serial, "set_active ignored: unknown device");
        }
    }

    /// The currently selected device, if any.
    pub fn active(&self) -> Option<&Device> {
        let serial = self.active_serial.as_deref()?;
        self.devices.iter().find(|d| d.serial_number == serial)
    }

    /// Replaces the device state of the device with `serial`. Unknown
    /// serials are a silent no-op.
    pub fn set_location(&mut self, serial: &str, samples: Vec<TriangulationSample>) {
        match self
            .devices
            .iter_mut()
            .find(|d| d.serial_number == serial)
        {
            Some(device) => device.device_state = Some(samples),
            None => debug!(serial = %serial, "set_location ignored: unknown device"),
        }
    }
}
