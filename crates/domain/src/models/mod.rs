//! Domain models for the beacon tracker.

pub mod device;
pub mod event;
pub mod filter;
pub mod hub;
pub mod triangulation;

pub use device::{Device, FilterField};
pub use event::{EventStatus, ProximityEvent};
pub use filter::{FilterCriterion, StatusCategory};
pub use hub::{GateRole, Hub};
pub use triangulation::{Circle, Point, TriangulationSample};
