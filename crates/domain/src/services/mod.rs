//! Domain services: pure functions over the models, no I/O.

pub mod classification;
pub mod derivation;
