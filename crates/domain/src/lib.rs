//! Domain layer for the beacon tracker.
//!
//! This crate contains:
//! - Domain models (Device, Hub, ProximityEvent, TriangulationSample)
//! - Filter criteria and status categories
//! - Status derivation and time-window classification services

pub mod models;
pub mod services;
