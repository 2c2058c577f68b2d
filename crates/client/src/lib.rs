//! HTTP transport for the beacon tracker.
//!
//! This crate wraps the four read endpoints of the tracking service behind
//! the [`TrackingApi`] trait. The engine depends on the trait, never on
//! `reqwest` directly, so tests can substitute an in-memory transport.

pub mod api;
pub mod config;
pub mod error;

pub use api::{HttpTrackingApi, TrackingApi};
pub use config::ClientConfig;
pub use error::ClientError;
