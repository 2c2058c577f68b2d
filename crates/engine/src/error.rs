//! Engine error types.

use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Only bootstrap loads and configuration can fail; everything inside the
/// refresh loop is isolated per device and reported, not raised.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] client::ClientError),
}
