//! Error types for the simulation

use thiserror::Error;

/// Errors that can occur while setting up or running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration was rejected before the run started
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A report sink could not be set up
    #[error("Report sink setup failed: {0}")]
    SinkSetupError(String),

    /// Publishing a finished report failed; the run aborts
    #[error("Report publish failed: {0}")]
    PublishError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a sink setup error
    pub fn sink_setup_error(msg: impl Into<String>) -> Self {
        Self::SinkSetupError(msg.into())
    }

    /// Create a publish error
    pub fn publish_error(msg: impl Into<String>) -> Self {
        Self::PublishError(msg.into())
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
