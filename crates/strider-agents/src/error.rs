use strider_body::BodyError;
use thiserror::Error;

/// Rejected configuration values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("target speed must be positive, got {0}")]
    NonPositiveTargetSpeed(f32),

    #[error("minimum agent/target separation must not be negative, got {0}")]
    NegativeSeparation(f32),

    #[error("down raycast distance must be positive, got {0}")]
    NonPositiveRaycastDistance(f32),

    #[error("maximum joint force limit must be positive, got {0}")]
    NonPositiveForceLimit(f32),

    #[error("door open duration must be positive, got {0}")]
    NonPositiveDoorDuration(f32),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("body setup failed: {0}")]
    Body(#[from] BodyError),
}
