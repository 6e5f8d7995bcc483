//! Training agents for strider bodies
//!
//! This crate implements:
//! - The agent interface a training loop drives (observations, actions, episodes)
//! - A walker agent with a heading frame, randomized arena and locomotion reward
//! - A button-and-door escape room agent

pub mod agent;
pub mod arena;
pub mod episode;
pub mod error;
pub mod escape_room;
pub mod navigator;
pub mod reward;
pub mod sensor;
pub mod trigger;
pub mod walker;

// Re-export main types for convenience
pub use agent::Agent;
pub use arena::{ArenaConfig, EpisodeArena, SpawnLayout, SpawnRect};
pub use episode::{Episode, EpisodeEnd};
pub use error::{AgentError, ConfigError};
pub use escape_room::{
    ButtonEscaperAgent, DoorAnimator, EscapeRoom, EscapeRoomBodies, EscapeRoomConfig,
    EscaperConfig,
};
pub use navigator::TargetNavigator;
pub use reward::{LocomotionRewardModel, RewardBreakdown, RewardConfig};
pub use sensor::{ActionBuffers, ActionSpec, VectorSensor};
pub use trigger::TriggerZone;
pub use walker::{WalkerAgent, WalkerConfig};
