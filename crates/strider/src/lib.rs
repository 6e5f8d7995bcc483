//! Headless rollouts for strider agents
//!
//! Builds walker and escape-room scenes on the kinematic backend and drives
//! them with a policy in a fixed-step loop.

pub mod config;
pub mod policy;
pub mod rollout;
pub mod scene;

pub use config::RolloutConfig;
pub use policy::{IdlePolicy, Policy, RandomPolicy};
pub use rollout::{EpisodeSummary, Rollout, RolloutReport};
