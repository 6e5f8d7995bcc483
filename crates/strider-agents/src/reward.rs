//! Locomotion reward shaping
//!
//! Three additive terms per control step: staying upright, moving along the
//! heading, and moving at the target speed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Not applied: the heading and speed terms are additive
    pub velocity_alignment_multiplier: f32,
    /// Scales the orientation term while the body is upright-ish
    pub upward_alignment_multiplier: f32,
    /// Scales the orientation term while the body is upside down
    pub upward_alignment_negative_multiplier: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            velocity_alignment_multiplier: 1.0,
            upward_alignment_multiplier: 0.1,
            upward_alignment_negative_multiplier: 0.5,
        }
    }
}

/// Individual terms of one step's reward
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RewardBreakdown {
    pub orientation: f32,
    pub heading: f32,
    pub speed_match: f32,
}

impl RewardBreakdown {
    pub fn total(&self) -> f32 {
        self.orientation + self.heading + self.speed_match
    }
}

#[derive(Debug, Clone)]
pub struct LocomotionRewardModel {
    config: RewardConfig,
    target_speed: f32,
}

impl LocomotionRewardModel {
    pub fn new(config: RewardConfig, target_speed: f32) -> Result<Self, ConfigError> {
        if target_speed <= 0.0 || target_speed.is_nan() {
            return Err(ConfigError::NonPositiveTargetSpeed(target_speed));
        }
        Ok(Self {
            config,
            target_speed,
        })
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    /// Velocity the walker should have along `forward`
    pub fn velocity_to_match(&self, forward: Vec3) -> Vec3 {
        forward * self.target_speed
    }

    /// Upright bonus (or upside-down penalty) from the body's up axis
    pub fn orientation_reward(&self, body_up: Vec3) -> f32 {
        let alignment = body_up.dot(Vec3::Y);
        if alignment < 0.0 {
            alignment * self.config.upward_alignment_negative_multiplier
        } else {
            alignment * self.config.upward_alignment_multiplier
        }
    }

    /// Cosine between heading and movement direction; 0 when standing still
    pub fn heading_reward(&self, forward: Vec3, velocity: Vec3) -> f32 {
        forward.dot(velocity.normalize_or_zero())
    }

    /// 1 for a perfect match, falling to 0 once the error reaches the target speed
    pub fn matching_velocity_reward(&self, goal: Vec3, actual: Vec3) -> f32 {
        let delta = actual.distance(goal).clamp(0.0, self.target_speed);
        let ratio = delta / self.target_speed;
        (1.0 - ratio * ratio).powi(2)
    }

    /// [`Self::matching_velocity_reward`] rescaled to `[-1, 1]`
    pub fn speed_match_reward(&self, forward: Vec3, velocity: Vec3) -> f32 {
        let r = self.matching_velocity_reward(self.velocity_to_match(forward), velocity);
        2.0 * r - 1.0
    }

    pub fn evaluate(&self, body_up: Vec3, forward: Vec3, velocity: Vec3) -> RewardBreakdown {
        RewardBreakdown {
            orientation: self.orientation_reward(body_up),
            heading: self.heading_reward(forward, velocity),
            speed_match: self.speed_match_reward(forward, velocity),
        }
    }
}
