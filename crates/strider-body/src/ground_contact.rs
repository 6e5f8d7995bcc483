//! Per-segment ground contact sensing

use serde::{Deserialize, Serialize};

use crate::physics::{BodyId, GROUND_TAG};

/// Per-sensor reaction to a collision
///
/// The penalty and termination fire on any collision begin, not only on
/// ground contacts; only the touching flag is ground specific.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSensorConfig {
    /// Override the step reward with `ground_contact_penalty` on any contact
    pub penalize_ground_contact: bool,
    pub ground_contact_penalty: f32,
    /// End the episode on contact (e.g. the torso hitting the floor)
    pub end_episode_on_ground_contact: bool,
}

/// What the owning agent should do after a contact began
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactResponse {
    /// Replace the current step reward with this value
    pub reward_override: Option<f32>,
    pub end_episode: bool,
}

impl ContactResponse {
    pub fn is_empty(&self) -> bool {
        self.reward_override.is_none() && !self.end_episode
    }
}

/// Boolean "touching ground" flag for one body segment
///
/// Overlapping ground contacts are not counted: the first exit clears the
/// flag even if another ground collider is still touching.
#[derive(Debug, Clone)]
pub struct JointGroundSensor {
    body: BodyId,
    config: GroundSensorConfig,
    touching_ground: bool,
}

impl JointGroundSensor {
    pub fn new(body: BodyId, config: GroundSensorConfig) -> Self {
        Self {
            body,
            config,
            touching_ground: false,
        }
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn touching_ground(&self) -> bool {
        self.touching_ground
    }

    pub fn config(&self) -> &GroundSensorConfig {
        &self.config
    }

    /// Handle a collision begin; only `"Ground"` sets the touching flag
    pub fn on_collision_enter(&mut self, tag: &str) -> ContactResponse {
        if tag == GROUND_TAG {
            self.touching_ground = true;
        }

        ContactResponse {
            reward_override: self
                .config
                .penalize_ground_contact
                .then_some(self.config.ground_contact_penalty),
            end_episode: self.config.end_episode_on_ground_contact,
        }
    }

    /// Handle a collision end; non-ground tags are ignored
    pub fn on_collision_exit(&mut self, tag: &str) {
        if tag == GROUND_TAG {
            self.touching_ground = false;
        }
    }
}
