//! Agent that presses a button to open a door and then reaches the goal
//!
//! Observations (7): pressed flag, direction to the button, direction to
//! the goal. Discrete actions in three branches:
//!
//! | branch | 0          | 1             | 2         |
//! |--------|------------|---------------|-----------|
//! | move   | stay       | forward       | backward  |
//! | rotate | none       | right         | left      |
//! | jump   | stay       | jump          |           |

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strider_body::physics::{ForceMode, TriggerEvent};
use strider_body::{BodyError, PhysicsAccess, PhysicsMutAccess};

use super::playground::EscapeRoom;
use crate::agent::Agent;
use crate::episode::Episode;
use crate::error::AgentError;
use crate::sensor::{ActionBuffers, ActionSpec, VectorSensor};

pub const BUTTON_TAG: &str = "button";
pub const GOAL_TAG: &str = "goal";

pub const OBSERVATION_SIZE: usize = 7;
pub const ACTION_BRANCHES: [usize; 3] = [3, 3, 2];

/// Ground must be within this distance below the agent
const FALL_CHECK_DISTANCE: f32 = 20.0;
/// Seconds between jumps
const JUMP_COOLDOWN: f32 = 2.0;
/// Turn rate in degrees per second
const ROTATION_SPEED: f32 = 300.0;

const BUTTON_REWARD: f32 = 0.7;
const GOAL_REWARD: f32 = 1.0;
const BUTTON_DIRECTION_SCALE: f32 = 0.1;
const GOAL_DIRECTION_SCALE: f32 = 0.001;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EscaperConfig {
    pub walk_speed: f32,
    pub jump_power: f32,
    /// Agent steps per episode (0 = unlimited)
    pub max_step: u32,
    /// Physics tick used for turning and the jump cooldown
    pub fixed_delta_time: f32,
    /// Reward jumping while facing the unpressed button
    pub button_direction_reward: bool,
    /// Reward moving toward the goal once the button is pressed
    pub goal_direction_reward: bool,
    /// Add `-1 / max_step` every step
    pub step_penalty: bool,
}

impl Default for EscaperConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.5,
            jump_power: 5.0,
            max_step: 5000,
            fixed_delta_time: 0.02,
            button_direction_reward: false,
            goal_direction_reward: false,
            step_penalty: false,
        }
    }
}

/// Keyboard state for manual control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeuristicKeys {
    pub w: bool,
    pub s: bool,
    pub a: bool,
    pub d: bool,
    pub space: bool,
}

/// Map keys onto the three action branches; W wins over S and D over A
pub fn heuristic(keys: HeuristicKeys) -> ActionBuffers {
    let movement = if keys.w {
        1
    } else if keys.s {
        2
    } else {
        0
    };
    let rotation = if keys.d {
        1
    } else if keys.a {
        2
    } else {
        0
    };
    ActionBuffers::from_discrete(vec![movement, rotation, usize::from(keys.space)])
}

pub struct ButtonEscaperAgent {
    config: EscaperConfig,
    room: EscapeRoom,
    pressed_button: bool,
    jump_cooldown: f32,
    episode: Episode,
}

impl ButtonEscaperAgent {
    pub fn new(config: EscaperConfig, room: EscapeRoom) -> Self {
        Self {
            episode: Episode::new(config.max_step),
            pressed_button: false,
            jump_cooldown: 0.0,
            config,
            room,
        }
    }

    pub fn config(&self) -> &EscaperConfig {
        &self.config
    }

    pub fn room(&self) -> &EscapeRoom {
        &self.room
    }

    pub fn pressed_button(&self) -> bool {
        self.pressed_button
    }

    pub fn jump_cooldown(&self) -> f32 {
        self.jump_cooldown
    }

    fn direction_to(&self, world: &impl PhysicsAccess, point: Vec3) -> Vec3 {
        (point - self.room.agent_position(world)).normalize_or_zero()
    }

    /// React to the agent entering a trigger volume with the given tag
    pub fn on_tagged_trigger(&mut self, tag: &str) {
        if !self.pressed_button && tag == BUTTON_TAG {
            self.pressed_button = true;
            self.room.open_door();
            self.episode.add_reward(BUTTON_REWARD);
            log::debug!("Button pressed at step {}", self.episode.step_count());
        } else if tag == GOAL_TAG {
            self.episode.add_reward(GOAL_REWARD);
            self.episode.end_episode();
            log::debug!(
                "Goal reached at step {} (reward {:.3})",
                self.episode.step_count(),
                self.episode.cumulative_reward()
            );
        }
    }
}

impl Agent for ButtonEscaperAgent {
    fn observation_size(&self) -> usize {
        OBSERVATION_SIZE
    }

    fn action_spec(&self) -> ActionSpec {
        ActionSpec::discrete(ACTION_BRANCHES.to_vec())
    }

    fn initialize<W: PhysicsMutAccess>(&mut self, world: &mut W) -> Result<(), AgentError> {
        self.room.initialize(&*world)?;
        let agent = self.room.bodies().agent;
        if world.body_state(agent).is_none() {
            return Err(BodyError::UnknownBody(agent).into());
        }
        Ok(())
    }

    fn on_episode_begin<W: PhysicsMutAccess, R: Rng + ?Sized>(
        &mut self,
        world: &mut W,
        rng: &mut R,
    ) {
        self.episode.begin();

        let agent = self.room.bodies().agent;
        let angular = world
            .body_state(agent)
            .map(|state| state.angular_velocity)
            .unwrap_or_default();
        world.set_velocities(agent, Vec3::ZERO, angular);

        self.room.reset(world, rng);
        self.pressed_button = false;
    }

    fn collect_observations<W: PhysicsAccess>(&self, world: &W, sensor: &mut VectorSensor) {
        sensor.add_bool(self.pressed_button);
        sensor.add_vec3(self.direction_to(world, self.room.button_position(world)));
        sensor.add_vec3(self.direction_to(world, self.room.goal_position(world)));
    }

    fn on_action_received<W: PhysicsMutAccess>(&mut self, world: &mut W, actions: &ActionBuffers) {
        assert!(
            actions.discrete.len() >= ACTION_BRANCHES.len(),
            "escaper needs {} discrete actions, got {}",
            ACTION_BRANCHES.len(),
            actions.discrete.len()
        );

        let agent = self.room.bodies().agent;
        let Some(state) = world.body_state(agent) else {
            return;
        };
        let dt = self.config.fixed_delta_time;

        let moving = match actions.discrete[0] {
            1 => 1.0,
            2 => -1.0,
            _ => 0.0,
        };
        let rotate_axis = match actions.discrete[1] {
            1 => state.up(),
            2 => -state.up(),
            _ => Vec3::ZERO,
        };

        world.rotate(agent, rotate_axis, dt * ROTATION_SPEED);

        let forward = world
            .body_state(agent)
            .map(|state| state.forward())
            .unwrap_or(Vec3::Z);
        let walk = (forward * moving).normalize_or_zero() * self.config.walk_speed;
        world.add_force(agent, walk, ForceMode::VelocityChange);

        if actions.discrete[2] == 1 && self.jump_cooldown <= 0.0 {
            self.jump_cooldown = JUMP_COOLDOWN;
            world.add_force(
                agent,
                Vec3::new(0.0, self.config.jump_power, 0.0),
                ForceMode::Impulse,
            );

            if !self.pressed_button && self.config.button_direction_reward {
                let to_button = self.direction_to(&*world, self.room.button_position(&*world));
                self.episode
                    .add_reward(BUTTON_DIRECTION_SCALE * to_button.dot(forward.normalize_or_zero()));
            }
        }

        if self.pressed_button && self.config.goal_direction_reward {
            let velocity = world.linear_velocity(agent).normalize_or_zero();
            let to_goal = self.direction_to(&*world, self.room.goal_position(&*world));
            self.episode
                .add_reward(GOAL_DIRECTION_SCALE * velocity.dot(to_goal));
        }

        let position = self.room.agent_position(&*world);
        if world
            .raycast(position, Vec3::NEG_Y, FALL_CHECK_DISTANCE)
            .is_none()
        {
            log::debug!(
                "Agent fell at ({:.1}, {:.1}, {:.1})",
                position.x,
                position.y,
                position.z
            );
            self.episode.set_reward(-1.0);
            self.episode.end_episode();
        }

        if self.jump_cooldown > 0.0 {
            self.jump_cooldown -= dt;
        }

        if self.config.step_penalty && self.config.max_step > 0 {
            self.episode.add_reward(-1.0 / self.config.max_step as f32);
        }
    }

    fn fixed_update<W: PhysicsMutAccess>(&mut self, world: &mut W, dt: f32) {
        self.room.advance_door(world, dt);
    }

    fn on_trigger_enter<W: PhysicsMutAccess>(&mut self, _world: &mut W, event: &TriggerEvent) {
        if event.other_body == self.room.bodies().agent {
            self.on_tagged_trigger(&event.trigger_tag);
        }
    }

    fn episode(&self) -> &Episode {
        &self.episode
    }

    fn episode_mut(&mut self) -> &mut Episode {
        &mut self.episode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_mapping() {
        let idle = heuristic(HeuristicKeys::default());
        assert_eq!(idle.discrete, vec![0, 0, 0]);

        let keys = HeuristicKeys {
            w: true,
            s: true,
            a: true,
            space: true,
            ..Default::default()
        };
        assert_eq!(heuristic(keys).discrete, vec![1, 2, 1]);

        let keys = HeuristicKeys {
            s: true,
            d: true,
            a: true,
            ..Default::default()
        };
        assert_eq!(heuristic(keys).discrete, vec![2, 1, 0]);
    }
}
