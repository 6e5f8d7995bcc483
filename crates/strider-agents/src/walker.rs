//! Multi-joint walker that learns to reach a randomly placed target
//!
//! Observation layout (`12 + sensors + actuators` values):
//! - ground flag per sensor, drive strength per actuator
//! - velocity error `|v - f*s|` and heading agreement of the body
//! - heading-frame average velocity, target velocity and target position
//! - normalized distance to the ground below the root
//!
//! Actions: per actuated segment, in layout order, two pose axes and a
//! strength, all in `[-1, 1]`.

use glam::{EulerRot, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strider_body::actuator::euler_to_rotation;
use strider_body::physics::{ContactEvent, TriggerEvent};
use strider_body::{
    BodyController, BodyError, BodyId, BodyLayout, BodyState, DriveConfig, GroundSensorConfig,
    PhysicsAccess, PhysicsMutAccess, SpawnedBody,
};

use crate::agent::Agent;
use crate::arena::{ArenaConfig, EpisodeArena};
use crate::episode::Episode;
use crate::error::{AgentError, ConfigError};
use crate::navigator::TargetNavigator;
use crate::reward::{LocomotionRewardModel, RewardBreakdown, RewardConfig};
use crate::sensor::{ActionBuffers, ActionSpec, VectorSensor};
use crate::trigger::TriggerZone;

/// Observations that do not depend on the body layout
pub const BASE_OBSERVATIONS: usize = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Speed the walker should move at toward the target
    pub target_speed: f32,
    /// Range of the downward ground probe from the root
    pub down_raycast_distance: f32,
    /// Agent steps per episode (0 = unlimited)
    pub max_step: u32,
    pub reward: RewardConfig,
    pub drive: DriveConfig,
    pub arena: ArenaConfig,
    /// Tags the target reacts to
    pub target_trigger: TriggerZone,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            target_speed: 2.0,
            down_raycast_distance: 10.0,
            max_step: 5000,
            reward: RewardConfig::default(),
            drive: DriveConfig::default(),
            arena: ArenaConfig::default(),
            target_trigger: TriggerZone::default(),
        }
    }
}

impl WalkerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_speed <= 0.0 || self.target_speed.is_nan() {
            return Err(ConfigError::NonPositiveTargetSpeed(self.target_speed));
        }
        if self.down_raycast_distance <= 0.0 || self.down_raycast_distance.is_nan() {
            return Err(ConfigError::NonPositiveRaycastDistance(
                self.down_raycast_distance,
            ));
        }
        if self.drive.max_joint_force_limit <= 0.0 || self.drive.max_joint_force_limit.is_nan() {
            return Err(ConfigError::NonPositiveForceLimit(
                self.drive.max_joint_force_limit,
            ));
        }
        self.arena.validate()
    }
}

/// A body segment the agent controls, in layout order
#[derive(Debug, Clone)]
struct SegmentSlot {
    body: BodyId,
    ground_sensor: Option<GroundSensorConfig>,
}

pub struct WalkerAgent {
    config: WalkerConfig,
    root: BodyId,
    target: BodyId,
    segments: Vec<SegmentSlot>,
    controller: BodyController,
    reward_model: LocomotionRewardModel,
    arena: EpisodeArena,
    navigator: TargetNavigator,
    /// Root Euler angles (radians, x/y/z) at initialization
    start_angles: Vec3,
    last_reward: RewardBreakdown,
    episode: Episode,
}

impl WalkerAgent {
    /// Bind a walker to a body already present in the world
    ///
    /// `target` is the trigger body the walker must reach. Call
    /// [`Agent::initialize`] before the first episode.
    pub fn new(
        config: WalkerConfig,
        layout: &BodyLayout,
        body: &SpawnedBody,
        target: BodyId,
    ) -> Result<Self, AgentError> {
        config.validate()?;
        layout.validate()?;

        let segments = layout
            .segments
            .iter()
            .zip(&body.segments)
            .map(|(spec, &id)| SegmentSlot {
                body: id,
                ground_sensor: spec.ground_sensor.clone(),
            })
            .collect();

        Ok(Self {
            reward_model: LocomotionRewardModel::new(config.reward.clone(), config.target_speed)?,
            controller: BodyController::new(config.drive.clone()),
            arena: EpisodeArena::new(&config.arena, 0.0, 0.0),
            episode: Episode::new(config.max_step),
            navigator: TargetNavigator::default(),
            start_angles: Vec3::ZERO,
            last_reward: RewardBreakdown::default(),
            root: body.root,
            target,
            segments,
            config,
        })
    }

    /// Length of the observation vector: `12 + sensors + actuators`
    pub fn observation_size(&self) -> usize {
        BASE_OBSERVATIONS + self.controller.observation_size()
    }

    /// Continuous actions consumed per decision: 3 per actuator
    pub fn action_size(&self) -> usize {
        self.controller.action_size()
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    pub fn root(&self) -> BodyId {
        self.root
    }

    pub fn target(&self) -> BodyId {
        self.target
    }

    pub fn controller(&self) -> &BodyController {
        &self.controller
    }

    pub fn navigator(&self) -> &TargetNavigator {
        &self.navigator
    }

    pub fn arena(&self) -> &EpisodeArena {
        &self.arena
    }

    /// Locomotion terms added by the most recent action
    pub fn last_reward(&self) -> RewardBreakdown {
        self.last_reward
    }

    /// # Panics
    /// If the root body is no longer in the world
    fn root_state(&self, world: &impl PhysicsAccess) -> BodyState {
        match world.body_state(self.root) {
            Some(state) => state,
            None => panic!("walker root {} vanished from the physics backend", self.root),
        }
    }

    fn target_position(&self, world: &impl PhysicsAccess) -> Vec3 {
        world
            .body_state(self.target)
            .map(|state| state.position)
            .unwrap_or_else(|| self.arena.target_position())
    }

    /// React to the target trigger; returns whether the touch counted
    ///
    /// Only the first accepted touch of an episode counts.
    pub fn on_target_touch(&mut self, tag: &str) -> bool {
        if self.episode.is_done() || !self.config.target_trigger.accepts(tag) {
            return false;
        }

        self.episode.add_reward(1.0);
        self.episode.end_episode();
        log::debug!(
            "Target reached after {} steps (reward {:.3})",
            self.episode.step_count(),
            self.episode.cumulative_reward()
        );
        true
    }
}

impl Agent for WalkerAgent {
    fn observation_size(&self) -> usize {
        WalkerAgent::observation_size(self)
    }

    fn action_spec(&self) -> ActionSpec {
        ActionSpec::continuous(self.action_size())
    }

    fn initialize<W: PhysicsMutAccess>(&mut self, world: &mut W) -> Result<(), AgentError> {
        for slot in &self.segments {
            self.controller
                .register_segment(world, slot.body, slot.ground_sensor.clone())?;
        }

        let root = world
            .body_state(self.root)
            .ok_or(BodyError::UnknownBody(self.root))?;
        let target = world
            .body_state(self.target)
            .ok_or(BodyError::UnknownBody(self.target))?;

        let (yaw, pitch, roll) = root.rotation.to_euler(EulerRot::YXZ);
        self.start_angles = Vec3::new(pitch, yaw, roll);
        self.arena = EpisodeArena::new(&self.config.arena, root.position.y, target.position.y);
        self.navigator = TargetNavigator::new(root.position);

        log::debug!(
            "Walker initialized: {} actuators, {} ground sensors, {} observations",
            self.controller.actuator_count(),
            self.controller.sensor_count(),
            WalkerAgent::observation_size(self)
        );
        Ok(())
    }

    fn on_episode_begin<W: PhysicsMutAccess, R: Rng + ?Sized>(
        &mut self,
        world: &mut W,
        rng: &mut R,
    ) {
        self.episode.begin();
        self.last_reward = RewardBreakdown::default();

        world.set_velocities(self.root, Vec3::ZERO, Vec3::ZERO);
        let yaw = rng.gen_range(0.0_f32..180.0).to_radians();
        let rotation = euler_to_rotation(Vec3::new(self.start_angles.x, yaw, self.start_angles.z));

        self.controller.reset_all(world);

        let layout = self.arena.reset(rng);
        world.set_world_pose(self.root, layout.agent, rotation);
        let target_rotation = world
            .body_state(self.target)
            .map(|state| state.rotation)
            .unwrap_or_default();
        world.set_world_pose(self.target, layout.target, target_rotation);
    }

    fn collect_observations<W: PhysicsAccess>(&self, world: &W, sensor: &mut VectorSensor) {
        self.controller.collect_ground_observations(sensor);
        self.controller.collect_force_observations(sensor);

        let forward = self.navigator.forward();
        let average_velocity = self.controller.average_velocity(world);
        let velocity_to_match = self.reward_model.velocity_to_match(forward);
        let root = self.root_state(world);

        sensor.add_f32(average_velocity.distance(velocity_to_match));
        sensor.add_f32(root.forward().dot(forward));

        sensor.add_vec3(self.navigator.inverse_transform_direction(average_velocity));
        sensor.add_vec3(self.navigator.inverse_transform_direction(velocity_to_match));
        sensor.add_vec3(self.navigator.inverse_transform_point(self.target_position(world)));

        let range = self.config.down_raycast_distance;
        match world.raycast(root.position, Vec3::NEG_Y, range) {
            Some(distance) => sensor.add_f32(distance / range),
            None => sensor.add_f32(1.0),
        }
    }

    fn on_action_received<W: PhysicsMutAccess>(&mut self, world: &mut W, actions: &ActionBuffers) {
        let expected = self.controller.action_size();
        assert!(
            actions.continuous.len() >= expected,
            "walker needs {} continuous actions, got {}",
            expected,
            actions.continuous.len()
        );

        let mut values = actions.continuous.iter().copied();
        for slot in &self.segments {
            if !self.controller.has_segment(slot.body) {
                continue;
            }
            let (Some(x), Some(y), Some(strength)) = (values.next(), values.next(), values.next())
            else {
                unreachable!("action buffer length checked above");
            };
            self.controller.set_target_pose(world, slot.body, x, y, 0.0);
            self.controller.set_strength(world, slot.body, strength);
        }

        let root = self.root_state(&*world);
        let breakdown = self.reward_model.evaluate(
            root.up(),
            self.navigator.forward(),
            self.controller.average_velocity(&*world),
        );
        self.episode.add_reward(breakdown.orientation);
        self.episode.add_reward(breakdown.heading);
        self.episode.add_reward(breakdown.speed_match);
        self.last_reward = breakdown;
    }

    fn fixed_update<W: PhysicsMutAccess>(&mut self, world: &mut W, _dt: f32) {
        let root = self.root_state(&*world);
        let target = self.target_position(&*world);
        self.navigator.update(root.position, target);
    }

    fn on_contact(&mut self, event: &ContactEvent) {
        let response = self.controller.handle_contact(event);
        if let Some(reward) = response.reward_override {
            self.episode.set_reward(reward);
        }
        if response.end_episode {
            log::debug!("{} touched the ground, ending episode", event.body);
            self.episode.end_episode();
        }
    }

    fn on_trigger_enter<W: PhysicsMutAccess>(&mut self, _world: &mut W, event: &TriggerEvent) {
        if event.trigger_body == self.target {
            self.on_target_touch(&event.other_tag);
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
    fn test_default_config_is_valid() {
        assert!(WalkerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = WalkerConfig {
            target_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveTargetSpeed(0.0)));

        let config = WalkerConfig {
            down_raycast_distance: -2.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveRaycastDistance(-2.0))
        );

        let mut config = WalkerConfig::default();
        config.drive.max_joint_force_limit = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveForceLimit(0.0)));

        let mut config = WalkerConfig::default();
        config.arena.min_separation = -0.5;
        assert_eq!(config.validate(), Err(ConfigError::NegativeSeparation(-0.5)));
    }
}
