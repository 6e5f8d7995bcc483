//! Escape room scene: spawn rectangle, button stand, door and goal

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strider_body::{BodyError, BodyId, PhysicsAccess, PhysicsMutAccess};

use super::door::DoorAnimator;
use crate::arena::SpawnRect;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeRoomConfig {
    /// One corner of the spawn rectangle (X/Z)
    pub corner_a: Vec2,
    /// The opposite corner (X/Z)
    pub corner_b: Vec2,
    /// How far the door sinks when opened
    pub door_drop_distance: f32,
    /// Seconds the door takes to open
    pub door_open_duration: f32,
}

impl Default for EscapeRoomConfig {
    fn default() -> Self {
        Self {
            corner_a: Vec2::new(-8.0, -8.0),
            corner_b: Vec2::new(8.0, 0.0),
            door_drop_distance: 5.0,
            door_open_duration: 1.0,
        }
    }
}

impl EscapeRoomConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.door_open_duration <= 0.0 || self.door_open_duration.is_nan() {
            return Err(ConfigError::NonPositiveDoorDuration(
                self.door_open_duration,
            ));
        }
        Ok(())
    }
}

/// Scene bodies the room moves around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeRoomBodies {
    pub agent: BodyId,
    pub door: BodyId,
    /// Carries the button; moved as a whole on reset
    pub button_stand: BodyId,
    pub button: BodyId,
    pub goal: BodyId,
}

#[derive(Debug, Clone)]
pub struct EscapeRoom {
    config: EscapeRoomConfig,
    bodies: EscapeRoomBodies,
    rect: SpawnRect,
    door: DoorAnimator,
    agent_height: f32,
    stand_height: f32,
    button_lit: bool,
}

impl EscapeRoom {
    pub fn new(config: EscapeRoomConfig, bodies: EscapeRoomBodies) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rect: SpawnRect::from_corners(config.corner_a, config.corner_b),
            door: DoorAnimator::new(
                Vec3::ZERO,
                Vec3::new(0.0, -config.door_drop_distance, 0.0),
                config.door_open_duration,
            ),
            agent_height: 0.0,
            stand_height: 0.0,
            button_lit: false,
            config,
            bodies,
        })
    }

    /// Record the scene's initial door position and spawn heights
    pub fn initialize(&mut self, world: &impl PhysicsAccess) -> Result<(), BodyError> {
        let state = |body: BodyId| world.body_state(body).ok_or(BodyError::UnknownBody(body));

        let door = state(self.bodies.door)?;
        self.agent_height = state(self.bodies.agent)?.position.y;
        self.stand_height = state(self.bodies.button_stand)?.position.y;
        state(self.bodies.button)?;
        state(self.bodies.goal)?;

        self.door = DoorAnimator::new(
            door.position,
            Vec3::new(0.0, -self.config.door_drop_distance, 0.0),
            self.config.door_open_duration,
        );
        Ok(())
    }

    pub fn bodies(&self) -> &EscapeRoomBodies {
        &self.bodies
    }

    pub fn door(&self) -> &DoorAnimator {
        &self.door
    }

    /// Whether the button shows its pressed state
    pub fn button_lit(&self) -> bool {
        self.button_lit
    }

    pub fn random_spawn_position<R: Rng + ?Sized>(&self, rng: &mut R, y: f32) -> Vec3 {
        self.rect.sample(rng, y)
    }

    /// Put the room back into its start state with fresh random positions
    pub fn reset<R: Rng + ?Sized>(&mut self, world: &mut impl PhysicsMutAccess, rng: &mut R) {
        self.door.stop();
        self.button_lit = false;

        let agent = self.random_spawn_position(rng, self.agent_height);
        move_body(world, self.bodies.agent, agent);

        let stand = self.random_spawn_position(rng, self.stand_height);
        move_body(world, self.bodies.button_stand, stand);

        self.door.close();
        move_body(world, self.bodies.door, self.door.position());
    }

    /// Start (or restart) opening the door and light the button
    pub fn open_door(&mut self) {
        self.door.start();
        self.button_lit = true;
    }

    /// Move the door along its animation
    pub fn advance_door(&mut self, world: &mut impl PhysicsMutAccess, dt: f32) {
        let before = self.door.position();
        let position = self.door.advance(dt);
        if position != before {
            move_body(world, self.bodies.door, position);
        }
    }

    pub fn agent_position(&self, world: &impl PhysicsAccess) -> Vec3 {
        position_of(world, self.bodies.agent)
    }

    pub fn button_position(&self, world: &impl PhysicsAccess) -> Vec3 {
        position_of(world, self.bodies.button)
    }

    pub fn goal_position(&self, world: &impl PhysicsAccess) -> Vec3 {
        position_of(world, self.bodies.goal)
    }
}

fn position_of(world: &impl PhysicsAccess, body: BodyId) -> Vec3 {
    world
        .body_state(body)
        .map(|state| state.position)
        .unwrap_or(Vec3::ZERO)
}

/// Teleport a body, keeping its rotation
fn move_body(world: &mut impl PhysicsMutAccess, body: BodyId, position: Vec3) {
    let rotation = world
        .body_state(body)
        .map(|state| state.rotation)
        .unwrap_or_default();
    world.set_world_pose(body, position, rotation);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_door_duration_rejected() {
        let config = EscapeRoomConfig {
            door_open_duration: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDoorDuration(0.0))
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EscapeRoomConfig::default().validate().is_ok());
    }
}
