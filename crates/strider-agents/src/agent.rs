//! Agent interface driven by the training loop
//!
//! Each physics tick the loop calls, in order: [`Agent::fixed_update`],
//! [`Agent::collect_observations`], [`Agent::on_action_received`], then
//! steps the physics backend and routes its contact and trigger events
//! back into the agent.

use rand::Rng;
use strider_body::physics::{ContactEvent, TriggerEvent};
use strider_body::{PhysicsAccess, PhysicsMutAccess};

use crate::episode::Episode;
use crate::error::AgentError;
use crate::sensor::{ActionBuffers, ActionSpec, VectorSensor};

pub trait Agent {
    /// Length of the vector written by [`Agent::collect_observations`]
    fn observation_size(&self) -> usize;

    fn action_spec(&self) -> ActionSpec;

    /// One-time setup against the scene, before the first episode
    fn initialize<W: PhysicsMutAccess>(&mut self, _world: &mut W) -> Result<(), AgentError> {
        Ok(())
    }

    /// Reset the scene for a new episode
    fn on_episode_begin<W: PhysicsMutAccess, R: Rng + ?Sized>(&mut self, world: &mut W, rng: &mut R);

    fn collect_observations<W: PhysicsAccess>(&self, world: &W, sensor: &mut VectorSensor);

    /// Apply the policy's actions and add this step's rewards
    fn on_action_received<W: PhysicsMutAccess>(&mut self, world: &mut W, actions: &ActionBuffers);

    /// Per-tick bookkeeping before observations are collected
    fn fixed_update<W: PhysicsMutAccess>(&mut self, _world: &mut W, _dt: f32) {}

    fn on_contact(&mut self, _event: &ContactEvent) {}

    fn on_trigger_enter<W: PhysicsMutAccess>(&mut self, _world: &mut W, _event: &TriggerEvent) {}

    fn episode(&self) -> &Episode;

    fn episode_mut(&mut self) -> &mut Episode;
}
