//! Body controller: owns every actuator and ground sensor of one articulated body
//!
//! Registration order is the contract with the policy: it fixes both the
//! layout of the continuous action vector (3 values per actuator) and the
//! layout of the ground/force observations.

use ahash::AHashMap;
use glam::Vec3;

use crate::actuator::{DriveConfig, JointActuator};
use crate::error::BodyError;
use crate::ground_contact::{ContactResponse, GroundSensorConfig, JointGroundSensor};
use crate::physics::{BodyId, ContactEvent, ContactPhase, PhysicsAccess, PhysicsMutAccess};

/// Continuous actions consumed per actuator: two pose axes and a strength
pub const ACTIONS_PER_ACTUATOR: usize = 3;

/// Destination for observation values
pub trait ObservationSink {
    fn add_observation(&mut self, value: f32);
}

impl ObservationSink for Vec<f32> {
    fn add_observation(&mut self, value: f32) {
        self.push(value);
    }
}

/// Index of an actuator in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActuatorHandle(pub usize);

/// Index of a ground sensor in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorHandle(pub usize);

/// What registering a segment produced (either, both or neither)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentRegistration {
    pub actuator: Option<ActuatorHandle>,
    pub sensor: Option<SensorHandle>,
}

pub struct BodyController {
    drive: DriveConfig,
    actuators: Vec<JointActuator>,
    actuator_lookup: AHashMap<BodyId, ActuatorHandle>,
    sensors: Vec<JointGroundSensor>,
    sensor_lookup: AHashMap<BodyId, SensorHandle>,
}

impl BodyController {
    pub fn new(drive: DriveConfig) -> Self {
        Self {
            drive,
            actuators: Vec::new(),
            actuator_lookup: AHashMap::new(),
            sensors: Vec::new(),
            sensor_lookup: AHashMap::new(),
        }
    }

    pub fn drive(&self) -> &DriveConfig {
        &self.drive
    }

    /// Register a segment: an actuator if the backend reports a drivable
    /// joint, a ground sensor if `ground_sensor` is given
    pub fn register_segment(
        &mut self,
        world: &mut impl PhysicsMutAccess,
        body: BodyId,
        ground_sensor: Option<GroundSensorConfig>,
    ) -> Result<SegmentRegistration, BodyError> {
        let state = world.body_state(body).ok_or(BodyError::UnknownBody(body))?;
        if self.actuator_lookup.contains_key(&body) || self.sensor_lookup.contains_key(&body) {
            return Err(BodyError::DuplicateSegment(body));
        }

        let mut registration = SegmentRegistration::default();

        if let Some(limits) = world.angular_limits(body) {
            let handle = ActuatorHandle(self.actuators.len());
            self.actuators.push(JointActuator::new(
                body,
                limits,
                state.local_position,
                state.local_rotation,
            ));
            world.set_velocity_caps(
                body,
                self.drive.max_linear_velocity,
                self.drive.max_angular_velocity,
            );
            self.actuator_lookup.insert(body, handle);
            registration.actuator = Some(handle);
        }

        if let Some(config) = ground_sensor {
            let handle = SensorHandle(self.sensors.len());
            self.sensors.push(JointGroundSensor::new(body, config));
            self.sensor_lookup.insert(body, handle);
            registration.sensor = Some(handle);
        }

        log::debug!(
            "Registered {}: actuator={:?}, ground_sensor={:?}",
            body,
            registration.actuator,
            registration.sensor
        );

        Ok(registration)
    }

    pub fn actuators(&self) -> &[JointActuator] {
        &self.actuators
    }

    pub fn sensors(&self) -> &[JointGroundSensor] {
        &self.sensors
    }

    pub fn actuator_count(&self) -> usize {
        self.actuators.len()
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Continuous actions consumed per step
    pub fn action_size(&self) -> usize {
        ACTIONS_PER_ACTUATOR * self.actuators.len()
    }

    /// Values emitted by the ground and force observation collectors
    pub fn observation_size(&self) -> usize {
        self.sensors.len() + self.actuators.len()
    }

    pub fn has_segment(&self, body: BodyId) -> bool {
        self.actuator_lookup.contains_key(&body)
    }

    /// Restore every actuated segment to its rest pose
    pub fn reset_all(&mut self, world: &mut impl PhysicsMutAccess) {
        for actuator in &self.actuators {
            actuator.reset(world);
        }
    }

    /// One boolean (as 0/1) per ground sensor, in registration order
    pub fn collect_ground_observations(&self, sink: &mut impl ObservationSink) {
        for sensor in &self.sensors {
            sink.add_observation(if sensor.touching_ground() { 1.0 } else { 0.0 });
        }
    }

    /// Drive strength of each actuator normalized to `[0, 1]`, in registration order
    pub fn collect_force_observations(&self, sink: &mut impl ObservationSink) {
        for actuator in &self.actuators {
            sink.add_observation(actuator.current_strength() / self.drive.max_joint_force_limit);
        }
    }

    /// Mean linear velocity over all actuated segments (zero when there are none)
    pub fn average_velocity(&self, world: &impl PhysicsAccess) -> Vec3 {
        if self.actuators.is_empty() {
            return Vec3::ZERO;
        }

        let sum: Vec3 = self
            .actuators
            .iter()
            .map(|actuator| world.linear_velocity(actuator.body()))
            .sum();
        sum / self.actuators.len() as f32
    }

    /// Dispatch a pose action to the segment's actuator
    ///
    /// # Panics
    /// If `body` has no actuator; check with [`Self::has_segment`] first.
    pub fn set_target_pose(
        &mut self,
        world: &mut impl PhysicsMutAccess,
        body: BodyId,
        x: f32,
        y: f32,
        z: f32,
    ) {
        let handle = self.actuator_handle(body);
        self.actuators[handle.0].set_target_pose(world, x, y, z);
    }

    /// Dispatch a strength action to the segment's actuator
    ///
    /// # Panics
    /// If `body` has no actuator; check with [`Self::has_segment`] first.
    pub fn set_strength(&mut self, world: &mut impl PhysicsMutAccess, body: BodyId, strength: f32) {
        let handle = self.actuator_handle(body);
        self.actuators[handle.0].set_strength(world, &self.drive, strength);
    }

    /// Route a backend contact event to the sensor watching that body
    pub fn handle_contact(&mut self, event: &ContactEvent) -> ContactResponse {
        let Some(handle) = self.sensor_lookup.get(&event.body) else {
            return ContactResponse::default();
        };

        let sensor = &mut self.sensors[handle.0];
        match event.phase {
            ContactPhase::Began => sensor.on_collision_enter(&event.tag),
            ContactPhase::Ended => {
                sensor.on_collision_exit(&event.tag);
                ContactResponse::default()
            }
        }
    }

    fn actuator_handle(&self, body: BodyId) -> ActuatorHandle {
        match self.actuator_lookup.get(&body) {
            Some(handle) => *handle,
            None => panic!("{} has no registered actuator", body),
        }
    }
}
