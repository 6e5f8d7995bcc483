//! Physics boundary for articulated bodies
//!
//! These traits define the interface between the actuation layer and the
//! rigid-body engine that actually steps the simulation, so joint and
//! reward logic never depend on a concrete engine.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Collider tag marking walkable ground
pub const GROUND_TAG: &str = "Ground";

/// Handle of a rigid body owned by the physics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(u32);

impl BodyId {
    /// Create a handle from its raw index
    pub const fn from_raw(id: u32) -> Self {
        BodyId(id)
    }

    /// Raw index (useful for debugging/serialization)
    pub fn raw(&self) -> u32 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Snapshot of a rigid body's kinematic state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// World-space position
    pub position: Vec3,
    /// World-space orientation
    pub rotation: Quat,
    /// Position relative to the parent body (equals `position` for roots)
    pub local_position: Vec3,
    /// Orientation relative to the parent body
    pub local_rotation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl BodyState {
    /// Body-space +Z expressed in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Body-space +Y expressed in world space
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Angular range of a drivable joint, in radians
///
/// The X axis is asymmetric (`low_x..high_x`); Y and Z are symmetric
/// (`-y..y`, `-z..z`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularLimits {
    pub low_x: f32,
    pub high_x: f32,
    pub y: f32,
    pub z: f32,
}

impl AngularLimits {
    /// Build limits from angles in degrees
    pub fn from_degrees(low_x: f32, high_x: f32, y: f32, z: f32) -> Self {
        Self {
            low_x: low_x.to_radians(),
            high_x: high_x.to_radians(),
            y: y.to_radians(),
            z: z.to_radians(),
        }
    }
}

/// Spring/damper drive written to a joint each action step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointDrive {
    pub spring: f32,
    pub damper: f32,
    pub max_force: f32,
}

/// How a force passed to [`PhysicsMutAccess::add_force`] is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, integrated over the next step (uses mass)
    Force,
    /// Instant change in momentum (uses mass)
    Impulse,
    /// Instant change in velocity (ignores mass)
    VelocityChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Began,
    Ended,
}

/// Collision begin/end reported by the backend for one body
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEvent {
    pub body: BodyId,
    /// Tag of the collider the body touched
    pub tag: String,
    pub phase: ContactPhase,
}

/// A body entered a trigger volume
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    /// Body owning the trigger volume
    pub trigger_body: BodyId,
    pub trigger_tag: String,
    /// Body that entered the volume
    pub other_body: BodyId,
    pub other_tag: String,
}

/// Events produced by one physics step
#[derive(Debug, Clone, Default)]
pub struct StepEvents {
    pub contacts: Vec<ContactEvent>,
    pub triggers: Vec<TriggerEvent>,
}

/// Read-only access to physics state
pub trait PhysicsAccess {
    /// Current state of a body, or `None` for an unknown handle
    fn body_state(&self, body: BodyId) -> Option<BodyState>;

    /// Angular limits of the body's drivable joint, `None` if it has none
    fn angular_limits(&self, body: BodyId) -> Option<AngularLimits>;

    /// Cast a ray and return the distance to the first ground hit within
    /// `max_distance`
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32>;

    /// Linear velocity of a body (zero for unknown handles)
    fn linear_velocity(&self, body: BodyId) -> Vec3 {
        self.body_state(body)
            .map(|state| state.linear_velocity)
            .unwrap_or(Vec3::ZERO)
    }
}

/// Mutable access to physics state for actuation and episode resets
pub trait PhysicsMutAccess: PhysicsAccess {
    /// Set pose relative to the parent body
    fn set_local_pose(&mut self, body: BodyId, position: Vec3, rotation: Quat);

    /// Set world-space pose (children follow)
    fn set_world_pose(&mut self, body: BodyId, position: Vec3, rotation: Quat);

    fn set_velocities(&mut self, body: BodyId, linear: Vec3, angular: Vec3);

    /// Clamp the speeds the solver may reach for this body
    fn set_velocity_caps(&mut self, body: BodyId, max_linear: f32, max_angular: f32);

    /// Target orientation of the body's joint relative to its rest pose
    fn set_joint_target_rotation(&mut self, body: BodyId, rotation: Quat);

    fn set_joint_drive(&mut self, body: BodyId, drive: JointDrive);

    fn add_force(&mut self, body: BodyId, force: Vec3, mode: ForceMode);

    /// Rotate a body about a world-space axis by `degrees`
    fn rotate(&mut self, body: BodyId, axis: Vec3, degrees: f32);
}
