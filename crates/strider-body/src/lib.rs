//! Articulated bodies for strider agents
//!
//! This crate implements:
//! - A physics boundary (traits) so actuation never depends on a concrete engine
//! - Joint actuators mapping normalized actions to joint targets and drive strength
//! - Per-segment ground contact sensors
//! - A body controller that owns actuators and sensors in a stable order
//! - A small kinematic backend for tests and headless rollouts

pub mod actuator;
pub mod controller;
pub mod error;
pub mod ground_contact;
pub mod kinematic;
pub mod layout;
pub mod physics;

// Re-export main types for convenience
pub use actuator::{DriveConfig, JointActuator};
pub use controller::{BodyController, ObservationSink, SegmentRegistration};
pub use error::BodyError;
pub use ground_contact::{ContactResponse, GroundSensorConfig, JointGroundSensor};
pub use kinematic::{BodyDesc, KinematicConfig, KinematicWorld};
pub use layout::{BodyLayout, SpawnedBody};
pub use physics::{BodyId, BodyState, PhysicsAccess, PhysicsMutAccess, GROUND_TAG};
