//! Joint actuation
//!
//! Converts normalized policy outputs in `[-1, 1]` into joint target poses
//! and drive strengths.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::{AngularLimits, BodyId, JointDrive, PhysicsMutAccess};

/// Drive parameters shared by every actuator of one body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Upper bound of a joint's maximum force (strength action of +1)
    pub max_joint_force_limit: f32,
    /// Spring constant of every joint drive
    pub max_joint_spring: f32,
    /// Damper constant of every joint drive
    pub joint_dampen: f32,
    /// Angular speed cap applied to every actuated segment (rad/s)
    pub max_angular_velocity: f32,
    /// Linear speed cap applied to every actuated segment
    pub max_linear_velocity: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            max_joint_force_limit: 20000.0,
            max_joint_spring: 40000.0,
            joint_dampen: 5000.0,
            max_angular_velocity: 50.0,
            max_linear_velocity: 50.0,
        }
    }
}

/// Map an action in `[-1, 1]` onto `[0, 1]`, clamping out-of-range input
pub fn normalized_action(value: f32) -> f32 {
    ((value + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Interpolate so that `t == 0` yields `low` and `t == 1` yields `high` exactly
fn lerp(low: f32, high: f32, t: f32) -> f32 {
    low * (1.0 - t) + high * t
}

/// Euler angles (radians, per axis) that a normalized pose action maps to
pub fn target_angles(limits: &AngularLimits, x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(
        lerp(limits.low_x, limits.high_x, normalized_action(x)),
        lerp(-limits.y, limits.y, normalized_action(y)),
        lerp(-limits.z, limits.z, normalized_action(z)),
    )
}

/// Combine per-axis angles into one rotation (Z first, then X, then Y)
pub fn euler_to_rotation(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::YXZ, angles.y, angles.x, angles.z)
}

/// A single drivable joint and the segment it moves
#[derive(Debug, Clone)]
pub struct JointActuator {
    body: BodyId,
    limits: AngularLimits,
    rest_position: Vec3,
    rest_rotation: Quat,
    current_strength: f32,
    target_angles: Vec3,
}

impl JointActuator {
    pub fn new(body: BodyId, limits: AngularLimits, rest_position: Vec3, rest_rotation: Quat) -> Self {
        Self {
            body,
            limits,
            rest_position,
            rest_rotation,
            current_strength: 0.0,
            target_angles: Vec3::ZERO,
        }
    }

    /// Segment driven by this joint
    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn limits(&self) -> &AngularLimits {
        &self.limits
    }

    /// Maximum force of the last drive written, in `[0, max_joint_force_limit]`
    pub fn current_strength(&self) -> f32 {
        self.current_strength
    }

    /// Euler angles of the last target pose written (radians)
    pub fn target_angles(&self) -> Vec3 {
        self.target_angles
    }

    /// Restore the rest pose and stop all motion
    pub fn reset(&self, world: &mut impl PhysicsMutAccess) {
        world.set_local_pose(self.body, self.rest_position, self.rest_rotation);
        world.set_velocities(self.body, Vec3::ZERO, Vec3::ZERO);
    }

    /// Drive the joint toward the pose described by three actions in `[-1, 1]`
    pub fn set_target_pose(&mut self, world: &mut impl PhysicsMutAccess, x: f32, y: f32, z: f32) {
        self.target_angles = target_angles(&self.limits, x, y, z);
        world.set_joint_target_rotation(self.body, euler_to_rotation(self.target_angles));
    }

    /// Set the drive's maximum force from an action in `[-1, 1]`
    pub fn set_strength(&mut self, world: &mut impl PhysicsMutAccess, drive: &DriveConfig, strength: f32) {
        let drive = JointDrive {
            spring: drive.max_joint_spring,
            damper: drive.joint_dampen,
            max_force: normalized_action(strength) * drive.max_joint_force_limit,
        };
        world.set_joint_drive(self.body, drive);
        self.current_strength = drive.max_force;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn limits() -> AngularLimits {
        AngularLimits::from_degrees(-30.0, 60.0, 20.0, 10.0)
    }

    #[test]
    fn test_normalized_action_clamps() {
        assert_eq!(normalized_action(-1.0), 0.0);
        assert_eq!(normalized_action(1.0), 1.0);
        assert_eq!(normalized_action(0.0), 0.5);
        assert_eq!(normalized_action(-7.0), 0.0);
        assert_eq!(normalized_action(3.0), 1.0);
    }

    #[test]
    fn test_extremes_hit_limits_exactly() {
        let limits = limits();

        let low = target_angles(&limits, -1.0, -1.0, -1.0);
        assert_eq!(low.x, limits.low_x);
        assert_eq!(low.y, -limits.y);
        assert_eq!(low.z, -limits.z);

        let high = target_angles(&limits, 1.0, 1.0, 1.0);
        assert_eq!(high.x, limits.high_x);
        assert_eq!(high.y, limits.y);
        assert_eq!(high.z, limits.z);
    }

    #[test]
    fn test_angles_stay_within_limits() {
        let limits = limits();
        let steps = 20;
        for i in 0..=steps {
            let v = -1.0 + 2.0 * i as f32 / steps as f32;
            let angles = target_angles(&limits, v, v, v);
            assert!(angles.x >= limits.low_x && angles.x <= limits.high_x);
            assert!(angles.y.abs() <= limits.y);
            assert!(angles.z.abs() <= limits.z);
        }
    }

    #[test]
    fn test_center_of_symmetric_axes_is_zero() {
        let angles = target_angles(&limits(), 0.0, 0.0, 0.0);
        assert!(angles.y.abs() < 1e-6);
        assert!(angles.z.abs() < 1e-6);
    }

    #[test]
    fn test_euler_single_axis_matches_axis_rotation() {
        let rotation = euler_to_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let expected = Quat::from_rotation_y(FRAC_PI_2);
        assert!(rotation.abs_diff_eq(expected, 1e-6));

        // +Z rotated 90 degrees about Y points along +X
        let forward = rotation * Vec3::Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-6));
    }
}
