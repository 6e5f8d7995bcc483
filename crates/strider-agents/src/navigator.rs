//! Target-relative heading frame
//!
//! A synthetic, non-physical frame that follows the walker and turns toward
//! the target on the ground plane. Velocities and positions are expressed
//! in this frame for observations, and its forward axis is the heading the
//! reward compares against.

use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetNavigator {
    position: Vec3,
    heading: Quat,
}

impl Default for TargetNavigator {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Rotation whose +Z axis points along `direction` with +Y up
///
/// `direction` must lie on the ground plane; zero yields identity.
pub fn look_rotation_flat(direction: Vec3) -> Quat {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_y(flat.x.atan2(flat.z))
}

impl TargetNavigator {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            heading: Quat::IDENTITY,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading(&self) -> Quat {
        self.heading
    }

    /// Heading direction on the ground plane (unit length)
    pub fn forward(&self) -> Vec3 {
        self.heading * Vec3::Z
    }

    /// Turn toward the target, then move the frame onto the body
    ///
    /// The direction is measured from the frame's previous position, so the
    /// heading lags the body by one physics step.
    pub fn update(&mut self, body_position: Vec3, target_position: Vec3) {
        self.heading = look_rotation_flat(target_position - self.position);
        self.position = body_position;
    }

    /// Express a world direction in the frame's axes
    pub fn inverse_transform_direction(&self, direction: Vec3) -> Vec3 {
        self.heading.inverse() * direction
    }

    /// Express a world point relative to the frame's origin and axes
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.heading.inverse() * (point - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_direction_yields_identity() {
        let mut navigator = TargetNavigator::new(Vec3::new(1.0, 0.0, 1.0));
        navigator.update(Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(navigator.heading(), Quat::IDENTITY);
        assert!(!navigator.forward().is_nan());
    }

    #[test]
    fn test_target_straight_above_yields_identity() {
        let mut navigator = TargetNavigator::new(Vec3::ZERO);
        navigator.update(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(navigator.heading(), Quat::IDENTITY);
    }

    #[test]
    fn test_heading_points_at_target_on_ground_plane() {
        let mut navigator = TargetNavigator::new(Vec3::ZERO);
        navigator.update(Vec3::ZERO, Vec3::new(10.0, 3.0, 0.0));

        let forward = navigator.forward();
        assert!(forward.abs_diff_eq(Vec3::X, 1e-5));
        assert!(forward.y.abs() < 1e-6);
    }

    #[test]
    fn test_update_relocates_frame_after_turning() {
        let mut navigator = TargetNavigator::new(Vec3::ZERO);
        navigator.update(Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, 10.0));

        // Measured from the old origin the target is ahead on +Z
        assert!(navigator.forward().abs_diff_eq(Vec3::Z, 1e-5));
        assert_eq!(navigator.position(), Vec3::new(0.0, 0.0, 20.0));

        // The next update sees the target behind
        navigator.update(Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, 10.0));
        assert!(navigator.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_inverse_transforms() {
        let mut navigator = TargetNavigator::new(Vec3::ZERO);
        navigator.update(Vec3::new(1.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));

        // Frame faces +X, so world +X is local forward (+Z)
        let local = navigator.inverse_transform_direction(Vec3::new(2.0, 0.0, 0.0));
        assert!(local.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5));

        let point = navigator.inverse_transform_point(Vec3::new(5.0, 1.0, 0.0));
        assert!(point.abs_diff_eq(Vec3::new(0.0, 1.0, 4.0), 1e-5));
    }
}
