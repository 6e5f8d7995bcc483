//! Body layouts
//!
//! Physics-independent descriptions of articulated bodies: which segments
//! exist, how they hang together, which joints are drivable and which
//! segments carry ground sensors.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::BodyError;
use crate::ground_contact::GroundSensorConfig;
use crate::kinematic::{BodyDesc, KinematicWorld};
use crate::physics::{AngularLimits, BodyId};

/// One rigid segment of a layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub name: String,
    /// Index of an earlier segment; `None` only for the root
    pub parent: Option<usize>,
    pub local_position: Vec3,
    pub radius: f32,
    pub mass: f32,
    /// Drivable joint connecting this segment to its parent
    pub joint: Option<AngularLimits>,
    pub ground_sensor: Option<GroundSensorConfig>,
}

/// Abstract body (physics-independent, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyLayout {
    pub segments: Vec<SegmentSpec>,
    pub root_index: usize,
}

/// Handles of a layout instantiated in a physics world, in layout order
#[derive(Debug, Clone)]
pub struct SpawnedBody {
    pub root: BodyId,
    pub segments: Vec<BodyId>,
}

fn segment(
    name: &str,
    parent: Option<usize>,
    local_position: Vec3,
    radius: f32,
    joint: Option<AngularLimits>,
    ground_sensor: Option<GroundSensorConfig>,
) -> SegmentSpec {
    SegmentSpec {
        name: name.to_string(),
        parent,
        local_position,
        radius,
        mass: radius * 4.0,
        joint,
        ground_sensor,
    }
}

/// Torso contact ends the episode; the walker has fallen over
fn torso_sensor() -> GroundSensorConfig {
    GroundSensorConfig {
        penalize_ground_contact: false,
        ground_contact_penalty: 0.0,
        end_episode_on_ground_contact: true,
    }
}

impl BodyLayout {
    /// Torso with four two-segment legs
    pub fn quadruped() -> Self {
        let hip = AngularLimits::from_degrees(-60.0, 60.0, 30.0, 0.0);
        let knee = AngularLimits::from_degrees(-60.0, 0.0, 0.0, 0.0);

        let mut segments = vec![segment(
            "torso",
            None,
            Vec3::ZERO,
            0.5,
            None,
            Some(torso_sensor()),
        )];

        let corners = [
            ("front_left", Vec3::new(-0.6, -0.1, 0.6)),
            ("front_right", Vec3::new(0.6, -0.1, 0.6)),
            ("back_left", Vec3::new(-0.6, -0.1, -0.6)),
            ("back_right", Vec3::new(0.6, -0.1, -0.6)),
        ];

        for (name, offset) in corners {
            let thigh = segments.len();
            segments.push(segment(
                &format!("{}_thigh", name),
                Some(0),
                offset,
                0.25,
                Some(hip),
                None,
            ));
            segments.push(segment(
                &format!("{}_shin", name),
                Some(thigh),
                Vec3::new(0.0, -0.5, 0.0),
                0.2,
                Some(knee),
                Some(GroundSensorConfig::default()),
            ));
        }

        Self {
            segments,
            root_index: 0,
        }
    }

    /// Pelvis with two two-segment legs
    pub fn biped() -> Self {
        let hip = AngularLimits::from_degrees(-45.0, 45.0, 20.0, 10.0);
        let knee = AngularLimits::from_degrees(-70.0, 0.0, 0.0, 0.0);

        let mut segments = vec![segment(
            "pelvis",
            None,
            Vec3::ZERO,
            0.4,
            None,
            Some(torso_sensor()),
        )];

        for (name, x) in [("left", -0.3), ("right", 0.3)] {
            let thigh = segments.len();
            segments.push(segment(
                &format!("{}_thigh", name),
                Some(0),
                Vec3::new(x, -0.5, 0.0),
                0.2,
                Some(hip),
                None,
            ));
            segments.push(segment(
                &format!("{}_shin", name),
                Some(thigh),
                Vec3::new(0.0, -0.5, 0.0),
                0.15,
                Some(knee),
                Some(GroundSensorConfig::default()),
            ));
        }

        Self {
            segments,
            root_index: 0,
        }
    }

    /// Number of segments with a drivable joint
    pub fn joint_count(&self) -> usize {
        self.segments.iter().filter(|s| s.joint.is_some()).count()
    }

    /// Number of segments carrying a ground sensor
    pub fn sensor_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.ground_sensor.is_some())
            .count()
    }

    /// Validate layout (connectivity, ordering, radii)
    pub fn validate(&self) -> Result<(), BodyError> {
        if self.segments.is_empty() {
            return Err(BodyError::EmptyLayout);
        }

        if self.root_index >= self.segments.len() {
            return Err(BodyError::InvalidRoot {
                root: self.root_index,
                len: self.segments.len(),
            });
        }

        for (index, segment) in self.segments.iter().enumerate() {
            match segment.parent {
                Some(parent) if parent >= index => {
                    return Err(BodyError::InvalidParent {
                        segment: index,
                        parent,
                    });
                }
                None if index != self.root_index => {
                    return Err(BodyError::DetachedSegment(index));
                }
                _ => {}
            }

            if segment.radius <= 0.0 {
                return Err(BodyError::InvalidRadius {
                    segment: index,
                    radius: segment.radius,
                });
            }
        }

        Ok(())
    }

    /// Instantiate the layout in a kinematic world with its root at `position`
    pub fn spawn(
        &self,
        world: &mut KinematicWorld,
        tag: &str,
        position: Vec3,
        rotation: Quat,
    ) -> Result<SpawnedBody, BodyError> {
        self.validate()?;

        let mut ids: Vec<BodyId> = Vec::with_capacity(self.segments.len());
        for spec in &self.segments {
            let desc = match spec.parent {
                Some(parent) => BodyDesc::segment(ids[parent], tag, spec.local_position),
                None => BodyDesc::root(tag, position).with_rotation(rotation),
            }
            .with_radius(spec.radius)
            .with_mass(spec.mass);

            let desc = match spec.joint {
                Some(limits) => desc.with_joint(limits),
                None => desc,
            };
            ids.push(world.add_body(desc));
        }

        log::debug!(
            "Spawned body layout: {} segments, {} joints at ({:.1}, {:.1}, {:.1})",
            self.segments.len(),
            self.joint_count(),
            position.x,
            position.y,
            position.z
        );

        Ok(SpawnedBody {
            root: ids[self.root_index],
            segments: ids,
        })
    }
}
