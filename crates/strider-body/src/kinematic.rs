//! Simple body physics - no external physics engine
//!
//! Bodies form parent/child hierarchies. Only roots integrate velocity and
//! gravity; child segments are posed by their joints, which slew toward
//! their drive targets at a rate set by the drive's maximum force. Grounded
//! segments whose joints sweep backwards push their root forward. This is
//! enough to exercise actuation, sensing and reward code in tests and
//! headless rollouts; it is not a physics solver.

use ahash::AHashSet;
use glam::{Quat, Vec2, Vec3};

use crate::physics::{
    AngularLimits, BodyId, BodyState, ContactEvent, ContactPhase, ForceMode, JointDrive,
    PhysicsAccess, PhysicsMutAccess, StepEvents, TriggerEvent, GROUND_TAG,
};

/// Distance below which a body counts as touching the ground
const CONTACT_SLOP: f32 = 0.01;

/// Description of a body to insert with [`KinematicWorld::add_body`]
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub tag: String,
    pub parent: Option<BodyId>,
    /// Relative to the parent (world space for roots)
    pub position: Vec3,
    pub rotation: Quat,
    /// Collision sphere radius
    pub radius: f32,
    pub mass: f32,
    /// Static bodies never move on their own
    pub is_static: bool,
    pub joint: Option<AngularLimits>,
    /// Makes the body a trigger volume of this radius
    pub trigger_radius: Option<f32>,
}

impl BodyDesc {
    /// A free-standing body
    pub fn root(tag: &str, position: Vec3) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            position,
            rotation: Quat::IDENTITY,
            radius: 0.5,
            mass: 1.0,
            is_static: false,
            joint: None,
            trigger_radius: None,
        }
    }

    /// A body attached to `parent` at `local_position`
    pub fn segment(parent: BodyId, tag: &str, local_position: Vec3) -> Self {
        Self {
            parent: Some(parent),
            ..Self::root(tag, local_position)
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_joint(mut self, limits: AngularLimits) -> Self {
        self.joint = Some(limits);
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn as_trigger(mut self, radius: f32) -> Self {
        self.trigger_radius = Some(radius);
        self
    }
}

#[derive(Debug, Clone)]
struct JointState {
    limits: AngularLimits,
    rest_rotation: Quat,
    target: Quat,
    drive: JointDrive,
}

#[derive(Debug, Clone)]
struct KinematicBody {
    tag: String,
    parent: Option<BodyId>,
    local_position: Vec3,
    local_rotation: Quat,
    linear_velocity: Vec3,
    angular_velocity: Vec3,
    max_linear_velocity: f32,
    max_angular_velocity: f32,
    radius: f32,
    mass: f32,
    is_static: bool,
    trigger_radius: Option<f32>,
    joint: Option<JointState>,
    pending_force: Vec3,
    grounded: bool,
}

/// Tunables of the kinematic model
#[derive(Debug, Clone)]
pub struct KinematicConfig {
    pub gravity: Vec3,
    pub ground_height: f32,
    /// Half size of the ground platform on X/Z (`None` = infinite plane)
    pub ground_half_extents: Option<Vec2>,
    /// Horizontal velocity lost per second while grounded (fraction)
    pub ground_friction: f32,
    /// How strongly grounded segments push their root
    pub traction: f32,
    /// Default speed caps for new bodies
    pub max_linear_velocity: f32,
    pub max_angular_velocity: f32,
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            ground_height: 0.0,
            ground_half_extents: None,
            ground_friction: 4.0,
            traction: 0.5,
            max_linear_velocity: 100.0,
            max_angular_velocity: 50.0,
        }
    }
}

/// Reference implementation of the physics traits
pub struct KinematicWorld {
    config: KinematicConfig,
    bodies: Vec<KinematicBody>,
    overlaps: AHashSet<(BodyId, BodyId)>,
}

impl KinematicWorld {
    pub fn new(config: KinematicConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            overlaps: AHashSet::new(),
        }
    }

    pub fn config(&self) -> &KinematicConfig {
        &self.config
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Insert a body; parents must be inserted before their children
    ///
    /// # Panics
    /// If the parent handle is unknown.
    pub fn add_body(&mut self, desc: BodyDesc) -> BodyId {
        if let Some(parent) = desc.parent {
            assert!(
                parent.index() < self.bodies.len(),
                "parent {} must be added before its children",
                parent
            );
        }

        let id = BodyId::from_raw(self.bodies.len() as u32);
        self.bodies.push(KinematicBody {
            tag: desc.tag,
            parent: desc.parent,
            local_position: desc.position,
            local_rotation: desc.rotation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            max_linear_velocity: self.config.max_linear_velocity,
            max_angular_velocity: self.config.max_angular_velocity,
            radius: desc.radius,
            mass: desc.mass.max(f32::EPSILON),
            is_static: desc.is_static,
            trigger_radius: desc.trigger_radius,
            joint: desc.joint.map(|limits| JointState {
                limits,
                rest_rotation: desc.rotation,
                target: Quat::IDENTITY,
                drive: JointDrive::default(),
            }),
            pending_force: Vec3::ZERO,
            grounded: false,
        });
        id
    }

    pub fn tag(&self, body: BodyId) -> Option<&str> {
        self.bodies.get(body.index()).map(|b| b.tag.as_str())
    }

    /// Current joint drive of a body, if it has a joint
    pub fn joint_drive(&self, body: BodyId) -> Option<JointDrive> {
        self.bodies
            .get(body.index())
            .and_then(|b| b.joint.as_ref())
            .map(|joint| joint.drive)
    }

    /// Current joint target (relative to the rest pose), if it has a joint
    pub fn joint_target(&self, body: BodyId) -> Option<Quat> {
        self.bodies
            .get(body.index())
            .and_then(|b| b.joint.as_ref())
            .map(|joint| joint.target)
    }

    /// Speed caps currently applied to a body
    pub fn velocity_caps(&self, body: BodyId) -> Option<(f32, f32)> {
        self.bodies
            .get(body.index())
            .map(|b| (b.max_linear_velocity, b.max_angular_velocity))
    }

    /// World poses of every body, parents resolved before children
    fn world_poses(&self) -> Vec<(Vec3, Quat)> {
        let mut poses: Vec<(Vec3, Quat)> = Vec::with_capacity(self.bodies.len());
        for body in &self.bodies {
            let pose = match body.parent {
                Some(parent) => {
                    let (parent_position, parent_rotation) = poses[parent.index()];
                    (
                        parent_position + parent_rotation * body.local_position,
                        (parent_rotation * body.local_rotation).normalize(),
                    )
                }
                None => (body.local_position, body.local_rotation),
            };
            poses.push(pose);
        }
        poses
    }

    fn world_pose(&self, index: usize) -> (Vec3, Quat) {
        let body = &self.bodies[index];
        match body.parent {
            Some(parent) => {
                let (parent_position, parent_rotation) = self.world_pose(parent.index());
                (
                    parent_position + parent_rotation * body.local_position,
                    (parent_rotation * body.local_rotation).normalize(),
                )
            }
            None => (body.local_position, body.local_rotation),
        }
    }

    fn root_of(&self, index: usize) -> usize {
        let mut current = index;
        while let Some(parent) = self.bodies[current].parent {
            current = parent.index();
        }
        current
    }

    fn over_ground(&self, position: Vec3) -> bool {
        match self.config.ground_half_extents {
            Some(half) => position.x.abs() <= half.x && position.z.abs() <= half.y,
            None => true,
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) -> StepEvents {
        let before = self.world_poses();
        let roots: Vec<usize> = (0..self.bodies.len()).map(|i| self.root_of(i)).collect();

        self.slew_joints(dt);
        let after_joints = self.world_poses();

        self.apply_traction(dt, &roots, &before, &after_joints);
        self.integrate_roots(dt);
        self.resolve_ground(dt, &roots);

        let after = self.world_poses();
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if body.parent.is_some() && dt > 0.0 {
                let velocity = (after[index].0 - before[index].0) / dt;
                body.linear_velocity = velocity.clamp_length_max(body.max_linear_velocity);
            }
        }

        StepEvents {
            contacts: self.detect_contacts(&roots, &after),
            triggers: self.detect_triggers(&roots, &after),
        }
    }

    fn slew_joints(&mut self, dt: f32) {
        for body in &mut self.bodies {
            let Some(joint) = &body.joint else {
                continue;
            };

            let stiffness = if joint.drive.spring > 0.0 {
                (joint.drive.max_force / joint.drive.spring).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let max_step = stiffness * body.max_angular_velocity * dt;
            let goal = (joint.rest_rotation * joint.target).normalize();
            let angle = body.local_rotation.angle_between(goal);

            if angle > 1e-6 && max_step > 0.0 {
                let t = (max_step / angle).min(1.0);
                body.local_rotation = body.local_rotation.slerp(goal, t).normalize();
            }
        }
    }

    fn apply_traction(
        &mut self,
        dt: f32,
        roots: &[usize],
        before: &[(Vec3, Quat)],
        after: &[(Vec3, Quat)],
    ) {
        if dt <= 0.0 || self.config.traction <= 0.0 {
            return;
        }

        let mut push = vec![Vec3::ZERO; self.bodies.len()];
        for (index, body) in self.bodies.iter().enumerate() {
            if body.parent.is_none() || !body.grounded {
                continue;
            }
            let root = roots[index];
            let sweep = (after[index].0 - after[root].0) - (before[index].0 - before[root].0);
            push[root] -= Vec3::new(sweep.x, 0.0, sweep.z) / dt;
        }

        let traction = self.config.traction;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if body.parent.is_none() && !body.is_static {
                body.linear_velocity += push[index] * traction;
            }
        }
    }

    fn integrate_roots(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            if body.parent.is_some() || body.is_static {
                body.pending_force = Vec3::ZERO;
                continue;
            }

            body.linear_velocity += (gravity + body.pending_force / body.mass) * dt;
            body.pending_force = Vec3::ZERO;
            body.linear_velocity = body.linear_velocity.clamp_length_max(body.max_linear_velocity);
            body.angular_velocity = body
                .angular_velocity
                .clamp_length_max(body.max_angular_velocity);

            body.local_position += body.linear_velocity * dt;
            let spin = Quat::from_scaled_axis(body.angular_velocity * dt);
            body.local_rotation = (spin * body.local_rotation).normalize();
        }
    }

    /// Push dynamic trees out of the ground and apply friction
    fn resolve_ground(&mut self, dt: f32, roots: &[usize]) {
        let poses = self.world_poses();
        let ground = self.config.ground_height;

        let mut penetration = vec![0.0_f32; self.bodies.len()];
        for (index, body) in self.bodies.iter().enumerate() {
            if body.trigger_radius.is_some() || !self.over_ground(poses[index].0) {
                continue;
            }
            let depth = ground - (poses[index].0.y - body.radius);
            let root = roots[index];
            penetration[root] = penetration[root].max(depth);
        }

        let friction = self.config.ground_friction;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if body.parent.is_some() || body.is_static || penetration[index] <= 0.0 {
                continue;
            }
            body.local_position.y += penetration[index];
            if body.linear_velocity.y < 0.0 {
                body.linear_velocity.y = 0.0;
            }
            let keep = (1.0 - friction * dt).clamp(0.0, 1.0);
            body.linear_velocity.x *= keep;
            body.linear_velocity.z *= keep;
        }
    }

    fn detect_contacts(&mut self, roots: &[usize], poses: &[(Vec3, Quat)]) -> Vec<ContactEvent> {
        let ground = self.config.ground_height;
        let mut events = Vec::new();

        for index in 0..self.bodies.len() {
            let root_static = self.bodies[roots[index]].is_static;
            let body = &self.bodies[index];
            if root_static || body.trigger_radius.is_some() {
                continue;
            }

            let position = poses[index].0;
            let touching =
                self.over_ground(position) && position.y - body.radius <= ground + CONTACT_SLOP;
            if touching == body.grounded {
                continue;
            }

            self.bodies[index].grounded = touching;
            events.push(ContactEvent {
                body: BodyId::from_raw(index as u32),
                tag: GROUND_TAG.to_string(),
                phase: if touching {
                    ContactPhase::Began
                } else {
                    ContactPhase::Ended
                },
            });
        }

        events
    }

    fn detect_triggers(&mut self, roots: &[usize], poses: &[(Vec3, Quat)]) -> Vec<TriggerEvent> {
        let mut events = Vec::new();

        for (trigger_index, trigger) in self.bodies.iter().enumerate() {
            let Some(trigger_radius) = trigger.trigger_radius else {
                continue;
            };

            for (other_index, other) in self.bodies.iter().enumerate() {
                if roots[other_index] == roots[trigger_index]
                    || other.trigger_radius.is_some()
                    || self.bodies[roots[other_index]].is_static
                {
                    continue;
                }

                let key = (
                    BodyId::from_raw(trigger_index as u32),
                    BodyId::from_raw(other_index as u32),
                );
                let distance = poses[trigger_index].0.distance(poses[other_index].0);
                if distance <= trigger_radius + other.radius {
                    if self.overlaps.insert(key) {
                        events.push(TriggerEvent {
                            trigger_body: key.0,
                            trigger_tag: trigger.tag.clone(),
                            other_body: key.1,
                            other_tag: other.tag.clone(),
                        });
                    }
                } else {
                    self.overlaps.remove(&key);
                }
            }
        }

        events
    }
}

impl Default for KinematicWorld {
    fn default() -> Self {
        Self::new(KinematicConfig::default())
    }
}

impl PhysicsAccess for KinematicWorld {
    fn body_state(&self, body: BodyId) -> Option<BodyState> {
        let record = self.bodies.get(body.index())?;
        let (position, rotation) = self.world_pose(body.index());
        Some(BodyState {
            position,
            rotation,
            local_position: record.local_position,
            local_rotation: record.local_rotation,
            linear_velocity: record.linear_velocity,
            angular_velocity: record.angular_velocity,
        })
    }

    fn angular_limits(&self, body: BodyId) -> Option<AngularLimits> {
        self.bodies
            .get(body.index())
            .and_then(|b| b.joint.as_ref())
            .map(|joint| joint.limits)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let direction = direction.normalize_or_zero();
        if direction.y.abs() < f32::EPSILON {
            return None;
        }

        let distance = (self.config.ground_height - origin.y) / direction.y;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }

        let hit = origin + direction * distance;
        self.over_ground(hit).then_some(distance)
    }
}

impl PhysicsMutAccess for KinematicWorld {
    fn set_local_pose(&mut self, body: BodyId, position: Vec3, rotation: Quat) {
        if let Some(record) = self.bodies.get_mut(body.index()) {
            record.local_position = position;
            record.local_rotation = rotation;
        }
    }

    fn set_world_pose(&mut self, body: BodyId, position: Vec3, rotation: Quat) {
        let Some(parent) = self.bodies.get(body.index()).map(|b| b.parent) else {
            return;
        };

        let (local_position, local_rotation) = match parent {
            Some(parent) => {
                let (parent_position, parent_rotation) = self.world_pose(parent.index());
                let inverse = parent_rotation.inverse();
                (inverse * (position - parent_position), inverse * rotation)
            }
            None => (position, rotation),
        };
        self.set_local_pose(body, local_position, local_rotation);
    }

    fn set_velocities(&mut self, body: BodyId, linear: Vec3, angular: Vec3) {
        if let Some(record) = self.bodies.get_mut(body.index()) {
            record.linear_velocity = linear;
            record.angular_velocity = angular;
        }
    }

    fn set_velocity_caps(&mut self, body: BodyId, max_linear: f32, max_angular: f32) {
        if let Some(record) = self.bodies.get_mut(body.index()) {
            record.max_linear_velocity = max_linear;
            record.max_angular_velocity = max_angular;
        }
    }

    fn set_joint_target_rotation(&mut self, body: BodyId, rotation: Quat) {
        match self.bodies.get_mut(body.index()).and_then(|b| b.joint.as_mut()) {
            Some(joint) => joint.target = rotation,
            None => log::warn!("Ignoring joint target for {} (no joint)", body),
        }
    }

    fn set_joint_drive(&mut self, body: BodyId, drive: JointDrive) {
        match self.bodies.get_mut(body.index()).and_then(|b| b.joint.as_mut()) {
            Some(joint) => joint.drive = drive,
            None => log::warn!("Ignoring joint drive for {} (no joint)", body),
        }
    }

    /// Forces on child segments are applied to their root
    fn add_force(&mut self, body: BodyId, force: Vec3, mode: ForceMode) {
        if body.index() >= self.bodies.len() {
            return;
        }
        let root_index = self.root_of(body.index());
        let root = &mut self.bodies[root_index];
        if root.is_static {
            return;
        }

        match mode {
            ForceMode::Force => root.pending_force += force,
            ForceMode::Impulse => root.linear_velocity += force / root.mass,
            ForceMode::VelocityChange => root.linear_velocity += force,
        }
    }

    fn rotate(&mut self, body: BodyId, axis: Vec3, degrees: f32) {
        let Some(state) = self.body_state(body) else {
            return;
        };
        let Some(axis) = axis.try_normalize() else {
            return;
        };

        let rotation = (Quat::from_axis_angle(axis, degrees.to_radians()) * state.rotation).normalize();
        self.set_world_pose(body, state.position, rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> AngularLimits {
        AngularLimits::from_degrees(-45.0, 45.0, 30.0, 0.0)
    }

    #[test]
    fn test_child_follows_parent() {
        let mut world = KinematicWorld::default();
        let root = world.add_body(BodyDesc::root("agent", Vec3::new(0.0, 2.0, 0.0)));
        let leg = world.add_body(BodyDesc::segment(root, "agent", Vec3::new(1.0, 0.0, 0.0)));

        world.set_world_pose(root, Vec3::new(5.0, 2.0, 0.0), Quat::IDENTITY);
        let state = world.body_state(leg).unwrap();
        assert!(state.position.abs_diff_eq(Vec3::new(6.0, 2.0, 0.0), 1e-5));
        assert!(state.local_position.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_set_world_pose_on_child_updates_local_pose() {
        let mut world = KinematicWorld::default();
        let root = world.add_body(BodyDesc::root("agent", Vec3::new(1.0, 1.0, 1.0)));
        let leg = world.add_body(BodyDesc::segment(root, "agent", Vec3::ZERO));

        world.set_world_pose(leg, Vec3::new(1.0, 0.0, 1.0), Quat::IDENTITY);
        let state = world.body_state(leg).unwrap();
        assert!(state.local_position.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-5));
    }

    #[test]
    fn test_falling_body_lands_and_reports_contact() {
        let mut world = KinematicWorld::default();
        let ball = world.add_body(BodyDesc::root("agent", Vec3::new(0.0, 1.0, 0.0)).with_radius(0.5));

        let mut began = false;
        for _ in 0..240 {
            let events = world.step(1.0 / 60.0);
            began |= events
                .contacts
                .iter()
                .any(|e| e.body == ball && e.phase == ContactPhase::Began && e.tag == GROUND_TAG);
        }

        assert!(began, "ball should touch the ground");
        let state = world.body_state(ball).unwrap();
        assert!((state.position.y - 0.5).abs() < 0.05, "rests on ground, y={}", state.position.y);
    }

    #[test]
    fn test_joint_without_strength_does_not_move() {
        let mut world = KinematicWorld::default();
        let root = world.add_body(BodyDesc::root("agent", Vec3::new(0.0, 5.0, 0.0)).as_static());
        let leg = world.add_body(BodyDesc::segment(root, "agent", Vec3::X).with_joint(limits()));

        world.set_joint_target_rotation(leg, Quat::from_rotation_y(0.5));
        world.step(1.0 / 60.0);
        let state = world.body_state(leg).unwrap();
        assert!(state.local_rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_joint_slews_toward_target_when_driven() {
        let mut world = KinematicWorld::default();
        let root = world.add_body(BodyDesc::root("agent", Vec3::new(0.0, 5.0, 0.0)).as_static());
        let leg = world.add_body(BodyDesc::segment(root, "agent", Vec3::X).with_joint(limits()));

        let target = Quat::from_rotation_y(0.5);
        world.set_joint_target_rotation(leg, target);
        world.set_joint_drive(
            leg,
            JointDrive {
                spring: 100.0,
                damper: 10.0,
                max_force: 100.0,
            },
        );
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }

        let state = world.body_state(leg).unwrap();
        assert!(state.local_rotation.angle_between(target) < 1e-2);
    }

    #[test]
    fn test_raycast_hits_ground_plane() {
        let world = KinematicWorld::default();
        let hit = world.raycast(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 10.0);
        assert!((hit.unwrap() - 3.0).abs() < 1e-5);

        assert!(world.raycast(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 2.0).is_none());
        assert!(world.raycast(Vec3::new(0.0, 3.0, 0.0), Vec3::Y, 10.0).is_none());
    }

    #[test]
    fn test_raycast_misses_outside_platform() {
        let world = KinematicWorld::new(KinematicConfig {
            ground_half_extents: Some(Vec2::new(5.0, 5.0)),
            ..Default::default()
        });
        assert!(world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 20.0).is_some());
        assert!(world.raycast(Vec3::new(8.0, 1.0, 0.0), Vec3::NEG_Y, 20.0).is_none());
    }

    #[test]
    fn test_trigger_reports_enter_once() {
        let mut world = KinematicWorld::new(KinematicConfig {
            gravity: Vec3::ZERO,
            ..Default::default()
        });
        let zone = world.add_body(
            BodyDesc::root("goal", Vec3::new(0.0, 1.0, 0.0))
                .as_static()
                .as_trigger(1.0),
        );
        let agent = world.add_body(BodyDesc::root("agent", Vec3::new(0.0, 1.0, 0.5)));

        let first = world.step(1.0 / 60.0);
        assert_eq!(first.triggers.len(), 1);
        assert_eq!(first.triggers[0].trigger_body, zone);
        assert_eq!(first.triggers[0].other_body, agent);
        assert_eq!(first.triggers[0].trigger_tag, "goal");

        let second = world.step(1.0 / 60.0);
        assert!(second.triggers.is_empty());
    }

    #[test]
    fn test_force_modes() {
        let mut world = KinematicWorld::new(KinematicConfig {
            gravity: Vec3::ZERO,
            ..Default::default()
        });
        let body = world.add_body(BodyDesc::root("agent", Vec3::new(0.0, 5.0, 0.0)).with_mass(2.0));

        world.add_force(body, Vec3::X, ForceMode::VelocityChange);
        assert!(world.linear_velocity(body).abs_diff_eq(Vec3::X, 1e-6));

        world.add_force(body, Vec3::new(2.0, 0.0, 0.0), ForceMode::Impulse);
        assert!(world.linear_velocity(body).abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_rotate_about_world_up() {
        let mut world = KinematicWorld::default();
        let body = world.add_body(BodyDesc::root("agent", Vec3::new(0.0, 5.0, 0.0)).as_static());

        world.rotate(body, Vec3::Y, 90.0);
        let forward = world.body_state(body).unwrap().forward();
        assert!(forward.abs_diff_eq(Vec3::X, 1e-5));
    }
}
