//! Timed door opening
//!
//! The door slides from its closed position down by a fixed offset over a
//! fixed duration, then stays open. Driven by [`DoorAnimator::advance`]
//! once per tick.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoorState {
    /// Not moving; sits wherever it was stopped
    Idle,
    Opening { elapsed: f32 },
    /// Reached the end position
    Open,
}

#[derive(Debug, Clone)]
pub struct DoorAnimator {
    closed_position: Vec3,
    offset: Vec3,
    duration: f32,
    position: Vec3,
    state: DoorState,
}

impl DoorAnimator {
    /// `duration` must be positive; configs are validated before this is built
    pub fn new(closed_position: Vec3, offset: Vec3, duration: f32) -> Self {
        Self {
            closed_position,
            offset,
            duration,
            position: closed_position,
            state: DoorState::Idle,
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn closed_position(&self) -> Vec3 {
        self.closed_position
    }

    pub fn open_position(&self) -> Vec3 {
        self.closed_position + self.offset
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    /// Restart the opening from the closed position
    pub fn start(&mut self) {
        self.position = self.closed_position;
        self.state = DoorState::Opening { elapsed: 0.0 };
    }

    /// Stop moving where the door currently is
    pub fn stop(&mut self) {
        if let DoorState::Opening { .. } = self.state {
            self.state = DoorState::Idle;
        }
    }

    /// Stop and snap back to the closed position
    pub fn close(&mut self) {
        self.position = self.closed_position;
        self.state = DoorState::Idle;
    }

    /// Advance the animation by `dt` seconds and return the door position
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        if let DoorState::Opening { elapsed } = self.state {
            let elapsed = elapsed + dt;
            let t = (elapsed / self.duration).min(1.0);
            self.position = self.closed_position.lerp(self.open_position(), t);
            self.state = if t >= 1.0 {
                DoorState::Open
            } else {
                DoorState::Opening { elapsed }
            };
        }
        self.position
    }
}
