//! Episode arena: random agent and target placement
//!
//! Positions are drawn uniformly from an axis-aligned rectangle on the X/Z
//! plane. The target is re-drawn until it is far enough from the agent, up
//! to [`RESPAWN_TRIES`] times; after that the last draw is kept.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const RESPAWN_TRIES: usize = 500;

/// Spawn rectangle normalized from two opposite corners (X/Z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnRect {
    /// Corner order does not matter
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Uniform point inside the rectangle at height `y`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, y: f32) -> Vec3 {
        Vec3::new(
            rng.gen_range(self.min.x..=self.max.x),
            y,
            rng.gen_range(self.min.y..=self.max.y),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// One corner of the spawn rectangle (X/Z)
    pub corner_a: Vec2,
    /// The opposite corner (X/Z)
    pub corner_b: Vec2,
    pub min_separation: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            corner_a: Vec2::new(-20.0, 20.0),
            corner_b: Vec2::new(20.0, -20.0),
            min_separation: 10.0,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_separation < 0.0 {
            return Err(ConfigError::NegativeSeparation(self.min_separation));
        }
        Ok(())
    }

    pub fn rect(&self) -> SpawnRect {
        SpawnRect::from_corners(self.corner_a, self.corner_b)
    }
}

/// Agent and target positions for one episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnLayout {
    pub agent: Vec3,
    pub target: Vec3,
}

#[derive(Debug, Clone)]
pub struct EpisodeArena {
    rect: SpawnRect,
    min_separation: f32,
    agent_height: f32,
    target_height: f32,
    layout: SpawnLayout,
}

impl EpisodeArena {
    /// Heights are the scene's initial agent and target heights; they are
    /// kept for every respawn
    pub fn new(config: &ArenaConfig, agent_height: f32, target_height: f32) -> Self {
        Self {
            rect: config.rect(),
            min_separation: config.min_separation,
            agent_height,
            target_height,
            layout: SpawnLayout {
                agent: Vec3::new(0.0, agent_height, 0.0),
                target: Vec3::new(0.0, target_height, 0.0),
            },
        }
    }

    pub fn rect(&self) -> SpawnRect {
        self.rect
    }

    pub fn layout(&self) -> SpawnLayout {
        self.layout
    }

    pub fn target_position(&self) -> Vec3 {
        self.layout.target
    }

    pub fn random_spawn_position<R: Rng + ?Sized>(&self, rng: &mut R, y: f32) -> Vec3 {
        self.rect.sample(rng, y)
    }

    /// Draw a new layout for the next episode
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpawnLayout {
        let agent = self.random_spawn_position(rng, self.agent_height);

        let mut target = agent;
        let mut separated = false;
        for _ in 0..RESPAWN_TRIES {
            target = self.random_spawn_position(rng, self.target_height);
            if target.distance(agent) >= self.min_separation {
                separated = true;
                break;
            }
        }

        if !separated {
            log::warn!(
                "No target position at least {:.1} from the agent after {} tries, keeping ({:.1}, {:.1}, {:.1})",
                self.min_separation,
                RESPAWN_TRIES,
                target.x,
                target.y,
                target.z
            );
        }

        self.layout = SpawnLayout { agent, target };
        self.layout
    }
}
