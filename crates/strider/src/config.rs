//! Rollout configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `strider.ron` file (if exists), or the file passed with `--config`
//! 3. Environment variables prefixed with `STRIDER_`
//!
//! Example environment variable: `STRIDER_WALKER__TARGET_SPEED=3.0`

use std::path::Path;

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use strider_agents::{EscapeRoomConfig, EscaperConfig, WalkerConfig};
use strider_body::BodyLayout;

/// Main rollout configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RolloutConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub walker: WalkerConfig,

    #[serde(default)]
    pub walker_scene: WalkerSceneConfig,

    #[serde(default)]
    pub escape_room: EscapeRoomConfig,

    #[serde(default)]
    pub escaper: EscaperConfig,
}

/// Fixed-step loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Physics tick in seconds
    pub fixed_delta_time: f32,
    /// Ticks between policy decisions; actions repeat in between
    pub decision_period: u32,
    /// Hard cap on ticks per episode, for agents without a step limit
    pub max_episode_ticks: u32,
    /// Half size of the ground platform (`None` = infinite plane)
    pub ground_half_extents: Option<Vec2>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_delta_time: 0.02,
            decision_period: 5,
            max_episode_ticks: 25_000,
            ground_half_extents: None,
        }
    }
}

/// Built-in walker bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Quadruped,
    Biped,
}

impl LayoutKind {
    pub fn layout(self) -> BodyLayout {
        match self {
            LayoutKind::Quadruped => BodyLayout::quadruped(),
            LayoutKind::Biped => BodyLayout::biped(),
        }
    }
}

/// Where the walker scene puts its bodies before the first reset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerSceneConfig {
    pub layout: LayoutKind,
    /// Root height; kept for every respawn
    pub spawn_height: f32,
    /// Target height; kept for every respawn
    pub target_height: f32,
    pub target_radius: f32,
}

impl Default for WalkerSceneConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::Quadruped,
            spawn_height: 1.0,
            target_height: 0.5,
            target_radius: 1.0,
        }
    }
}

impl RolloutConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path`, or `strider.ron` if present
    /// 3. Environment variables prefixed with `STRIDER_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path)
                .format(config::FileFormat::Ron)
                .required(true),
            None => File::with_name("strider")
                .format(config::FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("simulation.fixed_delta_time", 0.02)?
            .set_default("simulation.decision_period", 5_i64)?
            .set_default("simulation.max_episode_ticks", 25_000_i64)?
            .set_default("walker.target_speed", 2.0)?
            .set_default("walker.down_raycast_distance", 10.0)?
            .set_default("walker.max_step", 5000_i64)?
            .set_default("walker_scene.layout", "quadruped")?
            .set_default("escaper.walk_speed", 0.5)?
            .set_default("escaper.jump_power", 5.0)?
            .set_default("escaper.max_step", 5000_i64)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (STRIDER_WALKER__TARGET_SPEED, etc.)
            .add_source(Environment::with_prefix("STRIDER").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.simulation.fixed_delta_time > 0.0,
            "simulation.fixed_delta_time must be positive, got {}",
            self.simulation.fixed_delta_time
        );
        ensure!(
            self.simulation.decision_period > 0,
            "simulation.decision_period must be at least 1"
        );
        self.walker.validate().context("Invalid walker configuration")?;
        self.escape_room
            .validate()
            .context("Invalid escape room configuration")?;
        Ok(())
    }
}
