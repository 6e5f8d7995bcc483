//! Scene construction on the kinematic backend

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use strider_agents::escape_room::escaper::{BUTTON_TAG, GOAL_TAG};
use strider_agents::{
    Agent, ButtonEscaperAgent, EscapeRoom, EscapeRoomBodies, WalkerAgent,
};
use strider_body::{BodyDesc, KinematicConfig, KinematicWorld};

use crate::config::RolloutConfig;

const AGENT_TAG: &str = "agent";

fn new_world(config: &RolloutConfig) -> KinematicWorld {
    KinematicWorld::new(KinematicConfig {
        ground_half_extents: config.simulation.ground_half_extents,
        ..Default::default()
    })
}

/// Walker body at the origin and its target ahead on +Z
pub fn build_walker(config: &RolloutConfig) -> Result<(KinematicWorld, WalkerAgent)> {
    let mut world = new_world(config);
    let scene = &config.walker_scene;
    let layout = scene.layout.layout();

    let body = layout
        .spawn(
            &mut world,
            AGENT_TAG,
            Vec3::new(0.0, scene.spawn_height, 0.0),
            Quat::IDENTITY,
        )
        .context("Failed to spawn walker body")?;
    let target = world.add_body(
        BodyDesc::root("target", Vec3::new(0.0, scene.target_height, 10.0))
            .as_static()
            .as_trigger(scene.target_radius),
    );

    let mut agent = WalkerAgent::new(config.walker.clone(), &layout, &body, target)
        .context("Failed to create walker agent")?;
    agent
        .initialize(&mut world)
        .context("Failed to initialize walker agent")?;

    log::debug!(
        "Walker scene: {:?} layout, {} bodies, {} observations, {} actions",
        scene.layout,
        world.body_count(),
        agent.observation_size(),
        agent.action_size()
    );
    Ok((world, agent))
}

/// Room with the agent and button stand in front of a door, goal behind it
///
/// `KinematicWorld` only collides bodies with the ground, so the closed door
/// is scenery here: it sinks when the button is pressed, but it does not stop
/// the agent from reaching the goal without pressing the button. Use a
/// backend with body-body collision for the full task.
pub fn build_escape_room(config: &RolloutConfig) -> Result<(KinematicWorld, ButtonEscaperAgent)> {
    let mut world = new_world(config);

    let agent = world.add_body(BodyDesc::root(AGENT_TAG, Vec3::new(0.0, 0.5, -4.0)).with_radius(0.5));
    let door = world.add_body(
        BodyDesc::root("door", Vec3::new(0.0, 2.5, 2.0))
            .with_radius(2.5)
            .as_static(),
    );
    let button_stand = world.add_body(
        BodyDesc::root("button_stand", Vec3::new(3.0, 0.5, -3.0))
            .with_radius(0.5)
            .as_static(),
    );
    let button = world.add_body(
        BodyDesc::segment(button_stand, BUTTON_TAG, Vec3::new(0.0, 0.5, 0.0)).as_trigger(0.5),
    );
    let goal = world.add_body(
        BodyDesc::root(GOAL_TAG, Vec3::new(0.0, 1.0, 8.0))
            .as_static()
            .as_trigger(1.0),
    );

    let room = EscapeRoom::new(
        config.escape_room.clone(),
        EscapeRoomBodies {
            agent,
            door,
            button_stand,
            button,
            goal,
        },
    )
    .context("Failed to create escape room")?;

    let mut escaper = ButtonEscaperAgent::new(config.escaper.clone(), room);
    escaper
        .initialize(&mut world)
        .context("Failed to initialize escape room agent")?;

    log::debug!("Escape room scene: {} bodies", world.body_count());
    Ok((world, escaper))
}
