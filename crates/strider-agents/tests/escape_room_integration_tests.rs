//! Integration tests for the button-and-door escape room

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use strider_agents::escape_room::escaper::{BUTTON_TAG, GOAL_TAG, OBSERVATION_SIZE};
use strider_agents::escape_room::{heuristic, DoorState, HeuristicKeys};
use strider_agents::{
    ActionBuffers, Agent, ButtonEscaperAgent, EscapeRoom, EscapeRoomBodies, EscapeRoomConfig,
    EscaperConfig, VectorSensor,
};
use strider_body::{BodyDesc, KinematicConfig, KinematicWorld, PhysicsAccess, PhysicsMutAccess};

const DT: f32 = 0.02;

struct Scene {
    world: KinematicWorld,
    agent: ButtonEscaperAgent,
    bodies: EscapeRoomBodies,
}

fn escape_scene(kinematic: KinematicConfig, config: EscaperConfig) -> Scene {
    let mut world = KinematicWorld::new(kinematic);

    let agent = world.add_body(BodyDesc::root("agent", Vec3::new(0.0, 0.5, -4.0)));
    let door = world.add_body(BodyDesc::root("door", Vec3::new(0.0, 2.5, 2.0)).as_static());
    let button_stand =
        world.add_body(BodyDesc::root("stand", Vec3::new(3.0, 0.5, -3.0)).as_static());
    let button = world.add_body(
        BodyDesc::segment(button_stand, BUTTON_TAG, Vec3::new(0.0, 0.5, 0.0)).as_trigger(0.5),
    );
    let goal = world.add_body(
        BodyDesc::root(GOAL_TAG, Vec3::new(0.0, 1.0, 8.0))
            .as_static()
            .as_trigger(1.0),
    );

    let bodies = EscapeRoomBodies {
        agent,
        door,
        button_stand,
        button,
        goal,
    };
    let room = EscapeRoom::new(
        EscapeRoomConfig {
            corner_a: Vec2::new(-6.0, -6.0),
            corner_b: Vec2::new(6.0, 0.0),
            ..Default::default()
        },
        bodies,
    )
    .unwrap();

    let mut agent = ButtonEscaperAgent::new(config, room);
    agent.initialize(&mut world).unwrap();

    Scene {
        world,
        agent,
        bodies,
    }
}

fn default_scene() -> Scene {
    escape_scene(KinematicConfig::default(), EscaperConfig::default())
}

fn idle() -> ActionBuffers {
    ActionBuffers::from_discrete(vec![0, 0, 0])
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_observation_and_action_layout() {
    let scene = default_scene();
    assert_eq!(scene.agent.observation_size(), OBSERVATION_SIZE);
    assert_eq!(scene.agent.action_spec().discrete_branches, vec![3, 3, 2]);
    assert_eq!(scene.agent.action_spec().continuous, 0);

    let mut sensor = VectorSensor::default();
    scene.agent.collect_observations(&scene.world, &mut sensor);
    let observations = sensor.as_slice();
    assert_eq!(observations.len(), 7);
    assert_eq!(observations[0], 0.0);

    let to_button = Vec3::new(observations[1], observations[2], observations[3]);
    let to_goal = Vec3::new(observations[4], observations[5], observations[6]);
    assert!((to_button.length() - 1.0).abs() < 1e-5);
    assert!(to_goal.abs_diff_eq(Vec3::new(0.0, 0.5, 12.0).normalize(), 1e-5));
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_places_agent_and_stand_in_rect() {
    let mut scene = default_scene();
    let mut rng = Xoshiro256StarStar::seed_from_u64(17);

    for _ in 0..20 {
        scene.agent.on_episode_begin(&mut scene.world, &mut rng);

        let agent = scene.world.body_state(scene.bodies.agent).unwrap().position;
        let stand = scene.world.body_state(scene.bodies.button_stand).unwrap().position;
        let button = scene.world.body_state(scene.bodies.button).unwrap().position;

        assert_eq!(agent.y, 0.5);
        assert_eq!(stand.y, 0.5);
        for p in [agent, stand] {
            assert!((-6.0..=6.0).contains(&p.x));
            assert!((-6.0..=0.0).contains(&p.z));
        }
        assert!(button.abs_diff_eq(stand + Vec3::new(0.0, 0.5, 0.0), 1e-5));
    }
}

#[test]
fn test_reset_closes_door_and_clears_press() {
    let mut scene = default_scene();
    let mut rng = Xoshiro256StarStar::seed_from_u64(2);

    scene.agent.on_tagged_trigger(BUTTON_TAG);
    for _ in 0..10 {
        scene.agent.fixed_update(&mut scene.world, DT);
    }
    assert!(scene.world.body_state(scene.bodies.door).unwrap().position.y < 2.5);

    scene.agent.on_episode_begin(&mut scene.world, &mut rng);
    assert!(!scene.agent.pressed_button());
    assert!(!scene.agent.room().button_lit());
    assert_eq!(scene.agent.room().door().state(), DoorState::Idle);
    assert_eq!(
        scene.world.body_state(scene.bodies.door).unwrap().position,
        Vec3::new(0.0, 2.5, 2.0)
    );
}

// ============================================================================
// Button, door and goal
// ============================================================================

#[test]
fn test_button_rewards_once_and_opens_door() {
    let mut scene = default_scene();

    scene.agent.on_tagged_trigger(BUTTON_TAG);
    assert!(scene.agent.pressed_button());
    assert!(scene.agent.room().button_lit());
    assert!((scene.agent.episode().step_reward() - 0.7).abs() < 1e-6);

    scene.agent.on_tagged_trigger(BUTTON_TAG);
    assert!((scene.agent.episode().step_reward() - 0.7).abs() < 1e-6);
    assert!(!scene.agent.episode().is_done());
}

#[test]
fn test_door_sinks_five_units_and_stays() {
    let mut scene = default_scene();
    scene.agent.on_tagged_trigger(BUTTON_TAG);

    for _ in 0..100 {
        scene.agent.fixed_update(&mut scene.world, DT);
    }
    let door = scene.world.body_state(scene.bodies.door).unwrap().position;
    assert!(door.abs_diff_eq(Vec3::new(0.0, -2.5, 2.0), 1e-5));
    assert_eq!(scene.agent.room().door().state(), DoorState::Open);
}

#[test]
fn test_goal_rewards_and_ends() {
    let mut scene = default_scene();
    scene.agent.on_tagged_trigger(GOAL_TAG);
    assert_eq!(scene.agent.episode().step_reward(), 1.0);
    assert!(scene.agent.episode().is_done());
}

#[test]
fn test_unknown_tag_is_ignored() {
    let mut scene = default_scene();
    scene.agent.on_tagged_trigger("wall");
    assert_eq!(scene.agent.episode().step_reward(), 0.0);
    assert!(!scene.agent.pressed_button());
}

#[test]
fn test_touching_button_through_physics() {
    let mut scene = default_scene();
    let button = scene.world.body_state(scene.bodies.button).unwrap().position;
    scene
        .world
        .set_world_pose(scene.bodies.agent, button, glam::Quat::IDENTITY);

    let events = scene.world.step(DT);
    assert!(!events.triggers.is_empty());
    for trigger in &events.triggers {
        scene.agent.on_trigger_enter(&mut scene.world, trigger);
    }
    assert!(scene.agent.pressed_button());
}

// ============================================================================
// Actions
// ============================================================================

#[test]
fn test_falling_off_the_platform_ends_with_penalty() {
    let kinematic = KinematicConfig {
        ground_half_extents: Some(Vec2::new(10.0, 10.0)),
        ..Default::default()
    };
    let mut scene = escape_scene(kinematic, EscaperConfig::default());
    scene.agent.episode_mut().add_reward(0.7);

    scene
        .world
        .set_world_pose(scene.bodies.agent, Vec3::new(30.0, 0.5, 0.0), glam::Quat::IDENTITY);
    scene.agent.on_action_received(&mut scene.world, &idle());

    assert_eq!(scene.agent.episode().step_reward(), -1.0);
    assert!(scene.agent.episode().is_done());
}

#[test]
fn test_standing_on_ground_is_not_a_fall() {
    let mut scene = default_scene();
    scene.agent.on_action_received(&mut scene.world, &idle());
    assert!(!scene.agent.episode().is_done());
    assert_eq!(scene.agent.episode().step_reward(), 0.0);
}

#[test]
fn test_step_penalty_scales_with_max_step() {
    let config = EscaperConfig {
        step_penalty: true,
        max_step: 100,
        ..Default::default()
    };
    let mut scene = escape_scene(KinematicConfig::default(), config);
    scene.agent.on_action_received(&mut scene.world, &idle());
    assert!((scene.agent.episode().step_reward() + 0.01).abs() < 1e-6);
}

#[test]
fn test_walking_changes_velocity_along_forward() {
    let mut scene = default_scene();
    let keys = HeuristicKeys {
        w: true,
        ..Default::default()
    };
    scene.agent.on_action_received(&mut scene.world, &heuristic(keys));

    let velocity = scene.world.linear_velocity(scene.bodies.agent);
    assert!(velocity.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-5));
}

#[test]
fn test_rotation_turns_about_up_axis() {
    let mut scene = default_scene();
    let keys = HeuristicKeys {
        d: true,
        ..Default::default()
    };
    scene.agent.on_action_received(&mut scene.world, &heuristic(keys));

    let state = scene.world.body_state(scene.bodies.agent).unwrap();
    // 300 deg/s for one 0.02 s tick
    let turned = state.forward().angle_between(Vec3::Z).to_degrees();
    assert!((turned - 6.0).abs() < 1e-2);
    assert!(state.up().abs_diff_eq(Vec3::Y, 1e-5));
}

#[test]
fn test_jump_respects_cooldown() {
    let mut scene = default_scene();
    let jump = ActionBuffers::from_discrete(vec![0, 0, 1]);

    scene.agent.on_action_received(&mut scene.world, &jump);
    let first = scene.world.linear_velocity(scene.bodies.agent).y;
    assert!(first > 0.0);
    assert!((scene.agent.jump_cooldown() - (2.0 - DT)).abs() < 1e-5);

    scene.agent.on_action_received(&mut scene.world, &jump);
    assert_eq!(scene.world.linear_velocity(scene.bodies.agent).y, first);
}

#[test]
fn test_jump_shaping_rewards_facing_the_button() {
    let config = EscaperConfig {
        button_direction_reward: true,
        ..Default::default()
    };
    let mut scene = escape_scene(KinematicConfig::default(), config);

    // Put the button straight ahead of the agent
    let agent = scene.world.body_state(scene.bodies.agent).unwrap().position;
    scene.world.set_world_pose(
        scene.bodies.button_stand,
        agent + Vec3::new(0.0, 0.0, 3.0),
        glam::Quat::IDENTITY,
    );

    scene
        .agent
        .on_action_received(&mut scene.world, &ActionBuffers::from_discrete(vec![0, 0, 1]));
    let reward = scene.agent.episode().step_reward();
    assert!(reward > 0.09 && reward <= 0.1);
}
