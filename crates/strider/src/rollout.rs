//! Fixed-step rollout loop
//!
//! Per tick: `fixed_update`, then (on decision ticks) observations and a
//! fresh policy decision, then the current actions are applied, the world
//! steps and its contact and trigger events are routed back to the agent.

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use serde::Serialize;
use strider_agents::{Agent, EpisodeEnd, VectorSensor};
use strider_body::KinematicWorld;

use crate::config::SimulationConfig;
use crate::policy::Policy;

/// Outcome of one episode
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    pub index: usize,
    /// Agent steps taken
    pub steps: u32,
    pub ticks: u32,
    pub cumulative_reward: f32,
    /// `true` if the agent ended the episode itself
    pub terminated: bool,
}

/// Summary of a whole rollout, written with `--report`
#[derive(Debug, Clone, Serialize)]
pub struct RolloutReport {
    pub scenario: String,
    pub seed: u64,
    pub episodes: Vec<EpisodeSummary>,
    pub mean_reward: f32,
    pub best_reward: f32,
    pub terminated_episodes: usize,
}

impl RolloutReport {
    pub fn new(scenario: &str, seed: u64, episodes: Vec<EpisodeSummary>) -> Self {
        let mean_reward = if episodes.is_empty() {
            0.0
        } else {
            episodes.iter().map(|e| e.cumulative_reward).sum::<f32>() / episodes.len() as f32
        };
        let best_reward = episodes
            .iter()
            .map(|e| e.cumulative_reward)
            .fold(f32::NEG_INFINITY, f32::max);
        let terminated_episodes = episodes.iter().filter(|e| e.terminated).count();

        Self {
            scenario: scenario.to_string(),
            seed,
            episodes,
            mean_reward,
            best_reward: if best_reward.is_finite() { best_reward } else { 0.0 },
            terminated_episodes,
        }
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} episodes ({eta}) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Drives one agent in one world for a number of episodes
pub struct Rollout<'a, A, P> {
    world: &'a mut KinematicWorld,
    agent: &'a mut A,
    policy: &'a mut P,
    simulation: SimulationConfig,
}

impl<'a, A: Agent, P: Policy> Rollout<'a, A, P> {
    pub fn new(
        world: &'a mut KinematicWorld,
        agent: &'a mut A,
        policy: &'a mut P,
        simulation: SimulationConfig,
    ) -> Self {
        Self {
            world,
            agent,
            policy,
            simulation,
        }
    }

    /// Run `episodes` episodes, showing progress unless `quiet`
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        episodes: usize,
        rng: &mut R,
        quiet: bool,
    ) -> Vec<EpisodeSummary> {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(episodes as u64)
        };
        pb.set_style(progress_style());

        let mut summaries = Vec::with_capacity(episodes);
        for index in 0..episodes {
            let summary = self.run_episode(index, rng);
            log::info!(
                "Episode {}: reward={:.3}, steps={}, {}",
                index + 1,
                summary.cumulative_reward,
                summary.steps,
                if summary.terminated {
                    "terminated"
                } else {
                    "interrupted"
                }
            );
            pb.set_message(format!("last reward {:.3}", summary.cumulative_reward));
            pb.inc(1);
            summaries.push(summary);
        }
        pb.finish_and_clear();

        summaries
    }

    pub fn run_episode<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> EpisodeSummary {
        let dt = self.simulation.fixed_delta_time;
        let decision_period = self.simulation.decision_period.max(1);
        let spec = self.agent.action_spec();
        let mut sensor = VectorSensor::with_capacity(self.agent.observation_size());

        self.agent.on_episode_begin(&mut *self.world, rng);
        let mut actions = self.policy.act(&[], &spec);
        let mut ticks = 0_u32;

        while !self.agent.episode().is_done() {
            self.agent.fixed_update(&mut *self.world, dt);

            if ticks % decision_period == 0 {
                sensor.clear();
                self.agent.collect_observations(&*self.world, &mut sensor);
                actions = self.policy.act(sensor.as_slice(), &spec);
            }
            self.agent.on_action_received(&mut *self.world, &actions);

            let events = self.world.step(dt);
            for contact in &events.contacts {
                self.agent.on_contact(contact);
            }
            for trigger in &events.triggers {
                self.agent.on_trigger_enter(&mut *self.world, trigger);
            }

            let episode = self.agent.episode_mut();
            episode.take_step_reward();
            episode.increment_step();

            ticks += 1;
            if ticks >= self.simulation.max_episode_ticks && !episode.is_done() {
                log::warn!(
                    "Episode {} hit the tick budget ({}), interrupting",
                    index + 1,
                    self.simulation.max_episode_ticks
                );
                episode.interrupt();
            }
        }

        let episode = self.agent.episode();
        EpisodeSummary {
            index,
            steps: episode.step_count(),
            ticks,
            cumulative_reward: episode.cumulative_reward(),
            terminated: episode.end_reason() == Some(EpisodeEnd::Terminated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RolloutConfig;
    use crate::policy::{IdlePolicy, RandomPolicy};
    use crate::scene::{build_escape_room, build_walker};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn short_config() -> RolloutConfig {
        let mut config = RolloutConfig::default();
        config.walker.max_step = 50;
        config.escaper.max_step = 50;
        config
    }

    #[test]
    fn test_walker_rollout_respects_step_limit() {
        let config = short_config();
        let (mut world, mut agent) = build_walker(&config).unwrap();
        let mut policy = RandomPolicy::new(1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);

        let summaries =
            Rollout::new(&mut world, &mut agent, &mut policy, config.simulation.clone())
                .run(3, &mut rng, true);

        assert_eq!(summaries.len(), 3);
        for summary in &summaries {
            assert!(summary.steps <= 50);
            assert!(summary.cumulative_reward.is_finite());
        }
    }

    #[test]
    fn test_idle_escaper_is_interrupted() {
        let config = short_config();
        let (mut world, mut agent) = build_escape_room(&config).unwrap();
        let mut policy = IdlePolicy;
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);

        let summaries =
            Rollout::new(&mut world, &mut agent, &mut policy, config.simulation.clone())
                .run(2, &mut rng, true);

        for summary in &summaries {
            assert_eq!(summary.steps, 50);
            assert!(!summary.terminated);
            // Only the button can pay out while standing still
            assert!(summary.cumulative_reward >= 0.0);
        }
    }

    #[test]
    fn test_tick_budget_interrupts_unlimited_episodes() {
        let mut config = RolloutConfig::default();
        config.escaper.max_step = 0;
        config.simulation.max_episode_ticks = 30;
        let (mut world, mut agent) = build_escape_room(&config).unwrap();
        let mut policy = IdlePolicy;
        let mut rng = Xoshiro256StarStar::seed_from_u64(8);

        let summary = Rollout::new(&mut world, &mut agent, &mut policy, config.simulation.clone())
            .run_episode(0, &mut rng);
        assert_eq!(summary.ticks, 30);
        assert!(!summary.terminated);
    }

    #[test]
    fn test_same_seed_same_rollout() {
        let config = short_config();
        let run = || {
            let (mut world, mut agent) = build_walker(&config).unwrap();
            let mut policy = RandomPolicy::new(21);
            let mut rng = Xoshiro256StarStar::seed_from_u64(21);
            Rollout::new(&mut world, &mut agent, &mut policy, config.simulation.clone())
                .run(2, &mut rng, true)
                .iter()
                .map(|s| s.cumulative_reward)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_report_aggregates() {
        let episodes = vec![
            EpisodeSummary {
                index: 0,
                steps: 10,
                ticks: 10,
                cumulative_reward: 1.0,
                terminated: true,
            },
            EpisodeSummary {
                index: 1,
                steps: 20,
                ticks: 20,
                cumulative_reward: -3.0,
                terminated: false,
            },
        ];
        let report = RolloutReport::new("walker", 7, episodes);
        assert_eq!(report.mean_reward, -1.0);
        assert_eq!(report.best_reward, 1.0);
        assert_eq!(report.terminated_episodes, 1);

        let empty = RolloutReport::new("walker", 7, Vec::new());
        assert_eq!(empty.mean_reward, 0.0);
        assert_eq!(empty.best_reward, 0.0);
    }
}
