use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use strider::rollout::{Rollout, RolloutReport};
use strider::scene::{build_escape_room, build_walker};
use strider::{RandomPolicy, RolloutConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Multi-joint walker chasing a target
    Walker,
    /// Press the button, pass the door, reach the goal
    EscapeRoom,
}

impl Scenario {
    fn name(self) -> &'static str {
        match self {
            Scenario::Walker => "walker",
            Scenario::EscapeRoom => "escape-room",
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario to roll out
    #[arg(long, value_enum, default_value = "walker")]
    scenario: Scenario,

    /// Number of episodes to run
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Seed for scene randomization and the random policy
    #[arg(long, default_value = "0")]
    seed: u64,

    /// RON config file (default: ./strider.ron if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a RON report of all episodes to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = RolloutConfig::load(args.config.as_deref())?;

    log::info!("Starting {} rollout", args.scenario.name());
    log::info!("  Episodes: {}", args.episodes);
    log::info!("  Seed: {}", args.seed);
    log::info!(
        "  Tick: {:.3}s, decision every {} ticks",
        config.simulation.fixed_delta_time,
        config.simulation.decision_period
    );

    let mut rng = Xoshiro256StarStar::seed_from_u64(args.seed);
    let mut policy = RandomPolicy::new(args.seed.wrapping_add(1));

    let episodes = match args.scenario {
        Scenario::Walker => {
            let (mut world, mut agent) = build_walker(&config)?;
            Rollout::new(&mut world, &mut agent, &mut policy, config.simulation.clone())
                .run(args.episodes, &mut rng, args.quiet)
        }
        Scenario::EscapeRoom => {
            let (mut world, mut agent) = build_escape_room(&config)?;
            Rollout::new(&mut world, &mut agent, &mut policy, config.simulation.clone())
                .run(args.episodes, &mut rng, args.quiet)
        }
    };

    let report = RolloutReport::new(args.scenario.name(), args.seed, episodes);
    log::info!(
        "Done: mean reward {:.3}, best {:.3}, {}/{} episodes terminated by the agent",
        report.mean_reward,
        report.best_reward,
        report.terminated_episodes,
        report.episodes.len()
    );

    if let Some(path) = &args.report {
        let text = ron::ser::to_string_pretty(&report, ron::ser::PrettyConfig::default())
            .context("Failed to serialize rollout report")?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}
