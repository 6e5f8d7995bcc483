//! Episode bookkeeping: rewards, step counting and termination

/// Why the last episode stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// The agent ended it (goal reached, fell over, ...)
    Terminated,
    /// The step limit was reached
    Interrupted,
}

/// Reward and lifetime state of the current episode
#[derive(Debug, Clone, Default)]
pub struct Episode {
    max_step: u32,
    step_count: u32,
    step_reward: f32,
    cumulative_reward: f32,
    end: Option<EpisodeEnd>,
    completed_episodes: u32,
}

impl Episode {
    /// `max_step == 0` means no step limit
    pub fn new(max_step: u32) -> Self {
        Self {
            max_step,
            ..Default::default()
        }
    }

    pub fn max_step(&self) -> u32 {
        self.max_step
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Reward accumulated since the last decision
    pub fn step_reward(&self) -> f32 {
        self.step_reward
    }

    pub fn cumulative_reward(&self) -> f32 {
        self.cumulative_reward
    }

    pub fn completed_episodes(&self) -> u32 {
        self.completed_episodes
    }

    pub fn is_done(&self) -> bool {
        self.end.is_some()
    }

    pub fn end_reason(&self) -> Option<EpisodeEnd> {
        self.end
    }

    /// Increment the current step reward
    pub fn add_reward(&mut self, reward: f32) {
        self.step_reward += reward;
        self.cumulative_reward += reward;
    }

    /// Replace the current step reward
    pub fn set_reward(&mut self, reward: f32) {
        self.cumulative_reward += reward - self.step_reward;
        self.step_reward = reward;
    }

    /// Terminate the episode; later calls keep the first reason
    pub fn end_episode(&mut self) {
        if self.end.is_none() {
            self.end = Some(EpisodeEnd::Terminated);
        }
    }

    /// Stop the episode from outside the agent (e.g. a tick budget ran out)
    pub fn interrupt(&mut self) {
        if self.end.is_none() {
            self.end = Some(EpisodeEnd::Interrupted);
        }
    }

    /// Take the reward of the step that just finished
    pub fn take_step_reward(&mut self) -> f32 {
        std::mem::take(&mut self.step_reward)
    }

    /// Count one agent step; interrupts the episode at the step limit
    pub fn increment_step(&mut self) {
        self.step_count += 1;
        if self.max_step > 0 && self.step_count >= self.max_step && self.end.is_none() {
            self.end = Some(EpisodeEnd::Interrupted);
        }
    }

    /// Start a fresh episode
    pub fn begin(&mut self) {
        if self.step_count > 0 || self.end.is_some() {
            self.completed_episodes += 1;
        }
        self.step_count = 0;
        self.step_reward = 0.0;
        self.cumulative_reward = 0.0;
        self.end = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_set_reward() {
        let mut episode = Episode::new(0);
        episode.add_reward(0.5);
        episode.add_reward(0.25);
        assert_eq!(episode.step_reward(), 0.75);
        assert_eq!(episode.cumulative_reward(), 0.75);

        episode.set_reward(-1.0);
        assert_eq!(episode.step_reward(), -1.0);
        assert_eq!(episode.cumulative_reward(), -1.0);
    }

    #[test]
    fn test_set_reward_only_replaces_current_step() {
        let mut episode = Episode::new(0);
        episode.add_reward(2.0);
        episode.take_step_reward();
        episode.increment_step();

        episode.add_reward(0.5);
        episode.set_reward(-1.0);
        assert_eq!(episode.cumulative_reward(), 1.0);
    }

    #[test]
    fn test_step_limit_interrupts() {
        let mut episode = Episode::new(3);
        episode.increment_step();
        episode.increment_step();
        assert!(!episode.is_done());
        episode.increment_step();
        assert_eq!(episode.end_reason(), Some(EpisodeEnd::Interrupted));
    }

    #[test]
    fn test_zero_max_step_is_unlimited() {
        let mut episode = Episode::new(0);
        for _ in 0..10_000 {
            episode.increment_step();
        }
        assert!(!episode.is_done());
    }

    #[test]
    fn test_end_keeps_first_reason_and_begin_resets() {
        let mut episode = Episode::new(1);
        episode.end_episode();
        episode.increment_step();
        assert_eq!(episode.end_reason(), Some(EpisodeEnd::Terminated));

        episode.begin();
        assert!(!episode.is_done());
        assert_eq!(episode.step_count(), 0);
        assert_eq!(episode.cumulative_reward(), 0.0);
        assert_eq!(episode.completed_episodes(), 1);
    }
}
