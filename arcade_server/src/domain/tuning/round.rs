use std::time::Duration;

/// Gameplay tuning for round goals and difficulty scaling.
#[derive(Debug, Clone, Copy)]
pub struct RoundTuning {
    /// Asteroids to destroy in round 1.
    pub base_goal: u32,
    /// Extra asteroids required per subsequent round.
    pub goal_increase: u32,
    /// Pause between clearing a round and starting the next.
    pub transition_time: Duration,
    /// Per-round compounding factor applied to asteroid speed.
    pub speed_multiplier: f32,
    /// Spawn interval when a single player remains.
    pub solo_spawn_interval: Duration,
    /// Spawn interval when two or more players share the session.
    pub multiplayer_spawn_interval: Duration,
    /// Interval shaved off per round after the first.
    pub spawn_interval_reduction: Duration,
    pub min_spawn_interval: Duration,
}

impl RoundTuning {
    pub fn goal(&self, round: u32) -> u32 {
        self.base_goal + round.saturating_sub(1) * self.goal_increase
    }

    /// Non-increasing in `round`, never below `min_spawn_interval`.
    pub fn spawn_interval(&self, round: u32, multiplayer: bool) -> Duration {
        let base = if multiplayer {
            self.multiplayer_spawn_interval
        } else {
            self.solo_spawn_interval
        };
        base.saturating_sub(self.spawn_interval_reduction * round.saturating_sub(1))
            .max(self.min_spawn_interval)
    }

    pub fn speed_scale(&self, round: u32) -> f32 {
        self.speed_multiplier.powi(round.saturating_sub(1) as i32)
    }
}

impl Default for RoundTuning {
    fn default() -> Self {
        Self {
            base_goal: 10,
            goal_increase: 5,
            transition_time: Duration::from_millis(3000),
            speed_multiplier: 1.05,
            solo_spawn_interval: Duration::from_millis(1500),
            multiplayer_spawn_interval: Duration::from_millis(1200),
            spawn_interval_reduction: Duration::from_millis(50),
            min_spawn_interval: Duration::from_millis(300),
        }
    }
}
