use std::time::{Duration, Instant};

/// Per-session bookkeeping: best score, rounds played, time in this round
///
/// The round clock only runs between [`GameMetrics::start_round`] and the
/// next [`GameMetrics::record_round`]; in between rounds it holds still.
#[derive(Debug, Clone, Default)]
pub struct GameMetrics {
    round_started: Option<Instant>,
    round_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time spent in the current (or last finished) round
    pub fn round_time(&self) -> Duration {
        self.round_time
    }

    pub fn start_round(&mut self) {
        self.round_started = Some(Instant::now());
        self.round_time = Duration::ZERO;
    }

    /// Stop the clock and show zero until the next round starts
    pub fn clear_clock(&mut self) {
        self.round_started = None;
        self.round_time = Duration::ZERO;
    }

    pub fn tick_clock(&mut self) {
        if let Some(started) = self.round_started {
            self.round_time = started.elapsed();
        }
    }

    /// Count a round that ended or was abandoned with `score` points
    ///
    /// Returns true when `score` beats every earlier round.
    pub fn record_round(&mut self, score: u32) -> bool {
        self.tick_clock();
        self.round_started = None;
        self.games_played += 1;

        let new_best = score > self.high_score;
        self.high_score = self.high_score.max(score);
        new_best
    }

    /// Best score including the round still being played
    pub fn best_with(&self, current_score: u32) -> u32 {
        self.high_score.max(current_score)
    }
}

/// `MM:SS`, minutes are not wrapped into hours
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
