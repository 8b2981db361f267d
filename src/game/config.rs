use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Smallest board edge that still leaves room to steer
pub const MIN_GRID_SIZE: usize = 4;

/// Largest board edge; the board has to fit a terminal and be drawn every tick
pub const MAX_GRID_SIZE: usize = 200;

/// Upper bound on points per food, keeps a full board's score well inside `u32`
pub const MAX_FOOD_REWARD: u32 = 1_000;

/// Configuration for a game of Snake
///
/// Defaults reproduce the classic board: a 600x600 window with a 50px
/// scoreboard, carved into 20px cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Number of segments the snake starts with, head included
    pub initial_snake_length: usize,
    /// Points added to the score for each food eaten
    pub food_reward: u32,
    /// Milliseconds between two game ticks
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 27,
            initial_snake_length: 3,
            food_reward: 10,
            tick_interval_ms: 125,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a JSON configuration file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject configurations the game cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.grid_width < MIN_GRID_SIZE || self.grid_height < MIN_GRID_SIZE {
            bail!(
                "Grid must be at least {min}x{min}, got {}x{}",
                self.grid_width,
                self.grid_height,
                min = MIN_GRID_SIZE
            );
        }
        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            bail!(
                "Grid must be at most {max}x{max}, got {}x{}",
                self.grid_width,
                self.grid_height,
                max = MAX_GRID_SIZE
            );
        }
        if self.food_reward > MAX_FOOD_REWARD {
            bail!(
                "Food reward must be at most {MAX_FOOD_REWARD}, got {}",
                self.food_reward
            );
        }
        if self.tick_interval_ms == 0 {
            bail!("Tick interval must be greater than zero");
        }
        // The starting body trails left of the centre cell.
        let room = self.grid_width / 2 + 1;
        if self.initial_snake_length == 0 || self.initial_snake_length > room {
            bail!(
                "Initial snake length must be between 1 and {room} for a grid {} cells wide",
                self.grid_width
            );
        }
        Ok(())
    }
}
