//! Tick-driven game loop
//!
//! Sits between the scheduler (timer and key events, see [`super::HumanMode`])
//! and the game rules. It owns the round being played and decides what the
//! surface shows after every event.

use anyhow::Result;
use log::info;

use crate::game::{GameEngine, GameState};
use crate::input::{DirectionQueue, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Scoreboard, Surface};

/// How long the "+N" splash stays up after eating
const SPLASH_MILLIS: u64 = 500;

/// Where the loop is in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Board drawn, waiting for the player to start
    Idle,
    Running,
    /// Round over; only restart or quit do anything
    Ended,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick arrived while not running and was dropped
    Skipped,
    Moved,
    /// The round ended on this tick; no further ticks are wanted
    GameOver,
}

pub struct GameLoop<S: Surface> {
    engine: GameEngine,
    state: GameState,
    phase: LoopPhase,
    queue: DirectionQueue,
    metrics: GameMetrics,
    surface: S,
    splash: Option<(u32, u64)>,
    splash_ticks: u64,
    should_quit: bool,
}

impl<S: Surface> GameLoop<S> {
    pub fn new(mut engine: GameEngine, surface: S) -> Self {
        let state = engine.reset();
        let splash_ticks = SPLASH_MILLIS
            .div_ceil(engine.config().tick_interval_ms.max(1))
            .max(1);

        Self {
            engine,
            state,
            phase: LoopPhase::Idle,
            queue: DirectionQueue::new(),
            metrics: GameMetrics::new(),
            surface,
            splash: None,
            splash_ticks,
            should_quit: false,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        info!("quit requested");
        self.should_quit = true;
    }

    /// The scheduler keeps its timer armed only while this holds
    pub fn wants_ticks(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    pub fn on_key(&mut self, action: KeyAction) -> Result<()> {
        match (action, self.phase) {
            (KeyAction::Quit, _) => self.quit(),
            (KeyAction::Restart, _) => self.restart()?,
            (KeyAction::Move(direction), LoopPhase::Idle) => {
                self.queue.push(direction);
                self.start()?;
            }
            (KeyAction::Move(direction), LoopPhase::Running) => self.queue.push(direction),
            (KeyAction::Start, LoopPhase::Idle) => self.start()?,
            _ => {}
        }
        Ok(())
    }

    /// Leave Idle and begin applying ticks
    pub fn start(&mut self) -> Result<()> {
        if self.phase != LoopPhase::Idle {
            return Ok(());
        }
        if !self.state.is_running() {
            // Nothing to play on this board; go straight to the end screen.
            return self.finish_round();
        }
        info!(
            "round started on a {}x{} board",
            self.state.grid_width, self.state.grid_height
        );
        self.phase = LoopPhase::Running;
        self.metrics.start_round();
        self.redraw()
    }

    pub fn on_tick(&mut self) -> Result<TickOutcome> {
        if self.phase != LoopPhase::Running {
            return Ok(TickOutcome::Skipped);
        }

        let action = self.queue.take();
        let result = self.engine.step(&mut self.state, action);

        self.splash = match self.splash {
            _ if result.ate_food => Some((self.engine.config().food_reward, self.splash_ticks)),
            Some((value, left)) if left > 1 => Some((value, left - 1)),
            _ => None,
        };

        if result.ate_food {
            info!("food eaten, score {}", self.state.score);
        }

        if result.terminated {
            self.finish_round()?;
            return Ok(TickOutcome::GameOver);
        }

        self.redraw()?;
        Ok(TickOutcome::Moved)
    }

    /// Throw the current round away and wait for the player again
    pub fn restart(&mut self) -> Result<()> {
        info!("restart after {} steps", self.state.steps);
        if self.phase == LoopPhase::Running {
            // An abandoned round still counts towards the high score.
            self.metrics.record_round(self.state.score);
        }
        self.state = self.engine.reset();
        self.queue.clear();
        self.splash = None;
        self.phase = LoopPhase::Idle;
        self.metrics.clear_clock();
        self.redraw()
    }

    /// Paint the current snapshot
    pub fn redraw(&mut self) -> Result<()> {
        self.metrics.tick_clock();
        let scoreboard = self.scoreboard();
        let state = &self.state;

        self.surface.draw_board(state.grid_width, state.grid_height);
        self.surface.draw_snake(&state.snake.body);
        self.surface.draw_food(state.food);
        self.surface.draw_score(scoreboard);
        self.surface.draw_splash(self.splash.map(|(value, _)| value));

        match self.phase {
            LoopPhase::Idle => self.surface.show_start_prompt(),
            LoopPhase::Ended => self.surface.show_game_over(self.state.score),
            LoopPhase::Running => {}
        }

        self.surface.present()
    }

    fn finish_round(&mut self) -> Result<()> {
        self.phase = LoopPhase::Ended;
        self.queue.clear();
        if self.metrics.record_round(self.state.score) {
            info!("new high score {}", self.state.score);
        }
        info!(
            "round over ({:?}): score {}, best {}, {} games played",
            self.state.end_reason,
            self.state.score,
            self.metrics.high_score,
            self.metrics.games_played
        );
        self.redraw()
    }

    fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            score: self.state.score,
            high_score: self.metrics.best_with(self.state.score),
            elapsed: self.metrics.round_time(),
        }
    }
}
