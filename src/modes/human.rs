use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use super::game_loop::{GameLoop, TickOutcome};
use crate::game::{GameConfig, GameEngine};
use crate::input::InputHandler;
use crate::render::{Surface, TerminalSurface};

type CrosstermSurface = TerminalSurface<CrosstermBackend<Stderr>>;

/// Keyboard-controlled play in the terminal
///
/// Acts as the scheduler for [`GameLoop`]: it owns the tick timer and the
/// key event stream and hands both to the loop one event at a time.
pub struct HumanMode {
    config: GameConfig,
    input_handler: InputHandler,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            input_handler: InputHandler::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let engine = GameEngine::new(self.config.clone());
        let mut game = GameLoop::new(engine, TerminalSurface::new(terminal));

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut game).await;

        // Cleanup terminal
        let cleanup = cleanup_terminal(game.surface_mut());
        if let Err(err) = &result {
            warn!("game loop failed: {err:#}");
        }

        result.and(cleanup)
    }

    async fn run_game_loop(&mut self, game: &mut GameLoop<CrosstermSurface>) -> Result<()> {
        let mut event_stream = EventStream::new();
        let tick_interval = self.config.tick_interval();
        let mut tick_timer: Option<Interval> = None;

        game.redraw()?;

        loop {
            // Arm the timer when a round starts, drop it once the round ends.
            match (game.wants_ticks(), tick_timer.is_some()) {
                (true, false) => tick_timer = Some(tick_timer_for(tick_interval)),
                (false, true) => tick_timer = None,
                _ => {}
            }

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(game, event)?,
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => break,
                    }
                }

                // Game logic tick
                _ = next_tick(&mut tick_timer) => {
                    if game.on_tick()? == TickOutcome::GameOver {
                        tick_timer = None;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    game.quit();
                }
            }

            if game.should_quit() {
                break;
            }
        }

        let state = game.state();
        info!(
            "leaving with score {} (best {})",
            state.score,
            game.metrics().best_with(state.score)
        );
        Ok(())
    }

    fn handle_event<S: Surface>(&self, game: &mut GameLoop<S>, event: Event) -> Result<()> {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.input_handler.handle_key_event(key);
                game.on_key(action)
            }
            Event::Resize(..) => game.redraw(),
            _ => Ok(()),
        }
    }
}

/// Interval whose first tick lands one period from now
fn tick_timer_for(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Resolves on the next tick, or never while no timer is armed
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn cleanup_terminal(surface: &mut CrosstermSurface) -> Result<()> {
    let terminal = surface.terminal_mut();
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
