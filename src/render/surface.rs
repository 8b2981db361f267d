use anyhow::{Context, Result};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;

use super::renderer::Renderer;
use crate::game::Position;

/// Numbers shown in the scoreboard strip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
    pub elapsed: Duration,
}

/// What is laid over the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    /// Waiting for the first key press of a round
    StartPrompt,
    GameOver { score: u32 },
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Head first
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub scoreboard: Scoreboard,
    /// Points just earned, shown briefly next to the score
    pub splash: Option<u32>,
    pub overlay: Overlay,
}

/// Where the game loop sends what the player should see
///
/// A frame is built by `draw_board` followed by the other drawing calls,
/// and becomes visible on `present`.
pub trait Surface {
    /// Begin a new frame for a board of the given size
    fn draw_board(&mut self, grid_width: usize, grid_height: usize);
    fn draw_snake(&mut self, segments: &[Position]);
    fn draw_food(&mut self, food: Position);
    fn draw_score(&mut self, scoreboard: Scoreboard);
    fn draw_splash(&mut self, value: Option<u32>);
    fn show_start_prompt(&mut self);
    fn show_game_over(&mut self, score: u32);
    fn present(&mut self) -> Result<()>;
}

/// Collects drawing calls into a [`Scene`]
///
/// Shared by every surface so they agree on what a frame contains.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Surface for SceneBuilder {
    fn draw_board(&mut self, grid_width: usize, grid_height: usize) {
        self.scene = Scene {
            grid_width,
            grid_height,
            scoreboard: self.scene.scoreboard,
            ..Default::default()
        };
    }

    fn draw_snake(&mut self, segments: &[Position]) {
        self.scene.snake = segments.to_vec();
    }

    fn draw_food(&mut self, food: Position) {
        self.scene.food = Some(food);
    }

    fn draw_score(&mut self, scoreboard: Scoreboard) {
        self.scene.scoreboard = scoreboard;
    }

    fn draw_splash(&mut self, value: Option<u32>) {
        self.scene.splash = value;
    }

    fn show_start_prompt(&mut self) {
        self.scene.overlay = Overlay::StartPrompt;
    }

    fn show_game_over(&mut self, score: u32) {
        self.scene.overlay = Overlay::GameOver { score };
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Surface backed by a ratatui terminal
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    renderer: Renderer,
    frame: SceneBuilder,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            renderer: Renderer::new(),
            frame: SceneBuilder::default(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn scene(&self) -> &Scene {
        self.frame.scene()
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn draw_board(&mut self, grid_width: usize, grid_height: usize) {
        self.frame.draw_board(grid_width, grid_height);
    }

    fn draw_snake(&mut self, segments: &[Position]) {
        self.frame.draw_snake(segments);
    }

    fn draw_food(&mut self, food: Position) {
        self.frame.draw_food(food);
    }

    fn draw_score(&mut self, scoreboard: Scoreboard) {
        self.frame.draw_score(scoreboard);
    }

    fn draw_splash(&mut self, value: Option<u32>) {
        self.frame.draw_splash(value);
    }

    fn show_start_prompt(&mut self) {
        self.frame.show_start_prompt();
    }

    fn show_game_over(&mut self, score: u32) {
        self.frame.show_game_over(score);
    }

    fn present(&mut self) -> Result<()> {
        let renderer = &self.renderer;
        let scene = self.frame.scene();
        self.terminal
            .draw(|frame| renderer.render(frame, scene))
            .context("Failed to draw frame")?;
        Ok(())
    }
}
