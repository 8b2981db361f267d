//! Core game logic module for Snake
//!
//! Pure state and rules: no terminal, timer or input handling lives here.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use state::{EndReason, GameState, GameStatus, Position, Snake};
