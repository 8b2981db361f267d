//! Snake TUI - classic single-player Snake in the terminal
//!
//! This library provides:
//! - Core game rules (game module)
//! - Keyboard mapping and the pending-direction queue (input module)
//! - The drawing surface and its ratatui implementation (render module)
//! - Session bookkeeping such as the high score (metrics module)
//! - The tick-driven game loop and the interactive runner (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
