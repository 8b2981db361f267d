pub mod game_loop;
pub mod human;

pub use game_loop::{GameLoop, LoopPhase, TickOutcome};
pub use human::HumanMode;
