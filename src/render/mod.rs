pub mod renderer;
pub mod surface;

pub use renderer::Renderer;
pub use surface::{Overlay, Scene, SceneBuilder, Scoreboard, Surface, TerminalSurface};
