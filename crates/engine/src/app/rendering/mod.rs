mod renderer;
mod transform;

pub use renderer::{Renderer, SceneGeometry};
pub use transform::{world_to_screen_px, wrap_offset, Viewport};
