use crate::sim::Vec2;

/// Framebuffer dimensions in pixels. The framebuffer matches the simulation
/// viewport one-to-one; pixels scales it into the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn from_world_size(width: f32, height: f32) -> Self {
        Self {
            width: width.round().max(1.0) as u32,
            height: height.round().max(1.0) as u32,
        }
    }
}

/// World y already grows downward and the camera never moves vertically, so
/// only x is shifted.
pub fn world_to_screen_px(camera_x: f32, world: Vec2) -> (i32, i32) {
    let x = world.x - camera_x;
    (x.round() as i32, world.y.round() as i32)
}

/// Reduces a scroll offset into `[0, period)` for drawing a repeating band.
pub fn wrap_offset(offset: f32, period: f32) -> f32 {
    if period <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    offset.rem_euclid(period)
}
