use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture, TextureError};
use winit::window::Window;

use crate::config::WorldConfig;
use crate::sim::{MountKind, MountView, ParallaxOutput, RenderFrame, Vec2};

use super::{world_to_screen_px, wrap_offset, Viewport};

const SKY_COLOR: [u8; 4] = [118, 170, 214, 255];
const GROUND_COLOR: [u8; 4] = [86, 64, 44, 255];
const GROUND_EDGE_COLOR: [u8; 4] = [96, 148, 62, 255];
const LAYER_COLORS: [[u8; 4]; 4] = [
    [150, 176, 204, 255],
    [112, 140, 160, 255],
    [78, 106, 112, 255],
    [52, 80, 70, 255],
];
const RIDER_COLOR: [u8; 4] = [230, 92, 64, 255];
const BIKE_COLOR: [u8; 4] = [60, 62, 70, 255];
const HORSE_COLOR: [u8; 4] = [140, 96, 58, 255];
const DEBUG_OUTLINE_COLOR: [u8; 4] = [255, 236, 120, 255];
const GROUND_EDGE_PX: i32 = 6;
const LAYER_PERIOD_BASE_PX: f32 = 360.0;
const LAYER_PERIOD_STEP_PX: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneGeometry {
    pub ground_y: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl SceneGeometry {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            ground_y: config.ground_y,
            player_width: config.player_width,
            player_height: config.player_height,
        }
    }
}

pub struct Renderer {
    pixels: Pixels<'static>,
    viewport: Viewport,
    geometry: SceneGeometry,
    /// Loop progress per background layer in speed mode, `[0, 1)`.
    layer_phase: Vec<f32>,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        viewport: Viewport,
        geometry: SceneGeometry,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(viewport.width, viewport.height, surface)?;
        Ok(Self {
            pixels,
            viewport,
            geometry,
            layer_phase: Vec::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)
    }

    /// Draws one frame. `frame_dt_seconds` is wall time and only drives the
    /// speed-mode background loop.
    pub fn render(&mut self, frame: &RenderFrame, frame_dt_seconds: f32) -> Result<(), Error> {
        let offsets =
            layer_scroll_offsets(&frame.parallax, &mut self.layer_phase, frame_dt_seconds);
        let mut canvas = Canvas::new(
            self.pixels.frame_mut(),
            self.viewport.width,
            self.viewport.height,
        );
        draw_scene(&mut canvas, frame, &offsets, &self.geometry);
        self.pixels.render()
    }
}

/// Horizontal scroll per layer. Position mode uses the offsets as given;
/// speed mode advances each layer's loop phase by `dt / duration`.
fn layer_scroll_offsets(
    parallax: &ParallaxOutput,
    layer_phase: &mut Vec<f32>,
    frame_dt_seconds: f32,
) -> Vec<f32> {
    match parallax {
        ParallaxOutput::Offsets(offsets) => offsets.clone(),
        ParallaxOutput::Durations { durations, .. } => {
            // Phases belong to a layer set; a different count starts over.
            if layer_phase.len() != durations.len() {
                layer_phase.clear();
                layer_phase.resize(durations.len(), 0.0);
            }
            let dt = frame_dt_seconds.max(0.0);
            durations
                .iter()
                .zip(layer_phase.iter_mut())
                .enumerate()
                .map(|(index, (duration, phase))| {
                    if *duration > 0.0 && duration.is_finite() {
                        *phase = (*phase + dt / duration).fract();
                    }
                    -*phase * layer_period_px(index)
                })
                .collect()
        }
    }
}

fn layer_period_px(index: usize) -> f32 {
    LAYER_PERIOD_BASE_PX + LAYER_PERIOD_STEP_PX * index as f32
}

/// Triangle-wave ridge height at `x` within one period, between half and
/// full `peak`.
fn ridge_height(x_in_period: f32, period: f32, peak: f32) -> f32 {
    let t = (x_in_period / period).clamp(0.0, 1.0);
    let tri = 1.0 - (2.0 * t - 1.0).abs();
    peak * (0.5 + 0.5 * tri)
}

fn mount_size(kind: MountKind) -> (f32, f32) {
    match kind {
        MountKind::Bike => (120.0, 60.0),
        MountKind::Horse => (160.0, 110.0),
        MountKind::None => (0.0, 0.0),
    }
}

fn mount_color(kind: MountKind) -> [u8; 4] {
    match kind {
        MountKind::Horse => HORSE_COLOR,
        _ => BIKE_COLOR,
    }
}

fn draw_scene(
    canvas: &mut Canvas<'_>,
    frame: &RenderFrame,
    offsets: &[f32],
    geometry: &SceneGeometry,
) {
    canvas.clear(SKY_COLOR);
    let ground_px = geometry.ground_y.round() as i32;

    let layer_count = offsets.len();
    for (index, offset) in offsets.iter().enumerate() {
        let color = LAYER_COLORS[index.min(LAYER_COLORS.len() - 1)];
        // Far layers are taller so nearer ones overlap them.
        let depth = (layer_count - index) as f32 / (layer_count as f32 + 1.0);
        let peak = geometry.ground_y * 0.6 * depth;
        let period = layer_period_px(index);
        for x in 0..canvas.width as i32 {
            let pattern_x = wrap_offset(x as f32 - offset, period);
            let height = ridge_height(pattern_x, period, peak).round() as i32;
            canvas.fill_rect(x, ground_px - height, 1, height, color);
        }
    }

    let below = canvas.height as i32 - ground_px;
    canvas.fill_rect(0, ground_px, canvas.width as i32, below, GROUND_COLOR);
    canvas.fill_rect(0, ground_px, canvas.width as i32, GROUND_EDGE_PX, GROUND_EDGE_COLOR);

    // Ridden mount last so it stays on top of any idle one it passes.
    let (ridden, idle): (Vec<&MountView>, Vec<&MountView>) =
        frame.mounts.iter().partition(|mount| mount.ridden);
    for mount in idle.into_iter().chain(ridden) {
        draw_mount(canvas, frame.camera_x, mount);
    }

    let rider_foot = Vec2::new(
        frame.player_x + frame.rider_offset.x,
        frame.player_y + frame.rider_offset.y,
    );
    let (left, foot) = world_to_screen_px(frame.camera_x, rider_foot);
    let width = geometry.player_width.round() as i32;
    let height = geometry.player_height.round() as i32;
    canvas.fill_rect(left, foot - height, width, height, RIDER_COLOR);
    if frame.debug {
        canvas.outline_rect(left, foot - height, width, height, DEBUG_OUTLINE_COLOR);
    }
}

fn draw_mount(canvas: &mut Canvas<'_>, camera_x: f32, mount: &MountView) {
    let (width, height) = mount_size(mount.kind);
    let (left, foot) = world_to_screen_px(camera_x, mount.position);
    canvas.fill_rect(
        left,
        foot - height.round() as i32,
        width.round() as i32,
        height.round() as i32,
        mount_color(mount.kind),
    );
}

/// RGBA8 framebuffer view with clipped primitives.
struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    fn clear(&mut self, color: [u8; 4]) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    fn fill_rect(&mut self, left: i32, top: i32, width: i32, height: i32, color: [u8; 4]) {
        if width <= 0 || height <= 0 {
            return;
        }
        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = left.saturating_add(width).min(self.width as i32);
        let y1 = top.saturating_add(height).min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.write_pixel(x, y, color);
            }
        }
    }

    fn outline_rect(&mut self, left: i32, top: i32, width: i32, height: i32, color: [u8; 4]) {
        if width <= 0 || height <= 0 {
            return;
        }
        let right = left + width - 1;
        let bottom = top + height - 1;
        for x in left..=right {
            self.write_pixel(x, top, color);
            self.write_pixel(x, bottom, color);
        }
        for y in top..=bottom {
            self.write_pixel(left, y, color);
            self.write_pixel(right, y, color);
        }
    }

    fn write_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let Some(offset) = (y as usize)
            .checked_mul(self.width as usize)
            .and_then(|row| row.checked_add(x as usize))
            .and_then(|pixel| pixel.checked_mul(4))
        else {
            return;
        };
        if let Some(slot) = self.frame.get_mut(offset..offset + 4) {
            slot.copy_from_slice(&color);
        }
    }
}
