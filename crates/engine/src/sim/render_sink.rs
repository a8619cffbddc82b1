use super::parallax::ParallaxOutput;
use super::state::{MountKind, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountView {
    pub kind: MountKind,
    pub position: Vec2,
    pub ridden: bool,
}

/// Everything the presentation side needs for one frame. Built from session
/// state by value; nothing flows back into the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub tick: u64,
    pub player_x: f32,
    pub player_y: f32,
    pub mount_kind: MountKind,
    pub rider_offset: Vec2,
    pub mounts: Vec<MountView>,
    pub camera_x: f32,
    pub parallax: ParallaxOutput,
    pub debug: bool,
}

impl RenderFrame {
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "x {:.0} | y {:.0} | camera {:.0} | mount {}",
            self.player_x,
            self.player_y,
            self.camera_x,
            self.mount_kind.as_token()
        );
        if let ParallaxOutput::Durations { speed, .. } = &self.parallax {
            line.push_str(&format!(" | bg speed {speed:.2}"));
        }
        if self.debug {
            line.push_str(" | DEBUG");
        }
        line
    }
}
