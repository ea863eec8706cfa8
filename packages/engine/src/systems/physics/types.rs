use crate::domain::config::PhysicsConfig;
use crate::domain::geometry::{Size, Vec2};

/// The pet while it is airborne. Positions are the element's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsBody {
    pub pos: Vec2,
    /// px/frame
    pub vel: Vec2,
    /// Frames integrated since release
    pub frames: u32,
}

impl PhysicsBody {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel, frames: 0 }
    }

    pub fn is_still(&self) -> bool {
        self.vel.x == 0.0 && self.vel.y == 0.0
    }

    pub fn snap_to_floor(&mut self, bounds: &Bounds) {
        self.pos = Vec2::new(self.pos.x.clamp(bounds.min_x, bounds.max_x), bounds.floor);
        self.vel = Vec2::zero();
    }
}

/// Reachable top-left positions for the pet element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    /// Resting y; matches the bottom position presets
    pub floor: f64,
}

impl Bounds {
    /// Recomputed on every resize
    pub fn from_viewport(viewport: Size, pet: Size, cfg: &PhysicsConfig) -> Self {
        Self {
            min_x: 0.0,
            max_x: (viewport.w - pet.w).max(0.0),
            min_y: 0.0,
            floor: (viewport.h - pet.h - cfg.floor_margin).max(0.0),
        }
    }

    pub fn is_on_floor(&self, pos: Vec2) -> bool {
        pos.y >= self.floor - 0.01
    }

    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(self.min_x, self.max_x), pos.y.clamp(self.min_y, self.floor))
    }
}

/// Outcome of one integrated frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameResult {
    /// Speed into the floor when it was hit this frame
    pub impact: Option<f64>,
    /// Hard landing; the view plays the squash pulse
    pub squash: bool,
    /// At rest on the floor, stop requesting frames
    pub settled: bool,
}
