use crate::domain::config::ActivityConfig;
use crate::domain::geometry::{Size, Vec2};

/// Eased tween between two positions; duration scales with distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walk {
    pub from: Vec2,
    pub to: Vec2,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Walk {
    pub fn new(from: Vec2, to: Vec2, now_ms: f64, cfg: &ActivityConfig) -> Self {
        let distance = (to - from).length();
        let duration_ms = (distance / cfg.walk_speed.max(0.001)).max(cfg.walk_min_ms).min(cfg.walk_max_ms);
        Self { from, to, start_ms: now_ms, duration_ms }
    }

    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn position_at(&self, now_ms: f64) -> Vec2 {
        Vec2::lerp(self.from, self.to, ease_in_out(self.progress(now_ms)))
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Which way the pet faces while walking
    pub fn heads_left(&self) -> bool {
        self.to.x < self.from.x
    }

    /// Carry both ends into a resized viewport, timing unchanged
    pub fn refit(&mut self, old: Size, new: Size, pet: Size) {
        self.from = refit_point(self.from, old, new, pet);
        self.to = refit_point(self.to, old, new, pet);
    }
}

/// Clamp into `new`, keeping a horizontal overhang past either edge (a
/// hiding spot) at the same depth
fn refit_point(p: Vec2, old: Size, new: Size, pet: Size) -> Vec2 {
    let old_max_x = (old.w - pet.w).max(0.0);
    let max_x = (new.w - pet.w).max(0.0);
    let x = if p.x < 0.0 {
        p.x.max(-pet.w)
    } else if p.x > old_max_x {
        max_x + (p.x - old_max_x).min(pet.w)
    } else {
        p.x.min(max_x)
    };
    Vec2::new(x, p.y.clamp(0.0, (new.h - pet.h).max(0.0)))
}

/// Quadratic ease-in-out on [0, 1]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}
