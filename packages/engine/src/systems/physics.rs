//! Physics System - free fall after a throw
//!
//! Integrates a single rigid body (the pet) inside the viewport:
//! - gravity accelerates vy each frame, speed is capped
//! - air friction damps vx while airborne, ground friction while sliding
//! - hitting a bound reflects the velocity scaled by `bounce`
//! - velocities below `epsilon` are zeroed so the loop always ends
//! - after `max_frames` the body is snapped onto the floor regardless

mod collision;
mod forces;
mod types;

pub use collision::resolve_bounds;
pub use forces::{apply_friction, apply_gravity, zero_small};
pub use types::{Bounds, FrameResult, PhysicsBody};

use crate::domain::config::PhysicsConfig;

/// Frames to integrate for a tick of `dt_ms`, so a stalled tab catches up
/// a little without teleporting.
pub fn frames_for(dt_ms: f64, cfg: &PhysicsConfig) -> u32 {
    if !dt_ms.is_finite() || dt_ms <= 0.0 {
        return 1;
    }
    let frames = (dt_ms / cfg.frame_ms.max(1.0)).round() as u32;
    frames.clamp(1, cfg.max_catch_up_frames.max(1))
}

/// Advance one frame
pub fn step(body: &mut PhysicsBody, bounds: &Bounds, cfg: &PhysicsConfig) -> FrameResult {
    body.frames += 1;
    if body.frames >= cfg.max_frames {
        body.snap_to_floor(bounds);
        return FrameResult { impact: None, squash: false, settled: true };
    }

    apply_gravity(body, cfg);
    body.pos = body.pos + body.vel;

    let impact = resolve_bounds(body, bounds, cfg);
    let grounded = bounds.is_on_floor(body.pos);
    apply_friction(body, grounded, cfg);
    zero_small(body, grounded, cfg);

    let settled = grounded && body.is_still();
    if settled {
        body.pos.y = bounds.floor;
    }

    FrameResult {
        impact,
        squash: impact.map_or(false, |speed| speed > cfg.squash_impact),
        settled,
    }
}
