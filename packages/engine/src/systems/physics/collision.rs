use crate::domain::config::PhysicsConfig;

use super::types::{Bounds, PhysicsBody};

/// Keep the body inside `bounds`, reflecting velocity with `bounce`.
/// Returns the speed into the floor if the floor was hit.
pub fn resolve_bounds(body: &mut PhysicsBody, bounds: &Bounds, cfg: &PhysicsConfig) -> Option<f64> {
    let bounce = cfg.bounce.clamp(0.0, 1.0);

    if body.pos.x < bounds.min_x {
        body.pos.x = bounds.min_x;
        body.vel.x = body.vel.x.abs() * bounce;
    } else if body.pos.x > bounds.max_x {
        body.pos.x = bounds.max_x;
        body.vel.x = -body.vel.x.abs() * bounce;
    }

    if body.pos.y < bounds.min_y {
        body.pos.y = bounds.min_y;
        body.vel.y = body.vel.y.abs() * bounce;
        return None;
    }

    if body.pos.y >= bounds.floor && body.vel.y >= 0.0 {
        let impact = body.vel.y;
        body.pos.y = bounds.floor;
        body.vel.y = -impact * bounce;
        return Some(impact);
    }

    None
}
