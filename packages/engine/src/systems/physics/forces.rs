use crate::domain::config::PhysicsConfig;

use super::types::PhysicsBody;

/// Gravity plus the speed cap
#[inline(always)]
pub fn apply_gravity(body: &mut PhysicsBody, cfg: &PhysicsConfig) {
    body.vel.y += cfg.gravity;
    body.vel = body.vel.clamp_length(cfg.max_speed);
}

/// Horizontal damping; the floor grips harder than the air
#[inline(always)]
pub fn apply_friction(body: &mut PhysicsBody, grounded: bool, cfg: &PhysicsConfig) {
    let friction = if grounded { cfg.ground_friction } else { cfg.air_friction };
    body.vel.x *= friction.clamp(0.0, 1.0);
}

/// Zero out creeping velocities. Vertical speed is only zeroed on the floor,
/// at the top of an arc it is about to grow again.
#[inline(always)]
pub fn zero_small(body: &mut PhysicsBody, grounded: bool, cfg: &PhysicsConfig) {
    if body.vel.x.abs() < cfg.epsilon || !body.vel.x.is_finite() {
        body.vel.x = 0.0;
    }
    if (grounded && body.vel.y.abs() < cfg.epsilon) || !body.vel.y.is_finite() {
        body.vel.y = 0.0;
    }
}
