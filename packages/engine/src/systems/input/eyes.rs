use crate::domain::geometry::{Rect, Vec2};

/// Pupil translation toward the pointer. Eyes sit a third of the way down the
/// pet; the offset grows with distance up to `max`.
pub fn pupil_offset(pet: Rect, pointer: Vec2, max: f64, divisor: f64) -> Vec2 {
    let eyes = Vec2::new(pet.center().x, pet.top() + pet.h / 3.0);
    let delta = pointer - eyes;
    let distance = (delta.length() / divisor.max(1.0)).min(max);
    delta.normalize() * distance
}
