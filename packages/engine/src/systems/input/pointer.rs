use crate::domain::geometry::Vec2;

/// Where a pointer event came from. Touch gestures may long-press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// `MouseEvent.button` codes; touches always report primary
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// Pressed, still within the slop radius
    Pending,
    /// Just crossed the slop radius this update
    Started,
    Moving,
}

/// Weight of the newest sample in the velocity average
const VELOCITY_BLEND: f64 = 0.7;

/// One press-move-release gesture on the pet
#[derive(Clone, Debug)]
pub struct DragTracker {
    pub kind: PointerKind,
    origin: Vec2,
    /// Pointer position relative to the pet's top-left corner
    grab_offset: Vec2,
    pub pressed_ms: f64,
    last_pos: Vec2,
    last_ms: f64,
    /// Smoothed pointer velocity (px/ms)
    velocity: Vec2,
    active: bool,
}

impl DragTracker {
    pub fn begin(kind: PointerKind, pointer: Vec2, pet_pos: Vec2, now_ms: f64) -> Self {
        Self {
            kind,
            origin: pointer,
            grab_offset: pointer - pet_pos,
            pressed_ms: now_ms,
            last_pos: pointer,
            last_ms: now_ms,
            velocity: Vec2::zero(),
            active: false,
        }
    }

    /// True once the gesture moved past the slop radius
    pub fn is_drag(&self) -> bool {
        self.active
    }

    pub fn update(&mut self, pointer: Vec2, now_ms: f64, slop_px: f64) -> DragPhase {
        let dt = now_ms - self.last_ms;
        if dt > 0.0 {
            let instant = (pointer - self.last_pos) / dt;
            self.velocity = instant * VELOCITY_BLEND + self.velocity * (1.0 - VELOCITY_BLEND);
            self.last_ms = now_ms;
        }
        self.last_pos = pointer;

        if self.active {
            return DragPhase::Moving;
        }
        if (pointer - self.origin).length() > slop_px {
            self.active = true;
            return DragPhase::Started;
        }
        DragPhase::Pending
    }

    /// Pet top-left that keeps the grab point under the pointer
    pub fn target(&self, pointer: Vec2) -> Vec2 {
        pointer - self.grab_offset
    }

    /// Current smoothed speed (px/ms)
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Velocity handed to the physics body (px/frame). A pointer that stopped
    /// before letting go throws nothing.
    pub fn release_velocity(&self, now_ms: f64, stale_ms: f64, frame_ms: f64) -> Vec2 {
        if now_ms - self.last_ms > stale_ms {
            return Vec2::zero();
        }
        self.velocity * frame_ms
    }
}
