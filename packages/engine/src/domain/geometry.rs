/// 2D vector in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::zero()
        }
    }

    /// Scale down to at most `max` length, keeping direction
    pub fn clamp_length(&self, max: f64) -> Self {
        let len = self.length();
        if len > max && len > 0.0 {
            *self * (max / len)
        } else {
            *self
        }
    }

    pub fn lerp(a: Vec2, b: Vec2, t: f64) -> Vec2 {
        a + (b - a) * t
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::ops::Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned box, origin at the top-left corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn at(pos: Vec2, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.w, size.h)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn left(&self) -> f64 { self.x }

    pub fn top(&self) -> f64 { self.y }

    pub fn right(&self) -> f64 { self.x + self.w }

    pub fn bottom(&self) -> f64 { self.y + self.h }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Clamp `pos` so a box of `size` stays inside `viewport`.
/// Boxes larger than the viewport pin to the origin.
pub fn clamp_into(pos: Vec2, size: Size, viewport: Size) -> Vec2 {
    let max_x = (viewport.w - size.w).max(0.0);
    let max_y = (viewport.h - size.h).max(0.0);
    Vec2::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_length_keeps_direction() {
        let v = Vec2::new(30.0, 40.0).clamp_length(10.0);
        assert!((v.length() - 10.0).abs() < 1e-9);
        assert!((v.x - 6.0).abs() < 1e-9);
        assert_eq!(Vec2::new(1.0, 1.0).clamp_length(10.0), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn clamp_into_handles_oversized_boxes() {
        let vp = Size::new(100.0, 100.0);
        assert_eq!(clamp_into(Vec2::new(-5.0, 500.0), Size::new(20.0, 20.0), vp), Vec2::new(0.0, 80.0));
        assert_eq!(clamp_into(Vec2::new(50.0, 50.0), Size::new(200.0, 200.0), vp), Vec2::zero());
    }
}
