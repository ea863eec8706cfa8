use crate::domain::geometry::{Rect, Size, Vec2};

/// Top-left of the context menu: above the pet when it fits, otherwise
/// below, then kept `margin` away from every viewport edge.
pub fn menu_position(pet: Rect, menu: Size, viewport: Size, margin: f64) -> Vec2 {
    let mut top = pet.top() - menu.h - margin;
    if top < margin {
        top = pet.bottom() + margin;
    }

    let max_left = (viewport.w - menu.w - margin).max(margin);
    let max_top = (viewport.h - menu.h - margin).max(margin);
    Vec2::new(pet.left().clamp(margin, max_left), top.clamp(margin, max_top))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Size = Size::new(1280.0, 720.0);
    const MENU: Size = Size::new(200.0, 260.0);

    #[test]
    fn opens_above_when_there_is_room() {
        let pet = Rect::new(600.0, 500.0, 120.0, 120.0);
        assert_eq!(menu_position(pet, MENU, VP, 10.0), Vec2::new(600.0, 230.0));
    }

    #[test]
    fn flips_below_near_the_top() {
        let pet = Rect::new(600.0, 100.0, 120.0, 120.0);
        assert_eq!(menu_position(pet, MENU, VP, 10.0), Vec2::new(600.0, 230.0));
    }

    #[test]
    fn clamped_into_viewport() {
        let pet = Rect::new(1200.0, 100.0, 120.0, 120.0);
        let p = menu_position(pet, MENU, VP, 10.0);
        assert_eq!(p.x, 1280.0 - 200.0 - 10.0);

        // no room above or below on a short viewport
        let short = Size::new(400.0, 300.0);
        let p = menu_position(Rect::new(-50.0, 150.0, 120.0, 120.0), MENU, short, 10.0);
        assert_eq!(p, Vec2::new(10.0, 30.0));
    }
}
