//! Scene System - where props go and where the pet stands around them

use crate::domain::geometry::{clamp_into, Rect, Size, Vec2};
use crate::domain::scene::SceneId;

/// Top-left of `scene` placed beside the pet, on the side facing the
/// viewport centre, bottoms aligned.
pub fn place_scene(scene: SceneId, pet: Rect, viewport: Size, gap: f64) -> Vec2 {
    let size = scene.size();
    let x = if pet.center().x < viewport.w / 2.0 {
        pet.right() + gap
    } else {
        pet.left() - gap - size.w
    };
    clamp_into(Vec2::new(x, pet.bottom() - size.h), size, viewport)
}

/// Where the pet walks to for a placed scene: inside enterable props,
/// beside the near edge of the others.
pub fn stand_position(scene: SceneId, scene_pos: Vec2, pet_pos: Vec2, pet: Size, viewport: Size, gap: f64) -> Vec2 {
    let rect = Rect::at(scene_pos, scene.size());
    let y = rect.bottom() - pet.h;
    let x = if scene.is_enterable() {
        rect.center().x - pet.w / 2.0
    } else if pet_pos.x + pet.w / 2.0 < rect.center().x {
        rect.left() - pet.w - gap
    } else {
        rect.right() + gap
    };
    clamp_into(Vec2::new(x, y), pet, viewport)
}

/// Hiding spot at the nearest horizontal edge with `peek` of the pet visible
pub fn edge_position(pet_pos: Vec2, pet: Size, viewport: Size, peek: f64) -> Vec2 {
    let peek = peek.clamp(0.0, 1.0);
    let x = if pet_pos.x + pet.w / 2.0 < viewport.w / 2.0 {
        -pet.w * (1.0 - peek)
    } else {
        viewport.w - pet.w * peek
    };
    Vec2::new(x, pet_pos.y)
}

/// Visibility and placement of every prop. Nodes are never removed, only
/// shown and hidden.
#[derive(Clone, Debug, Default)]
pub struct SceneBoard {
    slots: [Option<Vec2>; 3],
}

impl SceneBoard {
    pub fn show(&mut self, scene: SceneId, pos: Vec2) {
        self.slots[scene.index()] = Some(pos);
    }

    pub fn hide(&mut self, scene: SceneId) -> bool {
        self.slots[scene.index()].take().is_some()
    }

    pub fn position(&self, scene: SceneId) -> Option<Vec2> {
        self.slots[scene.index()]
    }

    pub fn is_visible(&self, scene: SceneId) -> bool {
        self.slots[scene.index()].is_some()
    }

    pub fn visible(&self) -> Vec<SceneId> {
        SceneId::ALL.into_iter().filter(|s| self.is_visible(*s)).collect()
    }
}
