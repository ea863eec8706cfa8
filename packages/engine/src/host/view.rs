use crate::domain::errors::PetResult;
use crate::domain::geometry::Vec2;
use crate::domain::scene::SceneId;
use crate::domain::settings::Settings;
use crate::domain::state::PetStateKind;
use crate::domain::topping::{HeldItem, Topping};

/// Boolean visual modifiers layered on top of the state class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualFlag {
    Dragging,
    /// Landing pulse
    Squash,
    Burnt,
    HidingAtEdge,
    /// Unread-notice dot
    StatusIndicator,
    /// Mirrors the sprite while walking left
    FacingLeft,
}

impl VisualFlag {
    pub const ALL: [VisualFlag; 6] = [
        VisualFlag::Dragging,
        VisualFlag::Squash,
        VisualFlag::Burnt,
        VisualFlag::HidingAtEdge,
        VisualFlag::StatusIndicator,
        VisualFlag::FacingLeft,
    ];

    pub fn css_class(self) -> &'static str {
        match self {
            VisualFlag::Dragging => "dragging",
            VisualFlag::Squash => "squash",
            VisualFlag::Burnt => "burnt",
            VisualFlag::HidingAtEdge => "hiding-edge",
            VisualFlag::StatusIndicator => "show",
            VisualFlag::FacingLeft => "facing-left",
        }
    }
}

/// Rendering surface. Every call is a full statement of the new value, so
/// a view can be rebuilt by replaying the latest call of each kind.
pub trait PetView {
    fn set_visible(&mut self, visible: bool) -> PetResult<()>;
    fn set_state_class(&mut self, state: PetStateKind) -> PetResult<()>;
    fn set_flag(&mut self, flag: VisualFlag, on: bool) -> PetResult<()>;
    fn set_topping(&mut self, topping: Topping) -> PetResult<()>;
    fn set_held_item(&mut self, item: Option<HeldItem>) -> PetResult<()>;
    /// Top-left corner in viewport px
    fn move_pet(&mut self, pos: Vec2) -> PetResult<()>;
    fn set_eyes(&mut self, offset: Vec2) -> PetResult<()>;
    fn show_bubble(&mut self, text: &str) -> PetResult<()>;
    fn hide_bubble(&mut self) -> PetResult<()>;
    fn show_menu(&mut self, pos: Vec2) -> PetResult<()>;
    fn hide_menu(&mut self) -> PetResult<()>;
    fn place_scene(&mut self, scene: SceneId, pos: Vec2) -> PetResult<()>;
    fn set_scene_visible(&mut self, scene: SceneId, visible: bool) -> PetResult<()>;
    fn set_stats(&mut self, mood: u8, energy: u8) -> PetResult<()>;
    /// Fill the settings form and ask the host to show it
    fn open_settings(&mut self, name: &str, settings: &Settings) -> PetResult<()>;
}
