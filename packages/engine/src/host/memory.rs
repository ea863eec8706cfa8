use std::collections::{HashMap, HashSet};

use crate::domain::errors::{PetError, PetResult};
use crate::domain::geometry::Vec2;
use crate::domain::scene::SceneId;
use crate::domain::settings::Settings;
use crate::domain::state::PetStateKind;
use crate::domain::topping::{HeldItem, Topping};

use super::store::SettingsStore;
use super::view::{PetView, VisualFlag};

/// One call into the view, in order
#[derive(Clone, Debug, PartialEq)]
pub enum ViewCall {
    Visible(bool),
    State(PetStateKind),
    Flag(VisualFlag, bool),
    Topping(Topping),
    Held(Option<HeldItem>),
    Move(Vec2),
    Eyes(Vec2),
    Bubble(String),
    HideBubble,
    Menu(Vec2),
    HideMenu,
    PlaceScene(SceneId, Vec2),
    SceneVisible(SceneId, bool),
    Stats(u8, u8),
    OpenSettings(String),
}

/// Headless view: keeps the latest value of everything plus a call log.
/// Element names listed in `missing` fail like absent DOM nodes.
#[derive(Clone, Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub visible: bool,
    pub state: Option<PetStateKind>,
    pub flags: HashSet<VisualFlag>,
    pub topping: Topping,
    pub held: Option<HeldItem>,
    pub pos: Vec2,
    pub eyes: Vec2,
    pub bubble: Option<String>,
    pub menu: Option<Vec2>,
    pub scenes: HashMap<SceneId, Vec2>,
    pub visible_scenes: HashSet<SceneId>,
    pub stats: (u8, u8),
    pub settings_opened: u32,
    pub missing: HashSet<&'static str>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every bubble text shown so far
    pub fn bubbles(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::Bubble(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every state class set so far
    pub fn states(&self) -> Vec<PetStateKind> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::State(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn has_flag(&self, flag: VisualFlag) -> bool {
        self.flags.contains(&flag)
    }

    fn check(&self, element: &'static str) -> PetResult<()> {
        if self.missing.contains(element) {
            return Err(PetError::MissingElement(element.to_string()));
        }
        Ok(())
    }

    fn record(&mut self, element: &'static str, call: ViewCall) -> PetResult<()> {
        self.check(element)?;
        self.calls.push(call);
        Ok(())
    }
}

impl PetView for RecordingView {
    fn set_visible(&mut self, visible: bool) -> PetResult<()> {
        self.record("pet", ViewCall::Visible(visible))?;
        self.visible = visible;
        Ok(())
    }

    fn set_state_class(&mut self, state: PetStateKind) -> PetResult<()> {
        self.record("pet", ViewCall::State(state))?;
        self.state = Some(state);
        Ok(())
    }

    fn set_flag(&mut self, flag: VisualFlag, on: bool) -> PetResult<()> {
        let element = if flag == VisualFlag::StatusIndicator { "status" } else { "pet" };
        self.record(element, ViewCall::Flag(flag, on))?;
        if on {
            self.flags.insert(flag);
        } else {
            self.flags.remove(&flag);
        }
        Ok(())
    }

    fn set_topping(&mut self, topping: Topping) -> PetResult<()> {
        self.record("pet", ViewCall::Topping(topping))?;
        self.topping = topping;
        Ok(())
    }

    fn set_held_item(&mut self, item: Option<HeldItem>) -> PetResult<()> {
        self.record("held", ViewCall::Held(item))?;
        self.held = item;
        Ok(())
    }

    fn move_pet(&mut self, pos: Vec2) -> PetResult<()> {
        self.record("pet", ViewCall::Move(pos))?;
        self.pos = pos;
        Ok(())
    }

    fn set_eyes(&mut self, offset: Vec2) -> PetResult<()> {
        self.record("eyes", ViewCall::Eyes(offset))?;
        self.eyes = offset;
        Ok(())
    }

    fn show_bubble(&mut self, text: &str) -> PetResult<()> {
        self.record("bubble", ViewCall::Bubble(text.to_string()))?;
        self.bubble = Some(text.to_string());
        Ok(())
    }

    fn hide_bubble(&mut self) -> PetResult<()> {
        self.record("bubble", ViewCall::HideBubble)?;
        self.bubble = None;
        Ok(())
    }

    fn show_menu(&mut self, pos: Vec2) -> PetResult<()> {
        self.record("menu", ViewCall::Menu(pos))?;
        self.menu = Some(pos);
        Ok(())
    }

    fn hide_menu(&mut self) -> PetResult<()> {
        self.record("menu", ViewCall::HideMenu)?;
        self.menu = None;
        Ok(())
    }

    fn place_scene(&mut self, scene: SceneId, pos: Vec2) -> PetResult<()> {
        self.record("scene", ViewCall::PlaceScene(scene, pos))?;
        self.scenes.insert(scene, pos);
        Ok(())
    }

    fn set_scene_visible(&mut self, scene: SceneId, visible: bool) -> PetResult<()> {
        self.record("scene", ViewCall::SceneVisible(scene, visible))?;
        if visible {
            self.visible_scenes.insert(scene);
        } else {
            self.visible_scenes.remove(&scene);
        }
        Ok(())
    }

    fn set_stats(&mut self, mood: u8, energy: u8) -> PetResult<()> {
        self.record("stats", ViewCall::Stats(mood, energy))?;
        self.stats = (mood, energy);
        Ok(())
    }

    fn open_settings(&mut self, name: &str, _settings: &Settings) -> PetResult<()> {
        self.record("settings", ViewCall::OpenSettings(name.to_string()))?;
        self.settings_opened += 1;
        Ok(())
    }
}

/// `HashMap`-backed store; `fail_writes` simulates a full or blocked storage
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub entries: HashMap<String, String>,
    pub fail_writes: bool,
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> PetResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> PetResult<()> {
        if self.fail_writes {
            return Err(PetError::Storage("quota exceeded".into()));
        }
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PetResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_elements_fail_without_recording() {
        let mut v = RecordingView::new();
        v.missing.insert("bubble");
        assert!(matches!(v.show_bubble("hi"), Err(PetError::MissingElement(_))));
        assert!(v.calls.is_empty());
        v.move_pet(Vec2::new(1.0, 2.0)).unwrap();
        assert_eq!(v.pos, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn store_round_trip_and_failures() {
        let mut s = MemoryStore::new();
        s.save("k", "v").unwrap();
        assert_eq!(s.load("k").unwrap().as_deref(), Some("v"));
        s.fail_writes = true;
        assert!(s.save("k", "w").is_err());
        s.remove("k").unwrap();
        assert_eq!(s.load("k").unwrap(), None);
    }
}
