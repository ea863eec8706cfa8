//! `PetView` over the real page
//!
//! Elements are looked up once at construction; a missing node turns every
//! call that needs it into `PetError::MissingElement` instead of a panic.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::domain::errors::{PetError, PetResult};
use crate::domain::geometry::{Size, Vec2};
use crate::domain::scene::SceneId;
use crate::domain::settings::{Settings, SettingsUpdate};
use crate::domain::state::PetStateKind;
use crate::domain::topping::{HeldItem, Topping};

use super::view::{PetView, VisualFlag};

pub const PET_ID: &str = "toast-pet";
pub const BUBBLE_ID: &str = "toastPetBubble";
pub const BUBBLE_TEXT_ID: &str = "toastPetBubbleText";
pub const MENU_ID: &str = "toast-pet-menu";
pub const STATUS_ID: &str = "toastPetStatus";
pub const HELD_ID: &str = "toastPetHeldItem";
pub const MOOD_ID: &str = "toastPetMood";
pub const ENERGY_ID: &str = "toastPetEnergy";
pub const SETTINGS_MODAL_ID: &str = "toastPetSettingsModal";

pub const FORM_NAME_ID: &str = "toastPetNameInput";
pub const FORM_POSITION_ID: &str = "toastPetPositionSelect";
pub const FORM_FREQ_ID: &str = "toastPetInteractionFreq";
pub const FORM_SOUND_ID: &str = "toastPetSoundEnabled";
pub const FORM_NOTIFY_ID: &str = "toastPetNotifyEnabled";
pub const FORM_AUTO_SLEEP_ID: &str = "toastPetAutoSleep";
pub const FORM_AUTO_ACTIVITY_ID: &str = "toastPetAutoActivity";
pub const FORM_PHYSICS_ID: &str = "toastPetPhysicsEnabled";

/// Fired on `window` when the settings form has been filled
pub const OPEN_SETTINGS_EVENT: &str = "toast-pet-open-settings";

const SHOW_CLASS: &str = "show";

fn scene_element_id(scene: SceneId) -> &'static str {
    match scene {
        SceneId::Bathtub => "toastPetBathtub",
        SceneId::Toaster => "toastPetToaster",
        SceneId::Bush => "toastPetBush",
    }
}

fn lookup(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn need<'a>(el: &'a Option<HtmlElement>, id: &str) -> PetResult<&'a HtmlElement> {
    el.as_ref().ok_or_else(|| PetError::MissingElement(id.to_string()))
}

fn set_px(el: &HtmlElement, left: f64, top: f64) -> PetResult<()> {
    let style = el.style();
    style.set_property("left", &format!("{}px", left))?;
    style.set_property("top", &format!("{}px", top))?;
    style.set_property("right", "auto")?;
    style.set_property("bottom", "auto")?;
    Ok(())
}

fn toggle_class(el: &HtmlElement, class: &str, on: bool) -> PetResult<()> {
    el.class_list().toggle_with_force(class, on)?;
    Ok(())
}

pub struct DomView {
    document: Document,
    pet: Option<HtmlElement>,
    bubble: Option<HtmlElement>,
    bubble_text: Option<HtmlElement>,
    menu: Option<HtmlElement>,
    status: Option<HtmlElement>,
    held: Option<HtmlElement>,
    mood: Option<HtmlElement>,
    energy: Option<HtmlElement>,
    scenes: [Option<HtmlElement>; 3],
}

impl DomView {
    pub fn new(document: Document) -> Self {
        let scenes = SceneId::ALL.map(|s| lookup(&document, scene_element_id(s)));
        Self {
            pet: lookup(&document, PET_ID),
            bubble: lookup(&document, BUBBLE_ID),
            bubble_text: lookup(&document, BUBBLE_TEXT_ID),
            menu: lookup(&document, MENU_ID),
            status: lookup(&document, STATUS_ID),
            held: lookup(&document, HELD_ID),
            mood: lookup(&document, MOOD_ID),
            energy: lookup(&document, ENERGY_ID),
            scenes,
            document,
        }
    }

    /// The pet element is the one node the engine cannot work without
    pub fn pet_element(&self) -> PetResult<&HtmlElement> {
        need(&self.pet, PET_ID)
    }

    pub fn menu_element(&self) -> Option<&HtmlElement> {
        self.menu.as_ref()
    }

    /// Rendered size of the pet element
    pub fn pet_size(&self) -> PetResult<Size> {
        let pet = self.pet_element()?;
        Ok(Size::new(pet.offset_width() as f64, pet.offset_height() as f64))
    }

    /// Where the page's CSS placed the pet before the engine took over
    pub fn pet_client_pos(&self) -> PetResult<Vec2> {
        let rect = self.pet_element()?.get_bounding_client_rect();
        Ok(Vec2::new(rect.left(), rect.top()))
    }

    fn input(&self, id: &str) -> PetResult<HtmlInputElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .ok_or_else(|| PetError::MissingElement(id.to_string()))
    }

    fn select(&self, id: &str) -> PetResult<HtmlSelectElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .ok_or_else(|| PetError::MissingElement(id.to_string()))
    }

    /// Checkboxes added after the first release may be absent from older pages
    fn checkbox_or(&self, id: &str, fallback: bool) -> bool {
        self.input(id).map(|i| i.checked()).unwrap_or(fallback)
    }

    /// Read the submitted settings form
    pub fn read_settings_form(&self, current: &Settings) -> PetResult<SettingsUpdate> {
        let name = self.input(FORM_NAME_ID)?.value();
        let position = self.select(FORM_POSITION_ID)?.value().parse()?;
        let interaction_freq = self.select(FORM_FREQ_ID)?.value().parse()?;
        Ok(SettingsUpdate {
            name,
            settings: Settings {
                position,
                interaction_freq,
                sound_enabled: self.checkbox_or(FORM_SOUND_ID, current.sound_enabled),
                notify_enabled: self.checkbox_or(FORM_NOTIFY_ID, current.notify_enabled),
                auto_sleep: self.checkbox_or(FORM_AUTO_SLEEP_ID, current.auto_sleep),
                auto_activity: self.checkbox_or(FORM_AUTO_ACTIVITY_ID, current.auto_activity),
                physics_enabled: self.checkbox_or(FORM_PHYSICS_ID, current.physics_enabled),
            },
        })
    }
}

impl PetView for DomView {
    fn set_visible(&mut self, visible: bool) -> PetResult<()> {
        let pet = need(&self.pet, PET_ID)?;
        pet.style().set_property("display", if visible { "" } else { "none" })?;
        Ok(())
    }

    fn set_state_class(&mut self, state: PetStateKind) -> PetResult<()> {
        let classes = need(&self.pet, PET_ID)?.class_list();
        for s in PetStateKind::ALL {
            classes.remove_1(s.css_class())?;
        }
        classes.add_1(state.css_class())?;
        Ok(())
    }

    fn set_flag(&mut self, flag: VisualFlag, on: bool) -> PetResult<()> {
        let el = match flag {
            VisualFlag::StatusIndicator => need(&self.status, STATUS_ID)?,
            _ => need(&self.pet, PET_ID)?,
        };
        toggle_class(el, flag.css_class(), on)
    }

    fn set_topping(&mut self, topping: Topping) -> PetResult<()> {
        let classes = need(&self.pet, PET_ID)?.class_list();
        for t in Topping::ALL {
            classes.remove_1(t.css_class())?;
        }
        classes.add_1(topping.css_class())?;
        Ok(())
    }

    fn set_held_item(&mut self, item: Option<HeldItem>) -> PetResult<()> {
        let held = need(&self.held, HELD_ID)?;
        let classes = held.class_list();
        for f in HeldItem::FRUITS {
            classes.remove_1(f.css_class())?;
        }
        match item {
            Some(f) => {
                classes.add_1(f.css_class())?;
                held.set_text_content(Some(f.emoji()));
            }
            None => held.set_text_content(None),
        }
        toggle_class(held, SHOW_CLASS, item.is_some())
    }

    fn move_pet(&mut self, pos: Vec2) -> PetResult<()> {
        set_px(need(&self.pet, PET_ID)?, pos.x, pos.y)
    }

    fn set_eyes(&mut self, offset: Vec2) -> PetResult<()> {
        let pupils = need(&self.pet, PET_ID)?.query_selector_all(".pet-pupil")?;
        let transform = format!("translate(calc(-50% + {}px), calc(-50% + {}px))", offset.x, offset.y);
        for i in 0..pupils.length() {
            if let Some(pupil) = pupils.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                pupil.style().set_property("transform", &transform)?;
            }
        }
        Ok(())
    }

    fn show_bubble(&mut self, text: &str) -> PetResult<()> {
        need(&self.bubble_text, BUBBLE_TEXT_ID)?.set_text_content(Some(text));
        toggle_class(need(&self.bubble, BUBBLE_ID)?, SHOW_CLASS, true)
    }

    fn hide_bubble(&mut self) -> PetResult<()> {
        toggle_class(need(&self.bubble, BUBBLE_ID)?, SHOW_CLASS, false)
    }

    fn show_menu(&mut self, pos: Vec2) -> PetResult<()> {
        let menu = need(&self.menu, MENU_ID)?;
        set_px(menu, pos.x, pos.y)?;
        toggle_class(menu, SHOW_CLASS, true)
    }

    fn hide_menu(&mut self) -> PetResult<()> {
        toggle_class(need(&self.menu, MENU_ID)?, SHOW_CLASS, false)
    }

    fn place_scene(&mut self, scene: SceneId, pos: Vec2) -> PetResult<()> {
        set_px(need(&self.scenes[scene.index()], scene_element_id(scene))?, pos.x, pos.y)
    }

    fn set_scene_visible(&mut self, scene: SceneId, visible: bool) -> PetResult<()> {
        toggle_class(need(&self.scenes[scene.index()], scene_element_id(scene))?, SHOW_CLASS, visible)
    }

    fn set_stats(&mut self, mood: u8, energy: u8) -> PetResult<()> {
        need(&self.mood, MOOD_ID)?.set_text_content(Some(&mood.to_string()));
        need(&self.energy, ENERGY_ID)?.set_text_content(Some(&energy.to_string()));
        Ok(())
    }

    fn open_settings(&mut self, name: &str, settings: &Settings) -> PetResult<()> {
        self.input(FORM_NAME_ID)?.set_value(name);
        self.select(FORM_POSITION_ID)?.set_value(settings.position.key());
        self.select(FORM_FREQ_ID)?.set_value(settings.interaction_freq.key());
        for (id, on) in [
            (FORM_SOUND_ID, settings.sound_enabled),
            (FORM_NOTIFY_ID, settings.notify_enabled),
            (FORM_AUTO_SLEEP_ID, settings.auto_sleep),
            (FORM_AUTO_ACTIVITY_ID, settings.auto_activity),
            (FORM_PHYSICS_ID, settings.physics_enabled),
        ] {
            if let Ok(input) = self.input(id) {
                input.set_checked(on);
            }
        }

        let window = web_sys::window().ok_or_else(|| PetError::Js("no window".into()))?;
        let event = web_sys::CustomEvent::new(OPEN_SETTINGS_EVENT)?;
        window.dispatch_event(&event)?;
        if let Some(modal) = lookup(&self.document, SETTINGS_MODAL_ID) {
            modal.set_attribute("data-pet-open", "true")?;
        }
        Ok(())
    }
}
