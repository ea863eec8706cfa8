use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::core::clock;
use crate::domain::actions::SummaryCounts;
use crate::domain::config::EngineConfig;
use crate::domain::geometry::Size;
use crate::domain::state::PetStateKind;
use crate::host::{DomView, LocalStorageStore};

use super::{PetCore, TickReport};

pub(crate) type DomCore = PetCore<DomView, LocalStorageStore>;

/// Scheduling hint returned from `Pet::tick`
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct TickResult {
    needs_frame: bool,
    next_deadline: f64,
}

#[wasm_bindgen]
impl TickResult {
    #[wasm_bindgen(getter)]
    pub fn needs_frame(&self) -> bool { self.needs_frame }

    /// Earliest pending timer in `performance.now()` ms, or -1 when idle
    #[wasm_bindgen(getter)]
    pub fn next_deadline(&self) -> f64 { self.next_deadline }
}

impl From<TickReport> for TickResult {
    fn from(report: TickReport) -> Self {
        Self {
            needs_frame: report.needs_frame,
            next_deadline: report.next_deadline.unwrap_or(-1.0),
        }
    }
}

/// JS handle over the page-bound pet. Clones share one core.
#[wasm_bindgen]
#[derive(Clone)]
pub struct Pet {
    core: Rc<RefCell<DomCore>>,
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
impl Pet {
    /// Bind to the current document, load the saved pet and measure the page
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Pet, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let view = DomView::new(document);
        view.pet_element().map_err(js_err)?;
        let store = LocalStorageStore::new().map_err(js_err)?;

        let mut core = PetCore::new(view, store);
        core.mount();
        let pet = Pet { core: Rc::new(RefCell::new(core)) };
        pet.measure()?;
        Ok(pet)
    }

    /// Override tuning constants from a JSON object (missing keys keep defaults)
    pub fn configure(&self, json: &str) -> Result<(), JsValue> {
        let config = EngineConfig::from_json(json).map_err(js_err)?;
        self.borrow()?.configure(config);
        Ok(())
    }

    pub fn tick(&self, now_ms: f64) -> Result<TickResult, JsValue> {
        Ok(self.borrow()?.tick(now_ms).into())
    }

    /// Menu / JS action; returns what the host should do next
    pub fn perform_action(&self, name: &str) -> Result<String, JsValue> {
        let outcome = self.borrow()?.perform_action(name, clock::now_ms());
        Ok(outcome.key().to_string())
    }

    pub fn notify(&self, message: &str, kind: &str) -> Result<bool, JsValue> {
        Ok(self.borrow()?.notify(message, kind, clock::now_ms()))
    }

    /// Counts fetched for the `summary` action, as JSON
    pub fn deliver_summary(&self, json: &str) -> Result<(), JsValue> {
        let result = SummaryCounts::from_json(json).map_err(|e| e.to_string());
        self.borrow()?.deliver_summary(result, clock::now_ms());
        Ok(())
    }

    pub fn fail_summary(&self, reason: &str) -> Result<(), JsValue> {
        self.borrow()?.deliver_summary(Err(reason.to_string()), clock::now_ms());
        Ok(())
    }

    pub fn say(&self, text: &str, duration_ms: Option<f64>) -> Result<bool, JsValue> {
        Ok(self.borrow()?.say(text, duration_ms, clock::now_ms()))
    }

    /// Transient mood by CSS name (`happy`, `thinking`, ...)
    pub fn express(&self, state: &str) -> Result<bool, JsValue> {
        let kind = PetStateKind::ALL
            .into_iter()
            .find(|k| k.css_class() == state.trim())
            .ok_or_else(|| JsValue::from_str(&format!("unknown pet state '{}'", state)))?;
        Ok(self.borrow()?.express(kind, clock::now_ms()))
    }

    pub fn set_logged_in(&self, logged_in: bool) -> Result<(), JsValue> {
        self.borrow()?.set_logged_in(logged_in, clock::now_ms());
        Ok(())
    }

    /// Re-read viewport and pet element size
    pub fn measure(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let w = window.inner_width()?.as_f64().unwrap_or(0.0);
        let h = window.inner_height()?.as_f64().unwrap_or(0.0);
        let mut core = self.borrow()?;
        let pet = core.view().pet_size().map_err(js_err)?;
        // Hidden elements measure 0x0; keep the last known size
        let pet = if pet.w > 0.0 && pet.h > 0.0 { pet } else { core.pet_rect().size() };
        core.resize(Size::new(w, h), pet);
        Ok(())
    }

    /// Apply the submitted settings form
    pub fn save_settings_from_form(&self) -> Result<(), JsValue> {
        let mut core = self.borrow()?;
        let update = core.view().read_settings_form(core.settings()).map_err(js_err)?;
        core.apply_settings(update, clock::now_ms());
        Ok(())
    }

    /// A drag is in progress; the page stops touch scrolling while it is
    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.core.try_borrow().map(|c| c.state().is_dragging).unwrap_or(false)
    }

    #[wasm_bindgen(getter)]
    pub fn mood(&self) -> u8 {
        self.core.try_borrow().map(|c| c.state().mood.value()).unwrap_or(0)
    }

    #[wasm_bindgen(getter)]
    pub fn energy(&self) -> u8 {
        self.core.try_borrow().map(|c| c.state().energy.value()).unwrap_or(0)
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.core
            .try_borrow()
            .map(|c| c.state().current.css_class().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.core.try_borrow().map(|c| c.state().name.clone()).unwrap_or_default()
    }
}

impl Pet {
    /// Event handlers never nest, but a reentrant borrow must not panic the page
    pub(crate) fn borrow(&self) -> Result<RefMut<'_, DomCore>, JsValue> {
        self.core
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("pet is busy handling another event"))
    }
}
