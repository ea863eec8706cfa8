//! Page wiring: listeners, login observer, `showAlert` hook and frame driver
//!
//! Every handler forwards to the shared [`Pet`] and then pokes the
//! [`FrameDriver`], which ticks the core and arms either an animation frame
//! (while something moves) or a single timeout for the next pending timer.
//! With nothing moving and no timers pending the driver simply stops.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CustomEvent, Element, Event, EventTarget, HtmlElement, MouseEvent, MutationObserver,
    MutationObserverInit, Node, TouchEvent, Window,
};

use crate::core::clock;
use crate::domain::geometry::Vec2;
use crate::host::dom::{MENU_ID, PET_ID};
use crate::pet::facade::TickResult;
use crate::pet::Pet;
use crate::systems::input::{PointerButton, PointerKind};

pub const MAIN_CONTAINER_ID: &str = "mainContainer";
pub const ACTION_ATTR: &str = "data-pet-action";
pub const SAVE_BUTTON_ID: &str = "toastPetSaveSettings";
/// Dispatched on `window` after the `summary` action; the page fetches counts
/// and answers with `pet.deliver_summary(json)` or `pet.fail_summary(reason)`
pub const SUMMARY_REQUEST_EVENT: &str = "toast-pet-summary-request";
pub const NOTIFICATION_EVENT: &str = "system-notification";

const GLOBAL_HOOKS: [&str; 3] = ["petSay", "petMood", "petAction"];

// === Frame driver ===

struct FrameDriver {
    pet: Pet,
    window: Window,
    raf_id: Option<i32>,
    timeout_id: Option<i32>,
    on_frame: Option<Closure<dyn FnMut(f64)>>,
    on_timeout: Option<Closure<dyn FnMut()>>,
    stopped: bool,
}

impl FrameDriver {
    fn new(pet: Pet, window: Window) -> Rc<RefCell<Self>> {
        let driver = Rc::new(RefCell::new(Self {
            pet,
            window,
            raf_id: None,
            timeout_id: None,
            on_frame: None,
            on_timeout: None,
            stopped: false,
        }));

        let weak = Rc::downgrade(&driver);
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
            if let Some(d) = weak.upgrade() {
                if let Ok(mut inner) = d.try_borrow_mut() {
                    inner.raf_id = None;
                }
                poke(&d);
            }
        });
        let weak = Rc::downgrade(&driver);
        let on_timeout = Closure::<dyn FnMut()>::new(move || {
            if let Some(d) = weak.upgrade() {
                if let Ok(mut inner) = d.try_borrow_mut() {
                    inner.timeout_id = None;
                }
                poke(&d);
            }
        });

        if let Ok(mut inner) = driver.try_borrow_mut() {
            inner.on_frame = Some(on_frame);
            inner.on_timeout = Some(on_timeout);
        }
        driver
    }

    fn arm(&mut self, report: TickResult) {
        if let Some(id) = self.timeout_id.take() {
            self.window.clear_timeout_with_handle(id);
        }

        if report.needs_frame() {
            // Frames fire due timers too, so no timeout is needed meanwhile
            if self.raf_id.is_none() {
                if let Some(cb) = &self.on_frame {
                    self.raf_id = self.window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
                }
            }
            return;
        }

        if report.next_deadline() >= 0.0 {
            let delay = (report.next_deadline() - clock::now_ms()).max(0.0).ceil() as i32;
            if let Some(cb) = &self.on_timeout {
                self.timeout_id = self
                    .window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay)
                    .ok();
            }
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some(id) = self.timeout_id.take() {
            self.window.clear_timeout_with_handle(id);
        }
        self.on_frame = None;
        self.on_timeout = None;
    }
}

/// Tick now and re-arm
fn poke(driver: &Rc<RefCell<FrameDriver>>) {
    let Ok(mut d) = driver.try_borrow_mut() else {
        return;
    };
    if d.stopped {
        return;
    }
    match d.pet.tick(clock::now_ms()) {
        Ok(report) => d.arm(report),
        Err(e) => pet_warn!("tick skipped: {:?}", e),
    }
}

// === Listeners ===

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, kind: &'static str, closure: Closure<dyn FnMut(Event)>) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, closure })
    }

    /// Non-passive, so the handler may cancel scrolling
    fn attach_active(target: &EventTarget, kind: &'static str, closure: Closure<dyn FnMut(Event)>) -> Result<Self, JsValue> {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), kind, closure })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Wrap a handler so it runs against the pet, logs failures and pokes the driver
fn handler<F>(pet: &Pet, driver: &Rc<RefCell<FrameDriver>>, mut f: F) -> Closure<dyn FnMut(Event)>
where
    F: FnMut(&Pet, &Event, f64) -> Result<(), JsValue> + 'static,
{
    let pet = pet.clone();
    let weak: Weak<RefCell<FrameDriver>> = Rc::downgrade(driver);
    Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Err(e) = f(&pet, &event, clock::now_ms()) {
            pet_warn!("pet event '{}' failed: {:?}", event.type_(), e);
        }
        if let Some(d) = weak.upgrade() {
            poke(&d);
        }
    })
}

fn mouse_point(event: &Event) -> Option<(Vec2, i16)> {
    let m = event.dyn_ref::<MouseEvent>()?;
    Some((Vec2::new(m.client_x() as f64, m.client_y() as f64), m.button()))
}

/// First active touch, or the lifted one on `touchend`
fn touch_point(event: &Event) -> Option<Vec2> {
    let t = event.dyn_ref::<TouchEvent>()?;
    let touch = t.touches().get(0).or_else(|| t.changed_touches().get(0))?;
    Some(Vec2::new(touch.client_x() as f64, touch.client_y() as f64))
}

fn event_point(event: &Event) -> Option<Vec2> {
    mouse_point(event).map(|(p, _)| p).or_else(|| touch_point(event))
}

fn contains(container: Option<&HtmlElement>, event: &Event) -> bool {
    let node = event.target().and_then(|t| t.dyn_into::<Node>().ok());
    match (container, node) {
        (Some(c), Some(n)) => c.contains(Some(&n)),
        _ => false,
    }
}

fn lookup(document: &web_sys::Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn is_container_visible(container: &HtmlElement) -> bool {
    container
        .style()
        .get_property_value("display")
        .map(|d| d.trim() != "none")
        .unwrap_or(true)
}

fn detail_string(detail: &JsValue, key: &str) -> String {
    js_sys::Reflect::get(detail, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

fn request_summary(window: &Window) -> Result<(), JsValue> {
    let event = CustomEvent::new(SUMMARY_REQUEST_EVENT)?;
    window.dispatch_event(&event)?;
    Ok(())
}

// === Handle ===

/// A mounted pet. Dropping it without `unmount` leaves the listeners attached.
#[wasm_bindgen]
pub struct PetHandle {
    pet: Pet,
    driver: Rc<RefCell<FrameDriver>>,
    listeners: Vec<Listener>,
    observer: Option<MutationObserver>,
    observer_cb: Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>,
    original_alert: Option<js_sys::Function>,
    alert_hook: Option<Closure<dyn FnMut(JsValue, JsValue)>>,
    global_hooks: Vec<Closure<dyn FnMut(JsValue, JsValue) -> JsValue>>,
}

#[wasm_bindgen]
impl PetHandle {
    #[wasm_bindgen(getter)]
    pub fn pet(&self) -> Pet {
        self.pet.clone()
    }

    /// Detach everything, restore `showAlert` and hide the pet
    pub fn unmount(&mut self) {
        for l in self.listeners.drain(..) {
            l.detach();
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.observer_cb = None;

        if let Some(window) = web_sys::window() {
            if let Some(original) = self.original_alert.take() {
                let _ = js_sys::Reflect::set(&window, &JsValue::from_str("showAlert"), &original);
            }
            for name in GLOBAL_HOOKS {
                let _ = js_sys::Reflect::delete_property(&window, &JsValue::from_str(name));
            }
        }
        self.alert_hook = None;
        self.global_hooks.clear();

        if let Ok(mut d) = self.driver.try_borrow_mut() {
            d.stop();
        }
        if let Err(e) = self.pet.set_logged_in(false) {
            pet_warn!("unmount: {:?}", e);
        }
        pet_log!("pet unmounted");
    }
}

/// Create the pet, wire the page and show it once the main container is visible
#[wasm_bindgen]
pub fn mount_pet() -> Result<PetHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let pet = Pet::new()?;
    let driver = FrameDriver::new(pet.clone(), window.clone());

    let pet_el = lookup(&document, PET_ID).ok_or_else(|| JsValue::from_str("missing #toast-pet"))?;
    let menu_el = lookup(&document, MENU_ID);
    let pet_target: &EventTarget = pet_el.as_ref();
    let doc_target: &EventTarget = document.as_ref();
    let win_target: &EventTarget = window.as_ref();

    let mut listeners = Vec::new();

    // Press on the pet
    listeners.push(Listener::attach(
        pet_target,
        "mousedown",
        handler(&pet, &driver, |pet, event, now| {
            let Some((at, button)) = mouse_point(event) else {
                return Ok(());
            };
            event.prevent_default();
            pet.borrow()?.pointer_down(PointerKind::Mouse, PointerButton::from_code(button), at, now);
            Ok(())
        }),
    )?);
    listeners.push(Listener::attach(
        pet_target,
        "touchstart",
        handler(&pet, &driver, |pet, event, now| {
            if let Some(at) = touch_point(event) {
                pet.borrow()?.pointer_down(PointerKind::Touch, PointerButton::Primary, at, now);
            }
            Ok(())
        }),
    )?);

    // Movement and release anywhere on the page
    for kind in ["mousemove", "touchmove"] {
        listeners.push(Listener::attach_active(
            doc_target,
            kind,
            handler(&pet, &driver, |pet, event, now| {
                if let Some(at) = event_point(event) {
                    pet.borrow()?.pointer_move(at, now);
                }
                if pet.dragging() {
                    event.prevent_default();
                }
                Ok(())
            }),
        )?);
    }
    // touchcancel fires when the browser takes the gesture over
    for kind in ["mouseup", "touchend", "touchcancel"] {
        listeners.push(Listener::attach(
            doc_target,
            kind,
            handler(&pet, &driver, |pet, event, now| {
                let at = event_point(event).unwrap_or_else(Vec2::zero);
                pet.borrow()?.pointer_up(at, now);
                Ok(())
            }),
        )?);
    }

    // Clicks
    listeners.push(Listener::attach(
        pet_target,
        "click",
        handler(&pet, &driver, |pet, _event, now| {
            pet.borrow()?.click(now);
            Ok(())
        }),
    )?);
    listeners.push(Listener::attach(
        pet_target,
        "dblclick",
        handler(&pet, &driver, |pet, _event, now| {
            pet.borrow()?.double_click(now);
            Ok(())
        }),
    )?);
    listeners.push(Listener::attach(
        pet_target,
        "contextmenu",
        handler(&pet, &driver, |pet, event, now| {
            event.prevent_default();
            pet.borrow()?.context_menu(now);
            Ok(())
        }),
    )?);
    {
        let pet_el = pet_el.clone();
        let menu_el = menu_el.clone();
        listeners.push(Listener::attach(
            doc_target,
            "click",
            handler(&pet, &driver, move |pet, event, _now| {
                let inside_pet = contains(Some(&pet_el), event);
                let inside_menu = contains(menu_el.as_ref(), event);
                pet.borrow()?.document_click(inside_pet, inside_menu);
                Ok(())
            }),
        )?);
    }

    // Menu items carry their action name
    if let Some(menu) = &menu_el {
        let window = window.clone();
        let menu_target: &EventTarget = menu.as_ref();
        listeners.push(Listener::attach(
            menu_target,
            "click",
            handler(&pet, &driver, move |pet, event, _now| {
                let item = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(&format!("[{}]", ACTION_ATTR)).ok().flatten());
                let Some(action) = item.and_then(|el| el.get_attribute(ACTION_ATTR)) else {
                    return Ok(());
                };
                event.stop_propagation();
                if pet.perform_action(&action)? == "fetch-summary" {
                    request_summary(&window)?;
                }
                Ok(())
            }),
        )?);
    }

    listeners.push(Listener::attach(
        win_target,
        "resize",
        handler(&pet, &driver, |pet, _event, _now| pet.measure()),
    )?);

    listeners.push(Listener::attach(
        win_target,
        NOTIFICATION_EVENT,
        handler(&pet, &driver, |pet, event, _now| {
            let Some(custom) = event.dyn_ref::<CustomEvent>() else {
                return Ok(());
            };
            let detail = custom.detail();
            let message = detail_string(&detail, "message");
            let kind = detail_string(&detail, "type");
            pet.notify(&message, &kind)?;
            Ok(())
        }),
    )?);

    if let Some(save) = document.get_element_by_id(SAVE_BUTTON_ID) {
        let save_target: &EventTarget = save.as_ref();
        listeners.push(Listener::attach(
            save_target,
            "click",
            handler(&pet, &driver, |pet, _event, _now| pet.save_settings_from_form()),
        )?);
    }

    let (original_alert, alert_hook) = hook_show_alert(&window, &pet, &driver)?;
    let global_hooks = install_global_hooks(&window, &pet, &driver)?;
    let (observer, observer_cb) = observe_login(&document, &pet, &driver)?;

    pet_log!("pet mounted with {} listeners", listeners.len());
    Ok(PetHandle {
        pet,
        driver,
        listeners,
        observer,
        observer_cb,
        original_alert,
        alert_hook,
        global_hooks,
    })
}

/// Replace `window.showAlert` with a wrapper that also notifies the pet
fn hook_show_alert(
    window: &Window,
    pet: &Pet,
    driver: &Rc<RefCell<FrameDriver>>,
) -> Result<(Option<js_sys::Function>, Option<Closure<dyn FnMut(JsValue, JsValue)>>), JsValue> {
    let key = JsValue::from_str("showAlert");
    let Ok(original) = js_sys::Reflect::get(window, &key)?.dyn_into::<js_sys::Function>() else {
        return Ok((None, None));
    };

    let pet = pet.clone();
    let weak = Rc::downgrade(driver);
    let inner = original.clone();
    let hook = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |message: JsValue, kind: JsValue| {
        if let Err(e) = inner.call2(&JsValue::NULL, &message, &kind) {
            pet_warn!("showAlert failed: {:?}", e);
        }
        let message = message.as_string().unwrap_or_default();
        let kind = kind.as_string().unwrap_or_else(|| "success".to_string());
        if let Err(e) = pet.notify(&message, &kind) {
            pet_warn!("notification skipped: {:?}", e);
        }
        if let Some(d) = weak.upgrade() {
            poke(&d);
        }
    });
    js_sys::Reflect::set(window, &key, hook.as_ref())?;
    Ok((Some(original), Some(hook)))
}

/// `petSay(text, ms)`, `petMood(state)` and `petAction(name)` for page scripts
fn install_global_hooks(
    window: &Window,
    pet: &Pet,
    driver: &Rc<RefCell<FrameDriver>>,
) -> Result<Vec<Closure<dyn FnMut(JsValue, JsValue) -> JsValue>>, JsValue> {
    type Hook = Box<dyn Fn(&Pet, JsValue, JsValue) -> Result<JsValue, JsValue>>;
    let hooks: [(&str, Hook); 3] = [
        (
            "petSay",
            Box::new(|pet, text, ms| {
                let text = text.as_string().unwrap_or_default();
                Ok(JsValue::from_bool(pet.say(&text, ms.as_f64())?))
            }),
        ),
        (
            "petMood",
            Box::new(|pet, state, _| {
                let state = state.as_string().unwrap_or_default();
                Ok(JsValue::from_bool(pet.express(&state)?))
            }),
        ),
        (
            "petAction",
            Box::new(|pet, action, _| {
                let action = action.as_string().unwrap_or_default();
                let outcome = pet.perform_action(&action)?;
                if outcome == "fetch-summary" {
                    if let Some(window) = web_sys::window() {
                        request_summary(&window)?;
                    }
                }
                Ok(JsValue::from_str(&outcome))
            }),
        ),
    ];

    let mut installed = Vec::with_capacity(hooks.len());
    for (name, hook) in hooks {
        let pet = pet.clone();
        let weak = Rc::downgrade(driver);
        let closure = Closure::<dyn FnMut(JsValue, JsValue) -> JsValue>::new(move |a: JsValue, b: JsValue| {
            let result = hook(&pet, a, b).unwrap_or_else(|e| {
                pet_warn!("page hook failed: {:?}", e);
                JsValue::FALSE
            });
            if let Some(d) = weak.upgrade() {
                poke(&d);
            }
            result
        });
        js_sys::Reflect::set(window, &JsValue::from_str(name), closure.as_ref())?;
        installed.push(closure);
    }
    Ok(installed)
}

/// Follow `#mainContainer`'s inline display to show or hide the pet
fn observe_login(
    document: &web_sys::Document,
    pet: &Pet,
    driver: &Rc<RefCell<FrameDriver>>,
) -> Result<(Option<MutationObserver>, Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>), JsValue> {
    let Some(container) = lookup(document, MAIN_CONTAINER_ID) else {
        // No login gate on this page
        pet.set_logged_in(true)?;
        poke(driver);
        return Ok((None, None));
    };

    let sync = {
        let pet = pet.clone();
        let container = container.clone();
        let weak = Rc::downgrade(driver);
        move || {
            if let Err(e) = pet.set_logged_in(is_container_visible(&container)) {
                pet_warn!("login sync skipped: {:?}", e);
            }
            if let Some(d) = weak.upgrade() {
                poke(&d);
            }
        }
    };
    sync();

    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |_records: js_sys::Array, _observer: MutationObserver| sync(),
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("style")));
    let target: &Node = container.as_ref();
    observer.observe_with_options(target, &init)?;
    Ok((Some(observer), Some(callback)))
}
