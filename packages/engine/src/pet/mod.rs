//! Pet - the state controller tying every system together
//!
//! `PetCore` owns all mutable pet state and is advanced only by host calls:
//! pointer events, actions, notifications and `tick(now_ms)`. It never reads
//! a clock or touches the DOM directly; rendering goes through `PetView` and
//! persistence through `SettingsStore`.
//!
//! Position has exactly one writer at a time, tracked by [`Motion`]. A drag
//! aborts any running activity, activities start only from rest and physics
//! starts only from a drag release, so the fall and the walk never overlap.

use std::collections::HashSet;

use crate::core::random::Rng;
use crate::core::timers::TimerRegistry;
use crate::domain::actions::{Action, ActionOutcome, ActivityKind, SummaryCounts};
use crate::domain::config::EngineConfig;
use crate::domain::errors::PetError;
use crate::domain::geometry::{Rect, Size, Vec2};
use crate::domain::settings::{Settings, SettingsUpdate};
use crate::domain::state::{PetState, PetStateKind};
use crate::host::store::SettingsStore;
use crate::host::view::PetView;
use crate::systems::activity::{ActivityRun, Walk};
use crate::systems::input::{DragTracker, PointerButton, PointerKind};
use crate::systems::physics::{Bounds, PhysicsBody};
use crate::systems::scene::SceneBoard;
use crate::systems::speech::SpeechPresenter;

#[path = "init/init.rs"]
mod init;
#[path = "init/persist.rs"]
mod persist;
#[path = "state/transitions.rs"]
mod transitions;
#[path = "input/pointer_events.rs"]
mod pointer_events;
#[path = "speech/speech.rs"]
mod speech;
#[path = "step/step.rs"]
mod step;
#[path = "step/step_physics.rs"]
mod step_physics;
#[path = "step/step_activity.rs"]
mod step_activity;
#[path = "step/timer_events.rs"]
mod timer_events;
#[path = "commands/actions.rs"]
mod actions;
#[path = "commands/lifecycle.rs"]
mod lifecycle;
pub mod facade;

pub use facade::Pet;

/// Who currently writes the pet's position
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    Resting,
    Dragging,
    Falling(PhysicsBody),
    Walking(Walk),
}

impl Motion {
    pub fn is_resting(&self) -> bool {
        matches!(self, Motion::Resting)
    }

    /// Moving on its own, so the host should keep sending frames
    pub fn is_animating(&self) -> bool {
        matches!(self, Motion::Falling(_) | Motion::Walking(_))
    }
}

/// Everything the pet waits for
#[derive(Clone, Debug, PartialEq)]
pub enum PetTimer {
    /// Return to idle after a transient state
    Dwell(PetStateKind),
    SpeechHide,
    SquashEnd,
    BurntClear,
    IdleActivity,
    AutoTalk,
    AutoSleep,
    StatusDecay,
    SleepRecover,
    TiredSleep,
    Greeting,
    StatusIndicatorHide,
    SummaryReveal,
    /// An activity `Wait` step elapsed
    ActivityResume,
    LongPress,
}

/// What the host should do before calling `tick` again
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// Something is animating; call again next animation frame
    pub needs_frame: bool,
    /// Earliest pending timer, in host milliseconds
    pub next_deadline: Option<f64>,
}

pub struct PetCore<V: PetView, S: SettingsStore> {
    view: V,
    store: S,
    config: EngineConfig,
    settings: Settings,
    state: PetState,
    rng: Rng,
    timers: TimerRegistry<PetTimer>,
    speech: SpeechPresenter,
    scenes: SceneBoard,
    motion: Motion,
    activity: Option<ActivityRun>,
    pointer: Option<DragTracker>,

    // Geometry
    viewport: Option<Size>,
    pet_size: Size,
    pos: Vec2,
    /// Where the user left the pet; `None` means the preset corner
    free_position: Option<Vec2>,
    bounds: Bounds,

    // Bookkeeping
    last_tick_ms: Option<f64>,
    timers_started: bool,
    suppress_click_until: f64,
    pending_summary: Option<String>,
    hour_source: fn() -> u32,
    reported: HashSet<String>,
    /// A newer engine owns the saved record; never overwrite it
    persist_blocked: bool,
}

impl<V: PetView, S: SettingsStore> PetCore<V, S> {
    pub fn new(view: V, store: S) -> Self {
        Self::with_config(view, store, EngineConfig::default(), Rng::from_entropy())
    }

    pub fn with_config(view: V, store: S, config: EngineConfig, rng: Rng) -> Self {
        init::create_core(view, store, config, rng)
    }

    /// Load the saved record and paint the initial (hidden) pet
    pub fn mount(&mut self) {
        init::mount(self);
    }

    /// Swap tuning at runtime
    pub fn configure(&mut self, config: EngineConfig) {
        init::configure(self, config);
    }

    pub fn set_hour_source(&mut self, source: fn() -> u32) {
        self.hour_source = source;
    }

    // === Accessors ===

    pub fn state(&self) -> &PetState { &self.state }

    pub fn settings(&self) -> &Settings { &self.settings }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn motion(&self) -> &Motion { &self.motion }

    pub fn position(&self) -> Vec2 { self.pos }

    pub fn free_position(&self) -> Option<Vec2> { self.free_position }

    pub fn bounds(&self) -> Bounds { self.bounds }

    pub fn pet_rect(&self) -> Rect { Rect::at(self.pos, self.pet_size) }

    pub fn current_activity(&self) -> Option<ActivityKind> {
        self.activity.as_ref().map(|a| a.kind)
    }

    pub fn speech_text(&self) -> Option<&str> { self.speech.current() }

    pub fn timers(&self) -> &TimerRegistry<PetTimer> { &self.timers }

    pub fn view(&self) -> &V { &self.view }

    pub fn view_mut(&mut self) -> &mut V { &mut self.view }

    pub fn store(&self) -> &S { &self.store }

    pub fn store_mut(&mut self) -> &mut S { &mut self.store }

    // === Lifecycle ===

    /// Show or hide the pet following the host's login state
    pub fn set_logged_in(&mut self, logged_in: bool, now_ms: f64) {
        lifecycle::set_logged_in(self, logged_in, now_ms);
    }

    /// Viewport or pet element size changed
    pub fn resize(&mut self, viewport: Size, pet_size: Size) {
        lifecycle::resize(self, viewport, pet_size);
    }

    /// Advance animations and fire due timers
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        step::tick(self, now_ms)
    }

    // === Input ===

    pub fn pointer_down(&mut self, kind: PointerKind, button: PointerButton, at: Vec2, now_ms: f64) {
        pointer_events::pointer_down(self, kind, button, at, now_ms);
    }

    /// Any pointer movement on the page (also drives eye following)
    pub fn pointer_move(&mut self, at: Vec2, now_ms: f64) {
        pointer_events::pointer_move(self, at, now_ms);
    }

    pub fn pointer_up(&mut self, at: Vec2, now_ms: f64) {
        pointer_events::pointer_up(self, at, now_ms);
    }

    pub fn click(&mut self, now_ms: f64) {
        pointer_events::click(self, now_ms);
    }

    pub fn double_click(&mut self, now_ms: f64) {
        pointer_events::double_click(self, now_ms);
    }

    pub fn context_menu(&mut self, now_ms: f64) {
        pointer_events::toggle_menu(self, now_ms);
    }

    /// Click anywhere on the page; closes the menu when outside pet and menu
    pub fn document_click(&mut self, inside_pet: bool, inside_menu: bool) {
        pointer_events::document_click(self, inside_pet, inside_menu);
    }

    pub fn close_menu(&mut self) {
        pointer_events::close_menu(self);
    }

    // === Commands ===

    /// Menu / JS entry point. Unknown names warn and do nothing.
    pub fn perform_action(&mut self, name: &str, now_ms: f64) -> ActionOutcome {
        match name.parse::<Action>() {
            Ok(action) => actions::perform(self, action, now_ms),
            Err(e) => {
                pet_warn!("ignoring pet action: {}", e);
                ActionOutcome::Ignored
            }
        }
    }

    pub fn perform(&mut self, action: Action, now_ms: f64) -> ActionOutcome {
        actions::perform(self, action, now_ms)
    }

    /// Result of the host's summary fetch. Failures become an apology.
    pub fn deliver_summary(&mut self, result: Result<SummaryCounts, String>, now_ms: f64) {
        actions::deliver_summary(self, result, now_ms);
    }

    /// Host alert (`showAlert(message, type)` or `system-notification`)
    pub fn notify(&mut self, message: &str, kind: &str, now_ms: f64) -> bool {
        actions::notify(self, message, kind, now_ms)
    }

    pub fn apply_settings(&mut self, update: SettingsUpdate, now_ms: f64) {
        actions::apply_settings(self, update, now_ms);
    }

    /// Start an autonomous activity if the pet is free; used by the idle timer
    pub fn try_autonomous_activity(&mut self, now_ms: f64) -> bool {
        step_activity::try_autonomous(self, now_ms)
    }

    /// Speak arbitrary text (host `petSay`)
    pub fn say(&mut self, text: &str, duration_ms: Option<f64>, now_ms: f64) -> bool {
        let duration = duration_ms.unwrap_or(self.config.speech.default_ms);
        speech::say_text(self, text, None, duration, now_ms)
    }

    /// Show a transient state (host `petMood`). Activity states are refused.
    pub fn express(&mut self, state: PetStateKind, now_ms: f64) -> bool {
        actions::express(self, state, now_ms)
    }

    pub fn hour_now(&self) -> u32 {
        (self.hour_source)()
    }

    // === Internal helpers ===

    /// Run a view call; failures are logged once per distinct error
    fn paint<F>(&mut self, f: F)
    where
        F: FnOnce(&mut V) -> Result<(), PetError>,
    {
        if let Err(e) = f(&mut self.view) {
            self.report("view", e);
        }
    }

    fn report(&mut self, context: &str, err: PetError) {
        let key = format!("{}: {}", context, err);
        if self.reported.insert(key.clone()) {
            pet_warn!("{}", key);
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
