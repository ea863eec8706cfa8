//! Pointer gestures: press, drag, release, clicks and the context menu

use crate::core::timers::TimerScope;
use crate::domain::dialogue::DialogueCategory;
use crate::domain::geometry::{clamp_into, Vec2};
use crate::domain::state::{PetStateKind, TransitionCause};
use crate::host::store::SettingsStore;
use crate::host::view::{PetView, VisualFlag};
use crate::systems::input::{menu_position, pupil_offset, DragPhase, DragTracker, PointerButton, PointerKind};
use crate::systems::physics::PhysicsBody;
use crate::systems::speech::SpeechKind;

use super::{actions, lifecycle, persist, speech, step_activity, transitions};
use super::{Motion, PetCore, PetTimer};

/// Window after a drag release in which the browser's trailing click is eaten
const CLICK_SUPPRESS_MS: f64 = 300.0;

pub(super) fn pointer_down<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    kind: PointerKind,
    button: PointerButton,
    at: Vec2,
    now_ms: f64,
) {
    if !core.state.visible || button != PointerButton::Primary {
        return;
    }
    // A long press left the suppression armed; a new gesture clears it
    if core.suppress_click_until == f64::INFINITY {
        core.suppress_click_until = f64::NEG_INFINITY;
    }
    // The previous drag never got its release (touchcancel, mouseup off-window)
    if core.motion == Motion::Dragging {
        pet_warn!("pointer release lost; ending stale drag");
        land(core, Vec2::zero(), now_ms);
    }
    core.pointer = Some(DragTracker::begin(kind, at, core.pos, now_ms));
    if kind == PointerKind::Touch {
        let delay = core.config.input.long_press_ms;
        core.timers.replace(TimerScope::Pet, now_ms, delay, PetTimer::LongPress);
    }
}

pub(super) fn pointer_move<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, at: Vec2, now_ms: f64) {
    if !core.state.visible {
        return;
    }
    let slop = core.config.input.drag_slop_px;
    let phase = core.pointer.as_mut().map(|p| p.update(at, now_ms, slop));
    match phase {
        None | Some(DragPhase::Pending) => follow_eyes(core, at),
        Some(DragPhase::Started) => {
            begin_drag(core, now_ms);
            drag_to(core, at, now_ms);
        }
        Some(DragPhase::Moving) => drag_to(core, at, now_ms),
    }
}

fn begin_drag<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    core.timers.cancel_event(&PetTimer::LongPress);
    if core.activity.is_some() {
        step_activity::abort(core, now_ms);
    }
    core.motion = Motion::Dragging;
    transitions::set_flag(core, VisualFlag::Dragging, true);
    close_menu(core);
    core.paint(|v| v.set_eyes(Vec2::zero()));
    lifecycle::record_interaction(core, now_ms);
}

fn drag_to<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, at: Vec2, now_ms: f64) {
    let Some(tracker) = core.pointer.as_ref() else {
        return;
    };
    let target = tracker.target(at);
    let speed = tracker.speed();

    core.pos = match core.viewport {
        Some(vp) => clamp_into(target, core.pet_size, vp),
        None => target,
    };
    let pos = core.pos;
    core.paint(|v| v.move_pet(pos));

    if speed > core.config.input.worried_speed && core.state.current != PetStateKind::Worried {
        if transitions::set_state(core, PetStateKind::Worried, TransitionCause::Interaction, now_ms) {
            speech::say_phrase(core, DialogueCategory::Worried, SpeechKind::Action, now_ms);
        }
    }
}

pub(super) fn pointer_up<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, _at: Vec2, now_ms: f64) {
    core.timers.cancel_event(&PetTimer::LongPress);
    let tracker = core.pointer.take();
    let Some(tracker) = tracker.filter(|t| t.is_drag()) else {
        if core.motion == Motion::Dragging {
            land(core, Vec2::zero(), now_ms);
        }
        return;
    };

    core.suppress_click_until = now_ms + CLICK_SUPPRESS_MS;
    let velocity = tracker.release_velocity(
        now_ms,
        core.config.input.release_stale_ms,
        core.config.physics.frame_ms,
    );
    if core.rng.chance(core.config.speech.drag_remark_chance) {
        speech::say_phrase(core, DialogueCategory::Drag, SpeechKind::Action, now_ms);
    }
    lifecycle::record_interaction(core, now_ms);
    land(core, velocity, now_ms);
}

/// End a drag: fall when airborne or thrown, otherwise rest where dropped
fn land<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, velocity: Vec2, now_ms: f64) {
    transitions::set_flag(core, VisualFlag::Dragging, false);
    core.free_position = Some(core.pos);

    if core.settings.physics_enabled && core.viewport.is_some() {
        let above_floor = core.pos.y < core.bounds.floor - core.config.input.rest_tolerance_px;
        let thrown = velocity.length() > core.config.input.fling_speed;
        if above_floor || thrown {
            core.motion = Motion::Falling(PhysicsBody::new(core.pos, velocity));
            core.last_tick_ms = Some(now_ms);
            return;
        }
    }

    core.motion = Motion::Resting;
    if core.state.current == PetStateKind::Worried {
        transitions::set_state(core, PetStateKind::Idle, TransitionCause::Physics, now_ms);
    }
    persist::save(core);
}

pub(super) fn click<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if !core.state.visible {
        return;
    }
    if now_ms <= core.suppress_click_until {
        core.suppress_click_until = f64::NEG_INFINITY;
        return;
    }

    lifecycle::record_interaction(core, now_ms);
    if core.state.is_sleeping() {
        actions::wake(core, now_ms);
        return;
    }

    speech::say_phrase(core, DialogueCategory::Click, SpeechKind::Action, now_ms);
    if core.state.is_busy {
        return;
    }
    transitions::set_state(core, PetStateKind::Happy, TransitionCause::Interaction, now_ms);
    transitions::adjust_mood(core, 5);
    persist::save(core);
}

pub(super) fn double_click<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if !core.state.visible || core.state.is_sleeping() {
        return;
    }
    actions::cycle_topping(core, now_ms);
}

pub(super) fn toggle_menu<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if !core.state.visible {
        return;
    }
    if core.state.menu_open {
        close_menu(core);
        return;
    }
    let Some(viewport) = core.viewport else {
        return;
    };
    let cfg = &core.config.input;
    let at = menu_position(core.pet_rect(), cfg.menu_size(), viewport, cfg.menu_margin);
    core.state.menu_open = true;
    core.paint(|v| v.show_menu(at));
    lifecycle::record_interaction(core, now_ms);
}

pub(super) fn close_menu<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>) {
    if core.state.menu_open {
        core.state.menu_open = false;
        core.paint(|v| v.hide_menu());
    }
}

pub(super) fn document_click<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, inside_pet: bool, inside_menu: bool) {
    if !inside_pet && !inside_menu {
        close_menu(core);
    }
}

/// Touch held still: open the menu instead of dragging
pub(super) fn long_press<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    let pending = core.pointer.as_ref().map_or(false, |p| !p.is_drag());
    if !pending {
        return;
    }
    core.pointer = None;
    core.suppress_click_until = f64::INFINITY;
    toggle_menu(core, now_ms);
}

fn follow_eyes<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, at: Vec2) {
    if core.state.is_sleeping() || core.state.is_dragging {
        return;
    }
    let cfg = &core.config.input;
    let offset = pupil_offset(core.pet_rect(), at, cfg.eye_max_offset, cfg.eye_distance_divisor);
    core.paint(|v| v.set_eyes(offset));
}
