//! Login visibility, viewport changes and the ambient timers

use crate::core::timers::TimerScope;
use crate::domain::geometry::{clamp_into, Size, Vec2};
use crate::domain::state::{PetStateKind, TransitionCause};
use crate::host::store::SettingsStore;
use crate::host::view::{PetView, VisualFlag};
use crate::systems::physics::Bounds;

use super::{persist, pointer_events, speech, step_activity, step_physics, transitions};
use super::{Motion, PetCore, PetTimer};

/// User touched the pet: push back auto-sleep and the next autonomous activity
pub(super) fn record_interaction<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    core.state.last_interaction_ms = now_ms;
    if !core.timers_started {
        return;
    }
    if core.settings.auto_sleep {
        let ms = core.config.ambient.auto_sleep_ms;
        core.timers.replace(TimerScope::Pet, now_ms, ms, PetTimer::AutoSleep);
    }
    rearm_idle_activity(core, now_ms);
}

pub(super) fn rearm_idle_activity<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if !core.timers_started {
        return;
    }
    let ms = core.settings.interaction_freq.idle_activity_timeout_ms();
    core.timers.replace(TimerScope::Pet, now_ms, ms, PetTimer::IdleActivity);
}

fn start_timers<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    core.timers_started = true;
    restart_ambient(core, now_ms);

    let decay = core.config.ambient.status_interval_ms;
    core.timers.cancel_event(&PetTimer::StatusDecay);
    core.timers.schedule_repeating(TimerScope::Pet, now_ms, decay, PetTimer::StatusDecay);

    if core.state.is_sleeping() {
        let every = core.config.ambient.sleep_recover_interval_ms;
        core.timers.cancel_event(&PetTimer::SleepRecover);
        core.timers.schedule_repeating(TimerScope::Pet, now_ms, every, PetTimer::SleepRecover);
    } else {
        let greet = core.config.ambient.greet_delay_ms;
        core.timers.replace(TimerScope::Pet, now_ms, greet, PetTimer::Greeting);
    }
}

/// Re-arm the settings-dependent timers (after login or a settings save)
pub(super) fn restart_ambient<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    let freq = core.settings.interaction_freq;
    core.timers.cancel_event(&PetTimer::AutoTalk);
    core.timers.schedule_repeating(TimerScope::Pet, now_ms, freq.auto_talk_interval_ms(), PetTimer::AutoTalk);

    if core.settings.auto_sleep && !core.state.is_sleeping() {
        let ms = core.config.ambient.auto_sleep_ms;
        core.timers.replace(TimerScope::Pet, now_ms, ms, PetTimer::AutoSleep);
    } else {
        core.timers.cancel_event(&PetTimer::AutoSleep);
    }

    if core.state.is_busy {
        core.timers.cancel_event(&PetTimer::IdleActivity);
    } else {
        rearm_idle_activity(core, now_ms);
    }
}

pub(super) fn set_logged_in<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, logged_in: bool, now_ms: f64) {
    if logged_in == core.state.visible {
        return;
    }

    if logged_in {
        core.state.visible = true;
        core.paint(|v| v.set_visible(true));
        let pos = core.pos;
        core.paint(|v| v.move_pet(pos));
        transitions::paint_stats(core);
        start_timers(core, now_ms);
        pet_log!("{} appears", core.state.name);
        return;
    }

    step_activity::abort(core, now_ms);
    step_physics::stop_fall(core, now_ms);
    if matches!(core.motion, Motion::Dragging) {
        core.motion = Motion::Resting;
        transitions::set_flag(core, VisualFlag::Dragging, false);
    }
    core.pointer = None;
    if !core.state.is_sleeping() && core.state.current != PetStateKind::Idle {
        transitions::set_state(core, PetStateKind::Idle, TransitionCause::Dwell, now_ms);
    }
    core.timers.clear();
    core.timers_started = false;
    speech::hide(core);
    pointer_events::close_menu(core);
    core.state.visible = false;
    core.paint(|v| v.set_visible(false));
    persist::save(core);
    pet_log!("{} hides (logged out)", core.state.name);
}

/// New viewport or pet size. The first call places the pet.
pub(super) fn resize<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, viewport: Size, pet_size: Size) {
    let old_viewport = core.viewport;
    let first = old_viewport.is_none();
    let was_grounded = core.bounds.is_on_floor(core.pos);

    core.viewport = Some(viewport);
    core.pet_size = pet_size;
    core.bounds = Bounds::from_viewport(viewport, pet_size, &core.config.physics);

    let anchor = core.settings.position.anchor(viewport, pet_size);
    let target = if first {
        core.free_position.unwrap_or(anchor)
    } else if core.motion.is_resting() && core.free_position.is_none() {
        anchor
    } else if core.motion.is_resting() && was_grounded {
        Vec2::new(core.pos.x, core.bounds.floor)
    } else {
        core.pos
    };

    core.pos = clamp_into(target, pet_size, viewport);
    // The mover carries its own copy of the position
    match &mut core.motion {
        Motion::Falling(body) => body.pos = core.pos,
        Motion::Walking(walk) => {
            if let Some(old) = old_viewport {
                walk.refit(old, viewport, pet_size);
            }
        }
        Motion::Resting | Motion::Dragging => {}
    }
    if core.motion.is_resting() && core.free_position.is_some() {
        core.free_position = Some(core.pos);
    }
    let pos = core.pos;
    core.paint(|v| v.move_pet(pos));
}
