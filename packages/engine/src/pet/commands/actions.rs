//! Menu actions, notifications and settings

use crate::core::timers::TimerScope;
use crate::domain::actions::{Action, ActionOutcome, NotificationKind, SummaryCounts};
use crate::domain::dialogue::{reminder_for_hour, DialogueCategory};
use crate::domain::geometry::clamp_into;
use crate::domain::settings::SettingsUpdate;
use crate::domain::state::{PetStateKind, TransitionCause, DEFAULT_PET_NAME};
use crate::host::store::SettingsStore;
use crate::host::view::{PetView, VisualFlag};
use crate::systems::speech::SpeechKind;

use super::{lifecycle, persist, pointer_events, speech, step_activity, step_physics, transitions};
use super::{Motion, PetCore, PetTimer};

/// Said when the summary fetch failed
const SUMMARY_APOLOGY: &str = "Sorry, I couldn't fetch the data right now... 😢";

pub(super) fn perform<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    action: Action,
    now_ms: f64,
) -> ActionOutcome {
    if !core.state.visible {
        return ActionOutcome::Ignored;
    }
    pointer_events::close_menu(core);
    lifecycle::record_interaction(core, now_ms);

    match action {
        Action::Greet => {
            react(core, PetStateKind::Waving, Some(2000.0), now_ms);
            speech::say_phrase(core, DialogueCategory::Greet, SpeechKind::Action, now_ms);
            transitions::adjust_mood(core, 10);
        }
        Action::Summary => {
            react(core, PetStateKind::Thinking, None, now_ms);
            speech::say_phrase(core, DialogueCategory::Summary, SpeechKind::Action, now_ms);
            return ActionOutcome::FetchSummary;
        }
        Action::Remind => {
            react(core, PetStateKind::Thinking, Some(2000.0), now_ms);
            let line = reminder_for_hour(core.hour_now());
            let ms = core.config.speech.default_ms;
            speech::say_text(core, line, Some("⏰"), ms, now_ms);
        }
        Action::Weather => {
            react(core, PetStateKind::Happy, Some(2000.0), now_ms);
            speech::say_phrase(core, DialogueCategory::Weather, SpeechKind::Action, now_ms);
        }
        Action::Encourage => {
            react(core, PetStateKind::Happy, Some(3000.0), now_ms);
            speech::say_phrase(core, DialogueCategory::Encourage, SpeechKind::Action, now_ms);
            transitions::adjust_mood(core, 15);
        }
        Action::Topping => cycle_topping(core, now_ms),
        Action::Sleep => {
            if core.state.is_sleeping() {
                wake(core, now_ms);
            } else {
                go_to_sleep(core, TransitionCause::Action, now_ms);
            }
        }
        Action::Settings => {
            let (name, settings) = (core.state.name.clone(), core.settings.clone());
            core.paint(|v| v.open_settings(&name, &settings));
            return ActionOutcome::OpenSettings;
        }
        Action::Activity(kind) => {
            if !step_activity::start_from_menu(core, kind, now_ms) {
                return ActionOutcome::Ignored;
            }
        }
    }
    persist::save(core);
    ActionOutcome::Done
}

/// Cosmetic state change; a busy pet keeps its activity state and only talks
fn react<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    state: PetStateKind,
    dwell_ms: Option<f64>,
    now_ms: f64,
) {
    if core.state.is_busy {
        return;
    }
    if core.state.is_sleeping() {
        wake(core, now_ms);
    }
    let dwell = dwell_ms.or(state.dwell_ms());
    transitions::set_state_for(core, state, TransitionCause::Action, now_ms, dwell);
}

pub(super) fn cycle_topping<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    let next = core.state.topping.next();
    core.state.topping = next;
    core.paint(|v| v.set_topping(next));
    let ms = core.config.speech.default_ms;
    speech::say_phrase_for(core, DialogueCategory::Topping, SpeechKind::Action, Some(next.emoji()), ms, now_ms);
    persist::save(core);
}

pub(super) fn wake<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if !core.state.is_sleeping() {
        return;
    }
    transitions::set_state(core, PetStateKind::Idle, TransitionCause::Wake, now_ms);
    core.timers.cancel_event(&PetTimer::SleepRecover);
    speech::say_phrase(core, DialogueCategory::Wakeup, SpeechKind::Action, now_ms);
    lifecycle::record_interaction(core, now_ms);
    pet_log!("{} woke up", core.state.name);
}

/// Explicit sleep aborts a running activity; automatic sleep never does
pub(super) fn go_to_sleep<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    cause: TransitionCause,
    now_ms: f64,
) -> bool {
    if core.state.is_sleeping() {
        return true;
    }
    if core.activity.is_some() {
        if cause != TransitionCause::Action {
            return false;
        }
        step_activity::abort(core, now_ms);
    }
    if !matches!(core.motion, Motion::Resting) {
        return false;
    }
    if !transitions::set_state(core, PetStateKind::Sleeping, cause, now_ms) {
        return false;
    }

    pointer_events::close_menu(core);
    let ms = core.config.speech.short_ms;
    speech::say_phrase_for(core, DialogueCategory::Sleep, SpeechKind::Action, Some("💤"), ms, now_ms);
    core.timers.cancel_event(&PetTimer::AutoSleep);
    core.timers.cancel_event(&PetTimer::TiredSleep);
    let every = core.config.ambient.sleep_recover_interval_ms;
    core.timers.cancel_event(&PetTimer::SleepRecover);
    core.timers.schedule_repeating(TimerScope::Pet, now_ms, every, PetTimer::SleepRecover);
    persist::save(core);
    pet_log!("{} fell asleep", core.state.name);
    true
}

/// Host alert. Returns whether the pet reacted at all.
pub(super) fn notify<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    message: &str,
    kind: &str,
    now_ms: f64,
) -> bool {
    if !core.settings.notify_enabled || !core.state.visible {
        return false;
    }
    let kind = NotificationKind::from_alert_type(kind);
    pet_log!("notification ({:?}): {}", kind, message);

    if core.state.is_sleeping() {
        wake(core, now_ms);
    }

    let dwell = Some(core.config.ambient.notify_dwell_ms);
    let reaction = match kind {
        NotificationKind::Success => Some((PetStateKind::Happy, 3)),
        NotificationKind::Danger => Some((PetStateKind::Surprised, -3)),
        NotificationKind::Warning => Some((PetStateKind::Thinking, 0)),
        NotificationKind::Info => None,
    };

    if !core.state.is_busy {
        match reaction {
            Some((state, mood)) => {
                transitions::set_state_for(core, state, TransitionCause::Notification, now_ms, dwell);
                if mood != 0 {
                    transitions::adjust_mood(core, mood);
                }
            }
            None => {
                transitions::set_flag(core, VisualFlag::StatusIndicator, true);
                let ms = core.config.ambient.notify_dwell_ms;
                core.timers.replace(TimerScope::Pet, now_ms, ms, PetTimer::StatusIndicatorHide);
            }
        }
    }

    match kind.reaction_line() {
        Some(line) => {
            let ms = core.config.speech.default_ms;
            speech::say_text(core, line, None, ms, now_ms);
        }
        None => {
            speech::say_phrase(core, DialogueCategory::Notice, SpeechKind::Action, now_ms);
        }
    }
    true
}

/// Fetched counts (or the failure) become the text revealed shortly after
pub(super) fn deliver_summary<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    result: Result<SummaryCounts, String>,
    now_ms: f64,
) {
    let text = match result {
        Ok(counts) => counts.describe(),
        Err(e) => {
            pet_warn!("summary fetch failed: {}", e);
            SUMMARY_APOLOGY.to_string()
        }
    };
    core.pending_summary = Some(text);
    let ms = core.config.ambient.summary_reveal_ms;
    core.timers.replace(TimerScope::Pet, now_ms, ms, PetTimer::SummaryReveal);
}

pub(super) fn apply_settings<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    update: SettingsUpdate,
    now_ms: f64,
) {
    let name = update.name.trim();
    core.state.name = if name.is_empty() { DEFAULT_PET_NAME.to_string() } else { name.to_string() };

    let old = std::mem::replace(&mut core.settings, update.settings);
    let preset_changed = old.position != core.settings.position;

    if (preset_changed || core.free_position.is_some()) && core.motion.is_resting() {
        core.free_position = None;
        if let Some(viewport) = core.viewport {
            let anchor = core.settings.position.anchor(viewport, core.pet_size);
            core.pos = clamp_into(anchor, core.pet_size, viewport);
            let pos = core.pos;
            core.paint(|v| v.move_pet(pos));
        }
    }

    if !core.settings.physics_enabled {
        step_physics::stop_fall(core, now_ms);
    }

    if core.timers_started {
        lifecycle::restart_ambient(core, now_ms);
    }

    let line = format!("Settings saved! I'm {} now~", core.state.name);
    let ms = core.config.speech.default_ms;
    speech::say_text(core, &line, None, ms, now_ms);
    if !core.state.is_busy && !core.state.is_sleeping() {
        transitions::set_state_for(core, PetStateKind::Happy, TransitionCause::Action, now_ms, Some(2000.0));
    }
    persist::save(core);
    pet_log!("settings saved for {}", core.state.name);
}

/// Host-requested mood. Activity states and sleep have their own entry points.
pub(super) fn express<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    state: PetStateKind,
    now_ms: f64,
) -> bool {
    if !core.state.visible || state.is_activity_owned() || core.state.is_busy {
        return false;
    }
    match state {
        PetStateKind::Sleeping => go_to_sleep(core, TransitionCause::Action, now_ms),
        PetStateKind::Idle if core.state.is_sleeping() => {
            wake(core, now_ms);
            true
        }
        _ if core.state.is_sleeping() => false,
        _ => transitions::set_state(core, state, TransitionCause::Action, now_ms),
    }
}
