//! Dispatch for fired registry timers

use crate::core::timers::TimerScope;
use crate::domain::dialogue::DialogueCategory;
use crate::domain::state::{Gauge, PetStateKind, TransitionCause};
use crate::host::store::SettingsStore;
use crate::host::view::{PetView, VisualFlag};
use crate::systems::speech::SpeechKind;

use super::{actions, lifecycle, persist, pointer_events, speech, step_activity, transitions};
use super::{PetCore, PetTimer};

pub(super) fn handle<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, event: PetTimer, now_ms: f64) {
    match event {
        PetTimer::Dwell(state) => transitions::dwell_elapsed(core, state, now_ms),
        PetTimer::SpeechHide => speech::hide(core),
        PetTimer::SquashEnd => transitions::set_flag(core, VisualFlag::Squash, false),
        PetTimer::BurntClear => {
            if core.state.is_burnt {
                transitions::set_flag(core, VisualFlag::Burnt, false);
                persist::save(core);
            }
        }
        PetTimer::IdleActivity => {
            if !step_activity::try_autonomous(core, now_ms) {
                lifecycle::rearm_idle_activity(core, now_ms);
            }
        }
        PetTimer::AutoTalk => {
            if core.state.visible && !core.state.is_sleeping() && !core.state.is_busy {
                speech::say_phrase(core, DialogueCategory::Idle, SpeechKind::Chatter, now_ms);
            }
        }
        PetTimer::StatusDecay => status_decay(core, now_ms),
        PetTimer::TiredSleep => {
            if !core.state.is_busy && core.motion.is_resting() && !core.state.is_sleeping() {
                actions::go_to_sleep(core, TransitionCause::Auto, now_ms);
            }
        }
        PetTimer::AutoSleep => auto_sleep(core, now_ms),
        PetTimer::SleepRecover => {
            let amount = core.config.ambient.sleep_recover_amount;
            transitions::adjust_energy(core, amount);
            if core.state.energy.value() >= Gauge::MAX || !core.state.is_sleeping() {
                core.timers.cancel_event(&PetTimer::SleepRecover);
            }
            persist::save(core);
        }
        PetTimer::Greeting => {
            if core.state.visible && !core.state.is_sleeping() && !core.state.is_busy {
                speech::say_phrase(core, DialogueCategory::Greet, SpeechKind::Action, now_ms);
                transitions::set_state(core, PetStateKind::Waving, TransitionCause::Action, now_ms);
            }
        }
        PetTimer::StatusIndicatorHide => transitions::set_flag(core, VisualFlag::StatusIndicator, false),
        PetTimer::SummaryReveal => {
            if let Some(text) = core.pending_summary.take() {
                let ms = core.config.speech.long_ms;
                speech::say_text(core, &text, None, ms, now_ms);
            }
            if core.state.current == PetStateKind::Thinking && !core.state.is_busy {
                transitions::set_state(core, PetStateKind::Idle, TransitionCause::Dwell, now_ms);
            }
        }
        PetTimer::ActivityResume => step_activity::resume(core, now_ms),
        PetTimer::LongPress => pointer_events::long_press(core, now_ms),
    }
}

/// Energy drains while awake; running low makes the pet nod off
fn status_decay<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if !core.state.visible || core.state.is_sleeping() {
        return;
    }
    let (decay, threshold, delay) = {
        let a = &core.config.ambient;
        (a.energy_decay, a.tired_threshold, a.tired_sleep_delay_ms)
    };
    transitions::adjust_energy(core, -decay);
    persist::save(core);

    if core.state.energy.value() < threshold && !core.timers.is_pending(&PetTimer::TiredSleep) {
        speech::say_phrase(core, DialogueCategory::Tired, SpeechKind::Action, now_ms);
        core.timers.schedule(TimerScope::Pet, now_ms, delay, PetTimer::TiredSleep);
    }
}

fn auto_sleep<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if !core.settings.auto_sleep || !core.state.visible || core.state.is_sleeping() {
        return;
    }
    let calm = !core.state.is_busy && core.motion.is_resting() && core.state.current == PetStateKind::Idle;
    if calm {
        actions::go_to_sleep(core, TransitionCause::Auto, now_ms);
    } else {
        let ms = core.config.ambient.auto_sleep_ms;
        core.timers.replace(TimerScope::Pet, now_ms, ms, PetTimer::AutoSleep);
    }
}
