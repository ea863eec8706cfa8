//! State transitions - the only place `state.current` changes

use crate::core::timers::TimerScope;
use crate::domain::state::{PetStateKind, TransitionCause};
use crate::host::store::SettingsStore;
use crate::host::view::{PetView, VisualFlag};

use super::{PetCore, PetTimer};

/// Enter `to` with the state's default dwell
pub(super) fn set_state<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    to: PetStateKind,
    cause: TransitionCause,
    now_ms: f64,
) -> bool {
    set_state_for(core, to, cause, now_ms, to.dwell_ms())
}

/// Enter `to`, routing non-idle to non-idle moves through idle. Activity
/// steps never arm a dwell: the script decides when they end.
pub(super) fn set_state_for<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    to: PetStateKind,
    cause: TransitionCause,
    now_ms: f64,
    dwell_ms: Option<f64>,
) -> bool {
    let from = core.state.current;

    if from != to {
        if from != PetStateKind::Idle && to != PetStateKind::Idle {
            if !from.can_enter(PetStateKind::Idle, cause) || !PetStateKind::Idle.can_enter(to, cause) {
                return false;
            }
            enter(core, PetStateKind::Idle);
        } else if !from.can_enter(to, cause) {
            return false;
        }
        enter(core, to);
    }

    if cause != TransitionCause::Activity {
        if let Some(ms) = dwell_ms {
            core.timers.replace(TimerScope::State, now_ms, ms, PetTimer::Dwell(to));
        }
    }
    true
}

fn enter<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, to: PetStateKind) {
    core.timers.cancel_scope(TimerScope::State);
    core.state.current = to;
    core.paint(|v| v.set_state_class(to));
    if to == PetStateKind::Sleeping {
        core.paint(|v| v.set_eyes(crate::domain::geometry::Vec2::zero()));
    }
}

/// Dwell expiry; stale entries for a state already left are ignored
pub(super) fn dwell_elapsed<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, state: PetStateKind, now_ms: f64) {
    if core.state.current == state {
        set_state(core, PetStateKind::Idle, TransitionCause::Dwell, now_ms);
    }
}

/// Toggle a visual flag, mirroring it into `PetState` where it lives there
pub(super) fn set_flag<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, flag: VisualFlag, on: bool) {
    match flag {
        VisualFlag::Dragging => core.state.is_dragging = on,
        VisualFlag::Burnt => core.state.is_burnt = on,
        VisualFlag::HidingAtEdge => core.state.is_hiding_at_edge = on,
        VisualFlag::StatusIndicator => core.state.status_indicator = on,
        VisualFlag::Squash | VisualFlag::FacingLeft => {}
    }
    core.paint(|v| v.set_flag(flag, on));
}

pub(super) fn adjust_mood<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, delta: i64) {
    core.state.mood.adjust(delta);
    paint_stats(core);
}

pub(super) fn adjust_energy<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, delta: i64) {
    core.state.energy.adjust(delta);
    paint_stats(core);
}

pub(super) fn paint_stats<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>) {
    let (mood, energy) = (core.state.mood.value(), core.state.energy.value());
    core.paint(|v| v.set_stats(mood, energy));
}
