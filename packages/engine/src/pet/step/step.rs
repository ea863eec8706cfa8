use crate::host::store::SettingsStore;
use crate::host::view::PetView;

use super::{step_activity, step_physics, timer_events};
use super::{Motion, PetCore, TickReport};

/// Upper bound on timer firings per tick; repeating timers re-arm past
/// `now`, so this only guards against a handler scheduling zero-delay loops
const MAX_FIRINGS_PER_TICK: usize = 64;

pub(super) fn tick<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) -> TickReport {
    let dt = match core.last_tick_ms {
        Some(last) => now_ms - last,
        None => core.config.physics.frame_ms,
    };
    core.last_tick_ms = Some(now_ms);

    match core.motion {
        Motion::Falling(_) => step_physics::advance(core, dt, now_ms),
        Motion::Walking(_) => step_activity::advance_walk(core, now_ms),
        Motion::Resting | Motion::Dragging => {}
    }

    for _ in 0..MAX_FIRINGS_PER_TICK {
        let Some((_, event)) = core.timers.pop_due(now_ms) else {
            break;
        };
        timer_events::handle(core, event, now_ms);
    }

    TickReport {
        needs_frame: core.motion.is_animating(),
        next_deadline: core.timers.next_due(),
    }
}
