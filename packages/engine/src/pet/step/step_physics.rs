use crate::core::timers::TimerScope;
use crate::domain::dialogue::DialogueCategory;
use crate::domain::state::{PetStateKind, TransitionCause};
use crate::host::store::SettingsStore;
use crate::host::view::{PetView, VisualFlag};
use crate::systems::physics;
use crate::systems::speech::SpeechKind;

use super::{persist, speech, transitions};
use super::{Motion, PetCore, PetTimer};

/// Chance a squash landing gets a remark
const LANDING_REMARK_CHANCE: f32 = 0.5;

/// Integrate the fall for `dt_ms` worth of frames
pub(super) fn advance<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, dt_ms: f64, now_ms: f64) {
    let Motion::Falling(mut body) = core.motion.clone() else {
        return;
    };

    let frames = physics::frames_for(dt_ms, &core.config.physics);
    let mut squashed = false;
    let mut settled = false;
    for _ in 0..frames {
        let result = physics::step(&mut body, &core.bounds, &core.config.physics);
        squashed |= result.squash;
        if result.settled {
            settled = true;
            break;
        }
    }

    core.pos = body.pos;
    let pos = core.pos;
    core.paint(|v| v.move_pet(pos));

    if squashed {
        transitions::set_flag(core, VisualFlag::Squash, true);
        let ms = core.config.ambient.squash_ms;
        core.timers.replace(TimerScope::Pet, now_ms, ms, PetTimer::SquashEnd);
        if core.rng.chance(LANDING_REMARK_CHANCE) {
            speech::say_phrase(core, DialogueCategory::Landing, SpeechKind::Action, now_ms);
        }
    }

    if settled {
        settle(core, now_ms);
    } else {
        core.motion = Motion::Falling(body);
    }
}

fn settle<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    core.motion = Motion::Resting;
    core.free_position = Some(core.pos);
    if core.state.current == PetStateKind::Worried {
        transitions::set_state(core, PetStateKind::Idle, TransitionCause::Physics, now_ms);
    }
    persist::save(core);
}

/// Drop out of a fall immediately (physics switched off, pet hidden)
pub(super) fn stop_fall<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if let Motion::Falling(mut body) = core.motion.clone() {
        body.snap_to_floor(&core.bounds);
        core.pos = body.pos;
        let pos = core.pos;
        core.paint(|v| v.move_pet(pos));
        settle(core, now_ms);
    }
}
