//! Activity runner - executes script steps until one suspends

use crate::core::timers::TimerScope;
use crate::domain::actions::ActivityKind;
use crate::domain::dialogue::DialogueCategory;
use crate::domain::geometry::clamp_into;
use crate::domain::scene::SceneId;
use crate::domain::state::{PetStateKind, TransitionCause};
use crate::domain::topping::{HeldItem, Topping};
use crate::host::store::SettingsStore;
use crate::host::view::{PetView, VisualFlag};
use crate::systems::activity::{self, ActivityRun, Effect, Step, Walk, WalkTarget};
use crate::systems::scene::{edge_position, place_scene, stand_position};
use crate::systems::speech::SpeechKind;

use super::{actions, lifecycle, persist, pointer_events, speech, transitions};
use super::{Motion, PetCore, PetTimer};

/// Idle-timer entry: only a calm, idle, resting pet starts on its own
pub(super) fn try_autonomous<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) -> bool {
    let free = core.settings.auto_activity
        && core.state.visible
        && !core.state.is_busy
        && !core.state.is_sleeping()
        && core.state.current == PetStateKind::Idle
        && core.motion.is_resting()
        && core.pointer.is_none();
    if !free {
        return false;
    }
    let Some(kind) = activity::pick(&mut core.rng, &core.config.activity.weights) else {
        return false;
    };
    start(core, kind, now_ms)
}

/// Begin `kind` if nothing else owns the pet
pub(super) fn start<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, kind: ActivityKind, now_ms: f64) -> bool {
    if !core.state.visible || core.state.is_busy || !core.motion.is_resting() || core.pointer.is_some() {
        return false;
    }
    if core.state.is_sleeping() {
        return false;
    }

    core.state.is_busy = true;
    core.timers.cancel_event(&PetTimer::IdleActivity);
    pointer_events::close_menu(core);
    core.activity = Some(ActivityRun::new(kind, core.pos, &core.config.activity));
    pet_log!("activity started: {}", kind.key());
    run(core, now_ms);
    true
}

/// Execute steps until one suspends or the script ends
fn run<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    loop {
        let Some(step) = core.activity.as_mut().and_then(|a| a.next_step()) else {
            if core.activity.is_some() {
                finish(core, now_ms);
            }
            return;
        };
        execute(core, step, now_ms);
        if step.suspends() {
            return;
        }
    }
}

fn execute<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, step: Step, now_ms: f64) {
    match step {
        Step::ShowScene(scene) => show_scene(core, scene),
        Step::HideScene(scene) => hide_scene(core, scene),
        Step::WalkTo(target) => walk_to(core, target, now_ms),
        Step::Enter(state) => {
            transitions::set_state(core, state, TransitionCause::Activity, now_ms);
        }
        Step::Say(category) => {
            speech::say_phrase(core, category, SpeechKind::Action, now_ms);
        }
        Step::Wait(ms) => {
            core.timers.schedule(TimerScope::Activity, now_ms, ms, PetTimer::ActivityResume);
        }
        Step::Mutate(effect) => apply_effect(core, effect, now_ms),
        Step::Chain(kind) => {
            if let Some(current) = core.activity.take() {
                pet_log!("activity chained: {} -> {}", current.kind.key(), kind.key());
                core.activity = Some(current.chain(kind, &core.config.activity));
            }
        }
    }
}

fn show_scene<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, scene: SceneId) {
    let Some(viewport) = core.viewport else {
        return;
    };
    let at = place_scene(scene, core.pet_rect(), viewport, core.config.activity.scene_gap);
    core.scenes.show(scene, at);
    core.paint(|v| v.place_scene(scene, at));
    core.paint(|v| v.set_scene_visible(scene, true));
}

fn hide_scene<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, scene: SceneId) {
    if core.scenes.hide(scene) {
        core.paint(|v| v.set_scene_visible(scene, false));
    }
}

fn walk_to<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, target: WalkTarget, now_ms: f64) {
    let cfg = &core.config.activity;
    let destination = match (target, core.viewport) {
        (_, None) => core.pos,
        (WalkTarget::Scene(scene), Some(vp)) => match core.scenes.position(scene) {
            Some(scene_pos) => stand_position(scene, scene_pos, core.pos, core.pet_size, vp, cfg.stand_gap),
            None => core.pos,
        },
        (WalkTarget::Edge, Some(vp)) => edge_position(core.pos, core.pet_size, vp, cfg.edge_peek_fraction),
        (WalkTarget::Home, Some(vp)) => {
            let home = core.activity.as_ref().map_or(core.pos, |a| a.home);
            clamp_into(home, core.pet_size, vp)
        }
    };

    let walk = Walk::new(core.pos, destination, now_ms, cfg);
    let heads_left = walk.heads_left();
    core.motion = Motion::Walking(walk);
    transitions::set_state(core, PetStateKind::Walking, TransitionCause::Activity, now_ms);
    transitions::set_flag(core, VisualFlag::FacingLeft, heads_left);
}

/// Move along the current walk; arriving resumes the script
pub(super) fn advance_walk<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    let Motion::Walking(walk) = core.motion.clone() else {
        return;
    };
    core.pos = walk.position_at(now_ms);
    let pos = core.pos;
    core.paint(|v| v.move_pet(pos));

    if walk.is_done(now_ms) {
        core.motion = Motion::Resting;
        transitions::set_flag(core, VisualFlag::FacingLeft, false);
        if core.state.current == PetStateKind::Walking {
            transitions::set_state(core, PetStateKind::Idle, TransitionCause::Activity, now_ms);
        }
        run(core, now_ms);
    }
}

/// `Wait` step elapsed
pub(super) fn resume<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if core.activity.is_some() && !matches!(core.motion, Motion::Walking(_)) {
        run(core, now_ms);
    }
}

fn apply_effect<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, effect: Effect, now_ms: f64) {
    match effect {
        Effect::HoldRandomFruit => {
            let fruit = core.rng.pick(&HeldItem::FRUITS).copied();
            core.state.holding = fruit;
            core.paint(|v| v.set_held_item(fruit));
        }
        Effect::WashUp => {
            let category = if core.state.holding.is_some() {
                DialogueCategory::BathFruit
            } else {
                DialogueCategory::Bath
            };
            let gain = core.config.activity.bathe_mood_gain;
            set_topping(core, Topping::None);
            clear_burnt(core);
            transitions::adjust_mood(core, gain);
            speech::say_phrase(core, category, SpeechKind::Action, now_ms);
        }
        Effect::EatHeld => {
            if let Some(fruit) = core.state.holding.take() {
                core.paint(|v| v.set_held_item(None));
                let (gain, ms) = (core.config.activity.eat_mood_gain, core.config.speech.default_ms);
                transitions::adjust_mood(core, gain);
                speech::say_phrase_for(core, DialogueCategory::Eat, SpeechKind::Action, Some(fruit.emoji()), ms, now_ms);
            }
        }
        Effect::ToastUp => {
            let before = core.state.energy.value();
            let cfg = core.config.activity.clone();
            let ms = core.config.speech.default_ms;
            transitions::adjust_energy(core, cfg.toast_gain);
            if before >= cfg.burn_level {
                transitions::set_flag(core, VisualFlag::Burnt, true);
                core.timers.replace(TimerScope::Pet, now_ms, cfg.burnt_ms, PetTimer::BurntClear);
                speech::say_phrase(core, DialogueCategory::Burnt, SpeechKind::Action, now_ms);
            } else {
                let spread = core.rng.pick(&Topping::SPREADS).copied().unwrap_or(Topping::Butter);
                set_topping(core, spread);
                speech::say_phrase_for(core, DialogueCategory::Toasted, SpeechKind::Action, Some(spread.emoji()), ms, now_ms);
            }
        }
        Effect::SetHiding(on) => transitions::set_flag(core, VisualFlag::HidingAtEdge, on),
    }
}

fn set_topping<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, topping: Topping) {
    core.state.topping = topping;
    core.paint(|v| v.set_topping(topping));
}

pub(super) fn clear_burnt<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>) {
    core.timers.cancel_event(&PetTimer::BurntClear);
    if core.state.is_burnt {
        transitions::set_flag(core, VisualFlag::Burnt, false);
    }
}

/// Script ran out: release everything the activity held
fn finish<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    if let Some(run) = core.activity.as_ref() {
        pet_log!("activity finished: {}", run.kind.key());
    }
    release(core, now_ms);
}

/// Cut the sequence short (drag, logout, sleep); the held item is dropped
pub(super) fn abort<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    let Some(run) = core.activity.as_ref() else {
        return;
    };
    pet_log!("activity aborted: {}", run.kind.key());
    if core.state.holding.take().is_some() {
        core.paint(|v| v.set_held_item(None));
    }
    release(core, now_ms);
}

fn release<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, now_ms: f64) {
    core.activity = None;
    core.timers.cancel_scope(TimerScope::Activity);
    for scene in core.scenes.visible() {
        hide_scene(core, scene);
    }
    if core.state.is_hiding_at_edge {
        transitions::set_flag(core, VisualFlag::HidingAtEdge, false);
    }
    transitions::set_flag(core, VisualFlag::FacingLeft, false);
    if matches!(core.motion, Motion::Walking(_)) {
        core.motion = Motion::Resting;
    }
    if core.state.current.is_activity_owned() || core.state.current == PetStateKind::Thinking {
        transitions::set_state(core, PetStateKind::Idle, TransitionCause::Activity, now_ms);
    }
    core.state.is_busy = false;
    lifecycle::rearm_idle_activity(core, now_ms);
    persist::save(core);
}

/// Menu-invoked activity: wakes a sleeper first, no-op while busy
pub(super) fn start_from_menu<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    kind: ActivityKind,
    now_ms: f64,
) -> bool {
    if core.state.is_busy {
        return false;
    }
    if core.state.is_sleeping() {
        actions::wake(core, now_ms);
    }
    start(core, kind, now_ms)
}
