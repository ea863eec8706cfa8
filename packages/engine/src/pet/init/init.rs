use std::collections::HashSet;

use crate::core::clock;
use crate::core::random::Rng;
use crate::core::timers::TimerRegistry;
use crate::domain::config::EngineConfig;
use crate::domain::geometry::{Size, Vec2};
use crate::domain::scene::SceneId;
use crate::domain::settings::Settings;
use crate::domain::state::PetState;
use crate::host::store::SettingsStore;
use crate::host::view::{PetView, VisualFlag};
use crate::systems::physics::{Bounds, PhysicsBody};
use crate::systems::scene::SceneBoard;
use crate::systems::speech::SpeechPresenter;

use super::persist;
use super::{Motion, PetCore};

/// Until the host reports the real element size
const DEFAULT_PET_SIZE: Size = Size::new(120.0, 120.0);

pub(super) fn create_core<V: PetView, S: SettingsStore>(
    view: V,
    store: S,
    config: EngineConfig,
    rng: Rng,
) -> PetCore<V, S> {
    PetCore {
        view,
        store,
        bounds: Bounds::from_viewport(DEFAULT_PET_SIZE, DEFAULT_PET_SIZE, &config.physics),
        config,
        settings: Settings::default(),
        state: PetState::default(),
        rng,
        timers: TimerRegistry::new(),
        speech: SpeechPresenter::default(),
        scenes: SceneBoard::default(),
        motion: Motion::Resting,
        activity: None,
        pointer: None,
        viewport: None,
        pet_size: DEFAULT_PET_SIZE,
        pos: Vec2::zero(),
        free_position: None,
        last_tick_ms: None,
        timers_started: false,
        suppress_click_until: f64::NEG_INFINITY,
        pending_summary: None,
        hour_source: clock::local_hour,
        reported: HashSet::new(),
        persist_blocked: false,
    }
}

pub(super) fn mount<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>) {
    let record = persist::load_record(core);
    record.restore_into(&mut core.state);
    core.settings = record.settings.clone();
    core.free_position = record.position.map(Vec2::from);

    let state = core.state.clone();
    core.paint(|v| v.set_visible(false));
    core.paint(|v| v.set_state_class(state.current));
    core.paint(|v| v.set_topping(state.topping));
    core.paint(|v| v.set_held_item(None));
    core.paint(|v| v.set_stats(state.mood.value(), state.energy.value()));
    core.paint(|v| v.hide_bubble());
    core.paint(|v| v.hide_menu());
    for flag in VisualFlag::ALL {
        core.paint(|v| v.set_flag(flag, false));
    }
    for scene in SceneId::ALL {
        core.paint(|v| v.set_scene_visible(scene, false));
    }
    pet_log!("{} is ready (mood {}, energy {})", state.name, state.mood.value(), state.energy.value());
}

pub(super) fn configure<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, config: EngineConfig) {
    core.config = config;
    if let Some(viewport) = core.viewport {
        core.bounds = Bounds::from_viewport(viewport, core.pet_size, &core.config.physics);
    }
    // Restart the fall so the new constants apply from here on
    if let Motion::Falling(body) = &core.motion {
        core.motion = Motion::Falling(PhysicsBody::new(body.pos, body.vel));
    }
}
