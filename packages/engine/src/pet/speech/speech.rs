use crate::core::timers::TimerScope;
use crate::domain::dialogue::DialogueCategory;
use crate::host::store::SettingsStore;
use crate::host::view::PetView;
use crate::systems::speech::{self, SpeechKind};

use super::{PetCore, PetTimer};

/// Show `text` for `duration_ms`, superseding any pending hide
pub(super) fn say_text<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    text: &str,
    marker: Option<&str>,
    duration_ms: f64,
    now_ms: f64,
) -> bool {
    let Some(line) = core.speech.present(text, marker) else {
        return false;
    };
    core.paint(|v| v.show_bubble(&line));
    core.timers.replace(TimerScope::Pet, now_ms, duration_ms, PetTimer::SpeechHide);
    true
}

/// Random line from `category`. Chatter may be dropped by the frequency roll.
pub(super) fn say_phrase<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    category: DialogueCategory,
    kind: SpeechKind,
    now_ms: f64,
) -> bool {
    let duration = core.config.speech.default_ms;
    say_phrase_for(core, category, kind, None, duration, now_ms)
}

pub(super) fn say_phrase_for<V: PetView, S: SettingsStore>(
    core: &mut PetCore<V, S>,
    category: DialogueCategory,
    kind: SpeechKind,
    marker: Option<&str>,
    duration_ms: f64,
    now_ms: f64,
) -> bool {
    if kind == SpeechKind::Chatter && !speech::should_chatter(&mut core.rng, core.settings.interaction_freq) {
        return false;
    }
    let text = speech::phrase(&mut core.rng, category);
    say_text(core, text, marker, duration_ms, now_ms)
}

pub(super) fn hide<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>) {
    core.speech.hide();
    core.timers.cancel_event(&PetTimer::SpeechHide);
    core.paint(|v| v.hide_bubble());
}
