use std::collections::VecDeque;

use crate::domain::actions::ActivityKind;
use crate::domain::config::ActivityConfig;
use crate::domain::dialogue::DialogueCategory as Say;
use crate::domain::scene::SceneId;
use crate::domain::state::PetStateKind;

use super::script::{Effect, Step, WalkTarget};

/// Build the step queue for `kind`. `chained` marks a follow-up inside the
/// pick-fruit -> bathe -> hide chain.
pub fn script_for(kind: ActivityKind, chained: bool, cfg: &ActivityConfig) -> VecDeque<Step> {
    let steps: Vec<Step> = match kind {
        ActivityKind::PickFruit => vec![
            Step::ShowScene(SceneId::Bush),
            Step::Say(Say::FruitStart),
            Step::WalkTo(WalkTarget::Scene(SceneId::Bush)),
            Step::Enter(PetStateKind::Thinking),
            Step::Wait(cfg.pick_ms),
            Step::Mutate(Effect::HoldRandomFruit),
            Step::Say(Say::FruitFound),
            Step::Enter(PetStateKind::Idle),
            Step::HideScene(SceneId::Bush),
            Step::Chain(ActivityKind::Bathe),
        ],
        ActivityKind::Bathe => {
            let mut s = vec![
                Step::ShowScene(SceneId::Bathtub),
                Step::Say(Say::BathStart),
                Step::WalkTo(WalkTarget::Scene(SceneId::Bathtub)),
                Step::Enter(PetStateKind::Bathing),
                Step::Mutate(Effect::WashUp),
                Step::Wait(cfg.bathe_ms),
                Step::Enter(PetStateKind::Idle),
                Step::HideScene(SceneId::Bathtub),
            ];
            if chained {
                s.push(Step::Chain(ActivityKind::HideAtEdge));
            } else {
                s.push(Step::WalkTo(WalkTarget::Home));
            }
            s
        }
        ActivityKind::HideAtEdge => vec![
            Step::Say(Say::HideStart),
            Step::WalkTo(WalkTarget::Edge),
            Step::Mutate(Effect::SetHiding(true)),
            Step::Say(Say::Peek),
            Step::Wait(cfg.peek_ms),
            Step::Mutate(Effect::EatHeld),
            Step::Mutate(Effect::SetHiding(false)),
            Step::WalkTo(WalkTarget::Home),
        ],
        ActivityKind::Toast => vec![
            Step::ShowScene(SceneId::Toaster),
            Step::Say(Say::ToastStart),
            Step::WalkTo(WalkTarget::Scene(SceneId::Toaster)),
            Step::Enter(PetStateKind::Toasting),
            Step::Wait(cfg.toast_ms),
            Step::Mutate(Effect::ToastUp),
            Step::Enter(PetStateKind::Idle),
            Step::HideScene(SceneId::Toaster),
            Step::WalkTo(WalkTarget::Home),
        ],
    };
    steps.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shown_scene_is_hidden() {
        let cfg = ActivityConfig::default();
        for kind in ActivityKind::ALL {
            for chained in [false, true] {
                let script = script_for(kind, chained, &cfg);
                for scene in SceneId::ALL {
                    let shown = script.iter().filter(|s| **s == Step::ShowScene(scene)).count();
                    let hidden = script.iter().filter(|s| **s == Step::HideScene(scene)).count();
                    assert_eq!(shown, hidden, "{:?} {:?}", kind, scene);
                }
            }
        }
    }

    #[test]
    fn chain_goes_fruit_bath_hide() {
        let cfg = ActivityConfig::default();
        assert_eq!(
            script_for(ActivityKind::PickFruit, false, &cfg).back(),
            Some(&Step::Chain(ActivityKind::Bathe))
        );
        assert_eq!(
            script_for(ActivityKind::Bathe, true, &cfg).back(),
            Some(&Step::Chain(ActivityKind::HideAtEdge))
        );
        // a standalone bath walks home instead
        assert_eq!(
            script_for(ActivityKind::Bathe, false, &cfg).back(),
            Some(&Step::WalkTo(WalkTarget::Home))
        );
        assert!(!script_for(ActivityKind::HideAtEdge, true, &cfg)
            .iter()
            .any(|s| matches!(s, Step::Chain(_))));
    }

    #[test]
    fn waits_use_configured_durations() {
        let cfg = ActivityConfig { toast_ms: 10.0, ..ActivityConfig::default() };
        assert!(script_for(ActivityKind::Toast, false, &cfg).contains(&Step::Wait(10.0)));
    }
}
