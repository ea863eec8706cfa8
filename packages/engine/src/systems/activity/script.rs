use crate::domain::actions::ActivityKind;
use crate::domain::dialogue::DialogueCategory;
use crate::domain::scene::SceneId;
use crate::domain::state::PetStateKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WalkTarget {
    /// Beside the prop, or inside it for enterable props
    Scene(SceneId),
    /// Nearest horizontal edge, mostly off-screen
    Edge,
    /// Back to where the sequence started
    Home,
}

/// State changes an activity performs. The core decides the accompanying
/// speech because it depends on what the pet is holding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    HoldRandomFruit,
    /// Clears topping and burnt mark, mood up
    WashUp,
    /// Eats the held fruit if there is one
    EatHeld,
    /// Energy up, then burnt or a random spread
    ToastUp,
    SetHiding(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    ShowScene(SceneId),
    HideScene(SceneId),
    WalkTo(WalkTarget),
    Enter(PetStateKind),
    Say(DialogueCategory),
    Wait(f64),
    Mutate(Effect),
    /// Replace the remaining script with a follow-up activity
    Chain(ActivityKind),
}

impl Step {
    /// Steps that suspend the sequence until a timer or walk completes
    pub fn suspends(&self) -> bool {
        matches!(self, Step::Wait(_) | Step::WalkTo(_))
    }
}
