//! Pet state - the finite state enum, its transition table and the
//! clamped gauges (mood, energy).

use super::topping::{HeldItem, Topping};

/// The pet's current visual state. Exactly one is active at a time and it
/// maps to one CSS class on the pet element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PetStateKind {
    Idle,
    Happy,
    Surprised,
    Sleeping,
    Thinking,
    Waving,
    Walking,
    Bathing,
    Toasting,
    Worried,
}

/// Why a transition is being requested. The table below uses it to keep
/// activity-owned states and sleep from being yanked away by the wrong actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionCause {
    /// Pointer input (click, drag)
    Interaction,
    /// Menu / host action
    Action,
    /// Reaction to a host notification
    Notification,
    /// Activity sequence step, finish or abort
    Activity,
    /// Dwell timer expiry
    Dwell,
    /// Explicit wake from sleep
    Wake,
    /// Physics settled
    Physics,
    /// Ambient timers (auto-sleep, tiredness)
    Auto,
}

impl PetStateKind {
    pub const ALL: [PetStateKind; 10] = [
        PetStateKind::Idle,
        PetStateKind::Happy,
        PetStateKind::Surprised,
        PetStateKind::Sleeping,
        PetStateKind::Thinking,
        PetStateKind::Waving,
        PetStateKind::Walking,
        PetStateKind::Bathing,
        PetStateKind::Toasting,
        PetStateKind::Worried,
    ];

    pub fn css_class(self) -> &'static str {
        match self {
            PetStateKind::Idle => "idle",
            PetStateKind::Happy => "happy",
            PetStateKind::Surprised => "surprised",
            PetStateKind::Sleeping => "sleeping",
            PetStateKind::Thinking => "thinking",
            PetStateKind::Waving => "waving",
            PetStateKind::Walking => "walking",
            PetStateKind::Bathing => "bathing",
            PetStateKind::Toasting => "toasting",
            PetStateKind::Worried => "worried",
        }
    }

    /// States that only an activity sequence may enter or leave
    pub fn is_activity_owned(self) -> bool {
        matches!(self, PetStateKind::Walking | PetStateKind::Bathing | PetStateKind::Toasting)
    }

    /// Default dwell before reverting to idle. `None` means the state is left
    /// by an explicit event instead (activity step, wake, idle itself).
    pub fn dwell_ms(self) -> Option<f64> {
        match self {
            PetStateKind::Happy => Some(2000.0),
            PetStateKind::Surprised => Some(3000.0),
            PetStateKind::Thinking => Some(3000.0),
            PetStateKind::Waving => Some(2000.0),
            PetStateKind::Worried => Some(1500.0),
            PetStateKind::Idle
            | PetStateKind::Sleeping
            | PetStateKind::Walking
            | PetStateKind::Bathing
            | PetStateKind::Toasting => None,
        }
    }

    /// Transition table. Only `idle <-> X` edges exist (plus self-refresh);
    /// callers route `X -> Y` through idle.
    pub fn can_enter(self, to: PetStateKind, cause: TransitionCause) -> bool {
        use PetStateKind::*;

        if self == to {
            return true;
        }
        match (self, to) {
            (Sleeping, Idle) => cause == TransitionCause::Wake,
            (Sleeping, _) => false,
            (from, Idle) if from.is_activity_owned() => cause == TransitionCause::Activity,
            (_, Idle) => true,
            (Idle, target) if target.is_activity_owned() => cause == TransitionCause::Activity,
            (Idle, Sleeping) => matches!(cause, TransitionCause::Action | TransitionCause::Auto),
            (Idle, _) => true,
            _ => false,
        }
    }
}

/// A 0..=100 gauge. Every mutation clamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Gauge(u8);

impl Gauge {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> Self {
        Gauge(value.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn full() -> Self {
        Gauge(Self::MAX)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn adjust(&mut self, delta: i64) -> u8 {
        *self = Gauge::new(self.0 as i64 + delta);
        self.0
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Gauge::full()
    }
}

pub const DEFAULT_PET_NAME: &str = "Toasty";

/// Everything the state controller owns
#[derive(Clone, Debug)]
pub struct PetState {
    pub name: String,
    pub mood: Gauge,
    /// Energy doubles as the toast level
    pub energy: Gauge,
    pub topping: Topping,
    pub current: PetStateKind,
    pub is_busy: bool,
    pub is_dragging: bool,
    pub is_hiding_at_edge: bool,
    pub is_burnt: bool,
    pub holding: Option<HeldItem>,
    pub menu_open: bool,
    pub status_indicator: bool,
    pub visible: bool,
    pub last_interaction_ms: f64,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            name: DEFAULT_PET_NAME.to_string(),
            mood: Gauge::full(),
            energy: Gauge::full(),
            topping: Topping::None,
            current: PetStateKind::Idle,
            is_busy: false,
            is_dragging: false,
            is_hiding_at_edge: false,
            is_burnt: false,
            holding: None,
            menu_open: false,
            status_indicator: false,
            visible: false,
            last_interaction_ms: 0.0,
        }
    }
}

impl PetState {
    pub fn is_sleeping(&self) -> bool {
        self.current == PetStateKind::Sleeping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PetStateKind::*;

    #[test]
    fn gauge_clamps_any_magnitude() {
        for start in [0i64, 1, 50, 99, 100] {
            for delta in [i64::MIN / 2, -1000, -101, -1, 0, 1, 101, 1000, i64::MAX / 2] {
                let mut g = Gauge::new(start);
                let v = g.adjust(delta);
                assert!(v <= 100);
                assert_eq!(v, g.value());
            }
        }
        assert_eq!(Gauge::new(-3).value(), 0);
        assert_eq!(Gauge::new(300).value(), 100);
    }

    #[test]
    fn every_state_has_a_path_back_to_idle() {
        for s in PetStateKind::ALL {
            let back = [
                TransitionCause::Dwell,
                TransitionCause::Wake,
                TransitionCause::Activity,
            ]
            .iter()
            .any(|c| s.can_enter(Idle, *c));
            assert!(back, "{:?} is orphaned", s);
        }
    }

    #[test]
    fn transient_states_have_a_dwell() {
        for s in PetStateKind::ALL {
            if s == Idle || s == Sleeping || s.is_activity_owned() {
                continue;
            }
            assert!(s.dwell_ms().is_some(), "{:?} has no dwell", s);
            assert!(s.can_enter(Idle, TransitionCause::Dwell));
        }
    }

    #[test]
    fn sleep_only_exits_by_wake() {
        assert!(!Sleeping.can_enter(Idle, TransitionCause::Interaction));
        assert!(!Sleeping.can_enter(Happy, TransitionCause::Interaction));
        assert!(!Sleeping.can_enter(Idle, TransitionCause::Dwell));
        assert!(Sleeping.can_enter(Idle, TransitionCause::Wake));
        assert!(!Idle.can_enter(Sleeping, TransitionCause::Interaction));
        assert!(Idle.can_enter(Sleeping, TransitionCause::Auto));
    }

    #[test]
    fn activity_states_are_guarded() {
        assert!(!Idle.can_enter(Walking, TransitionCause::Interaction));
        assert!(Idle.can_enter(Walking, TransitionCause::Activity));
        assert!(!Bathing.can_enter(Idle, TransitionCause::Notification));
        assert!(Bathing.can_enter(Idle, TransitionCause::Activity));
        // no direct non-idle edges
        assert!(!Happy.can_enter(Thinking, TransitionCause::Action));
    }

    #[test]
    fn css_classes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for s in PetStateKind::ALL {
            assert!(seen.insert(s.css_class()));
        }
    }
}
