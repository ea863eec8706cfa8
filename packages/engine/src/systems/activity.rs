//! Activity System - autonomous scene visits
//!
//! An activity is a queue of [`Step`]s. The core pops steps in order; the
//! only suspension points are `Wait` (an activity-scoped timer) and `WalkTo`
//! (a walk tween advanced by `tick`). Nothing here touches the view.
//!
//! - script    - step vocabulary
//! - catalog   - the four scripts and their chaining
//! - walk      - eased walk tween
//! - scheduler - weighted pick

mod catalog;
mod scheduler;
mod script;
mod walk;

use std::collections::VecDeque;

pub use catalog::script_for;
pub use scheduler::{pick, weights};
pub use script::{Effect, Step, WalkTarget};
pub use walk::{ease_in_out, Walk};

use crate::domain::actions::ActivityKind;
use crate::domain::config::ActivityConfig;
use crate::domain::geometry::Vec2;

/// A running activity sequence
#[derive(Clone, Debug)]
pub struct ActivityRun {
    pub kind: ActivityKind,
    /// Reached through a chain rather than started directly
    pub chained: bool,
    /// Where the pet stood before the first activity of the chain
    pub home: Vec2,
    steps: VecDeque<Step>,
}

impl ActivityRun {
    pub fn new(kind: ActivityKind, home: Vec2, cfg: &ActivityConfig) -> Self {
        Self { kind, chained: false, home, steps: script_for(kind, false, cfg) }
    }

    /// Follow-up activity; keeps the original home position
    pub fn chain(&self, kind: ActivityKind, cfg: &ActivityConfig) -> Self {
        Self { kind, chained: true, home: self.home, steps: script_for(kind, true, cfg) }
    }

    pub fn next_step(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scene::SceneId;

    #[test]
    fn chain_keeps_home() {
        let cfg = ActivityConfig::default();
        let run = ActivityRun::new(ActivityKind::PickFruit, Vec2::new(5.0, 6.0), &cfg);
        let next = run.chain(ActivityKind::Bathe, &cfg);
        assert!(next.chained);
        assert_eq!(next.home, Vec2::new(5.0, 6.0));
        assert_eq!(next.kind, ActivityKind::Bathe);
    }

    #[test]
    fn steps_pop_in_order() {
        let cfg = ActivityConfig::default();
        let mut run = ActivityRun::new(ActivityKind::Toast, Vec2::zero(), &cfg);
        assert_eq!(run.next_step(), Some(Step::ShowScene(SceneId::Toaster)));
        let before = run.remaining();
        run.next_step();
        assert_eq!(run.remaining(), before - 1);
    }
}
