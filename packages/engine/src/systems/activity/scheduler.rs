use crate::core::random::Rng;
use crate::domain::actions::ActivityKind;
use crate::domain::config::ActivityWeights;

pub fn weights(w: &ActivityWeights) -> [(ActivityKind, f32); 4] {
    [
        (ActivityKind::PickFruit, w.pick_fruit),
        (ActivityKind::Bathe, w.bathe),
        (ActivityKind::HideAtEdge, w.hide_at_edge),
        (ActivityKind::Toast, w.toast),
    ]
}

/// Weighted categorical choice; `None` when every weight is zero
pub fn pick(rng: &mut Rng, w: &ActivityWeights) -> Option<ActivityKind> {
    rng.weighted(&weights(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_follow_weights() {
        let mut rng = Rng::new(99);
        let w = ActivityWeights::default();
        let mut counts = [0u32; 4];
        for _ in 0..20_000 {
            match pick(&mut rng, &w) {
                Some(ActivityKind::PickFruit) => counts[0] += 1,
                Some(ActivityKind::Bathe) => counts[1] += 1,
                Some(ActivityKind::HideAtEdge) => counts[2] += 1,
                Some(ActivityKind::Toast) => counts[3] += 1,
                None => panic!("no pick"),
            }
        }
        assert!(counts[0] > counts[1] && counts[1] > counts[2] && counts[2] > counts[3]);
        assert!(counts[3] > 2000);
    }

    #[test]
    fn zero_weights_disable() {
        let mut rng = Rng::new(1);
        let w = ActivityWeights { pick_fruit: 0.0, bathe: 0.0, hide_at_edge: 0.0, toast: 0.0 };
        assert_eq!(pick(&mut rng, &w), None);
        let only_toast = ActivityWeights { toast: 1.0, ..w };
        assert_eq!(pick(&mut rng, &only_toast), Some(ActivityKind::Toast));
    }
}
