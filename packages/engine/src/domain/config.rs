//! Engine tuning - physics constants, input thresholds, activity timings.
//!
//! Every field has a default; hosts may override any subset from JSON:
//!
//! ```rust
//! use toast_pet_engine::domain::config::EngineConfig;
//!
//! let cfg = EngineConfig::from_json(r#"{ "physics": { "bounce": 0.5 } }"#).unwrap();
//! assert_eq!(cfg.physics.bounce, 0.5);
//! assert_eq!(cfg.physics.gravity, 0.5);
//! ```

use serde::Deserialize;

use super::errors::PetError;
use super::geometry::Size;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub physics: PhysicsConfig,
    pub input: InputConfig,
    pub activity: ActivityConfig,
    pub speech: SpeechConfig,
    pub ambient: AmbientConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, PetError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject ranges the engine cannot work with
    pub fn validate(&self) -> Result<(), PetError> {
        let a = &self.activity;
        let finite = a.walk_min_ms.is_finite() && a.walk_max_ms.is_finite();
        if !finite || a.walk_min_ms < 0.0 || a.walk_min_ms > a.walk_max_ms {
            return Err(PetError::InvalidConfig(format!(
                "walkMinMs {} must be between 0 and walkMaxMs {}",
                a.walk_min_ms, a.walk_max_ms
            )));
        }
        Ok(())
    }
}

/// Units are CSS px and animation frames
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    /// px/frame² added to vy each frame
    pub gravity: f64,
    /// Speed cap (px/frame)
    pub max_speed: f64,
    /// Horizontal damping while airborne
    pub air_friction: f64,
    /// Horizontal damping while sliding on the floor
    pub ground_friction: f64,
    /// Fraction of speed kept after hitting a bound
    pub bounce: f64,
    /// Velocities below this are zeroed
    pub epsilon: f64,
    /// Impact speed that triggers the squash pulse
    pub squash_impact: f64,
    /// Hard cap on integration frames per fall
    pub max_frames: u32,
    /// Gap between the floor bound and the viewport bottom
    pub floor_margin: f64,
    /// Nominal frame length used to convert px/ms into px/frame
    pub frame_ms: f64,
    /// Most frames integrated in one tick after a stall
    pub max_catch_up_frames: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            max_speed: 40.0,
            air_friction: 0.99,
            ground_friction: 0.8,
            bounce: 0.3,
            epsilon: 0.5,
            squash_impact: 8.0,
            max_frames: 600,
            floor_margin: 30.0,
            frame_ms: 16.0,
            max_catch_up_frames: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputConfig {
    /// Pointer travel before a press becomes a drag
    pub drag_slop_px: f64,
    /// Drag speed (px/ms) that makes the pet worried
    pub worried_speed: f64,
    /// Release speed (px/frame) that counts as a throw
    pub fling_speed: f64,
    /// Height above the floor still treated as resting
    pub rest_tolerance_px: f64,
    /// Release samples older than this carry no velocity
    pub release_stale_ms: f64,
    pub long_press_ms: f64,
    pub menu_margin: f64,
    pub menu_width: f64,
    pub menu_height: f64,
    pub eye_max_offset: f64,
    pub eye_distance_divisor: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_slop_px: 4.0,
            worried_speed: 1.2,
            fling_speed: 6.0,
            rest_tolerance_px: 2.0,
            release_stale_ms: 100.0,
            long_press_ms: 600.0,
            menu_margin: 10.0,
            menu_width: 200.0,
            menu_height: 260.0,
            eye_max_offset: 3.0,
            eye_distance_divisor: 50.0,
        }
    }
}

impl InputConfig {
    pub fn menu_size(&self) -> Size {
        Size::new(self.menu_width, self.menu_height)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityWeights {
    pub pick_fruit: f32,
    pub bathe: f32,
    pub hide_at_edge: f32,
    pub toast: f32,
}

impl Default for ActivityWeights {
    fn default() -> Self {
        Self {
            pick_fruit: 0.35,
            bathe: 0.30,
            hide_at_edge: 0.20,
            toast: 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityConfig {
    pub weights: ActivityWeights,
    /// Walking speed (px/ms)
    pub walk_speed: f64,
    pub walk_min_ms: f64,
    pub walk_max_ms: f64,
    /// Distance between the pet and a freshly placed scene
    pub scene_gap: f64,
    /// Gap kept when standing beside a scene
    pub stand_gap: f64,
    /// Fraction of the pet left on-screen while hiding at an edge
    pub edge_peek_fraction: f64,
    pub pick_ms: f64,
    pub bathe_ms: f64,
    pub peek_ms: f64,
    pub toast_ms: f64,
    pub toast_gain: i64,
    /// Energy at or above which toasting burns
    pub burn_level: u8,
    pub burnt_ms: f64,
    pub bathe_mood_gain: i64,
    pub eat_mood_gain: i64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            weights: ActivityWeights::default(),
            walk_speed: 0.25,
            walk_min_ms: 300.0,
            walk_max_ms: 4000.0,
            scene_gap: 120.0,
            stand_gap: 8.0,
            edge_peek_fraction: 0.4,
            pick_ms: 1200.0,
            bathe_ms: 3000.0,
            peek_ms: 4000.0,
            toast_ms: 2500.0,
            toast_gain: 35,
            burn_level: 75,
            burnt_ms: 8000.0,
            bathe_mood_gain: 10,
            eat_mood_gain: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechConfig {
    pub default_ms: f64,
    pub short_ms: f64,
    pub long_ms: f64,
    /// Chance of a drag-end remark
    pub drag_remark_chance: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_ms: 4000.0,
            short_ms: 3000.0,
            long_ms: 6000.0,
            drag_remark_chance: 0.5,
        }
    }
}

/// Background timers that keep the pet alive between interactions
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmbientConfig {
    pub greet_delay_ms: f64,
    pub status_interval_ms: f64,
    pub energy_decay: i64,
    pub tired_threshold: u8,
    pub tired_sleep_delay_ms: f64,
    pub auto_sleep_ms: f64,
    pub sleep_recover_interval_ms: f64,
    pub sleep_recover_amount: i64,
    pub notify_dwell_ms: f64,
    pub summary_reveal_ms: f64,
    pub squash_ms: f64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            greet_delay_ms: 1000.0,
            status_interval_ms: 60_000.0,
            energy_decay: 2,
            tired_threshold: 20,
            tired_sleep_delay_ms: 3000.0,
            auto_sleep_ms: 300_000.0,
            sleep_recover_interval_ms: 10_000.0,
            sleep_recover_amount: 5,
            notify_dwell_ms: 3000.0,
            summary_reveal_ms: 2000.0,
            squash_ms: 250.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = EngineConfig::from_json(
            r#"{ "activity": { "weights": { "toast": 1.0 } }, "input": { "worriedSpeed": 2.0 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.activity.weights.toast, 1.0);
        assert_eq!(cfg.activity.weights.pick_fruit, 0.35);
        assert_eq!(cfg.input.worried_speed, 2.0);
        assert_eq!(cfg.physics, PhysicsConfig::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(EngineConfig::from_json("{ nope"), Err(PetError::Serde(_))));
    }

    #[test]
    fn inverted_walk_range_is_rejected() {
        let err = EngineConfig::from_json(r#"{ "activity": { "walkMinMs": 5000, "walkMaxMs": 100 } }"#);
        assert!(matches!(err, Err(PetError::InvalidConfig(_))));
        assert!(EngineConfig::from_json(r#"{ "activity": { "walkMinMs": 100, "walkMaxMs": 100 } }"#).is_ok());
    }

    #[test]
    fn damping_factors_are_below_one() {
        let p = PhysicsConfig::default();
        assert!(p.bounce < 1.0 && p.air_friction < 1.0 && p.ground_friction < 1.0);
    }
}
