use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::PetError;
use super::geometry::{Size, Vec2};

/// Corner the pet returns to when it has no saved free position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionPreset {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

const SIDE_MARGIN: f64 = 30.0;
const BOTTOM_MARGIN: f64 = 30.0;
const TOP_MARGIN: f64 = 100.0;

impl PositionPreset {
    pub fn key(self) -> &'static str {
        match self {
            PositionPreset::BottomRight => "bottom-right",
            PositionPreset::BottomLeft => "bottom-left",
            PositionPreset::TopRight => "top-right",
            PositionPreset::TopLeft => "top-left",
        }
    }

    /// Top-left pixel position of a pet of `pet` size anchored to this corner
    pub fn anchor(self, viewport: Size, pet: Size) -> Vec2 {
        let right_x = viewport.w - pet.w - SIDE_MARGIN;
        let bottom_y = viewport.h - pet.h - BOTTOM_MARGIN;
        let pos = match self {
            PositionPreset::BottomRight => Vec2::new(right_x, bottom_y),
            PositionPreset::BottomLeft => Vec2::new(SIDE_MARGIN, bottom_y),
            PositionPreset::TopRight => Vec2::new(right_x, TOP_MARGIN),
            PositionPreset::TopLeft => Vec2::new(SIDE_MARGIN, TOP_MARGIN),
        };
        Vec2::new(pos.x.max(0.0), pos.y.max(0.0))
    }
}

impl FromStr for PositionPreset {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bottom-right" => Ok(PositionPreset::BottomRight),
            "bottom-left" => Ok(PositionPreset::BottomLeft),
            "top-right" => Ok(PositionPreset::TopRight),
            "top-left" => Ok(PositionPreset::TopLeft),
            other => Err(PetError::unknown("position preset", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionFrequency {
    High,
    #[default]
    Medium,
    Low,
}

impl InteractionFrequency {
    pub fn key(self) -> &'static str {
        match self {
            InteractionFrequency::High => "high",
            InteractionFrequency::Medium => "medium",
            InteractionFrequency::Low => "low",
        }
    }

    /// Interval between idle-chatter attempts
    pub fn auto_talk_interval_ms(self) -> f64 {
        match self {
            InteractionFrequency::High => 30_000.0,
            InteractionFrequency::Medium => 60_000.0,
            InteractionFrequency::Low => 180_000.0,
        }
    }

    /// Inactivity before an autonomous activity is picked
    pub fn idle_activity_timeout_ms(self) -> f64 {
        match self {
            InteractionFrequency::High => 20_000.0,
            InteractionFrequency::Medium => 45_000.0,
            InteractionFrequency::Low => 90_000.0,
        }
    }

    /// Probability that an idle-chatter attempt is actually spoken
    pub fn chatter_pass_probability(self) -> f32 {
        match self {
            InteractionFrequency::High => 0.8,
            InteractionFrequency::Medium => 0.5,
            InteractionFrequency::Low => 0.3,
        }
    }
}

impl FromStr for InteractionFrequency {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "high" => Ok(InteractionFrequency::High),
            "medium" => Ok(InteractionFrequency::Medium),
            "low" => Ok(InteractionFrequency::Low),
            other => Err(PetError::unknown("interaction frequency", other)),
        }
    }
}

/// User-editable settings, persisted as part of the saved record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub position: PositionPreset,
    pub interaction_freq: InteractionFrequency,
    pub auto_sleep: bool,
    pub auto_activity: bool,
    pub physics_enabled: bool,
    pub notify_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            position: PositionPreset::BottomRight,
            interaction_freq: InteractionFrequency::Medium,
            auto_sleep: true,
            auto_activity: true,
            physics_enabled: true,
            notify_enabled: true,
            sound_enabled: false,
        }
    }
}

/// What the settings form submits
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub name: String,
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_anchor_inside_viewport() {
        let vp = Size::new(1280.0, 720.0);
        let pet = Size::new(120.0, 120.0);
        assert_eq!(PositionPreset::BottomRight.anchor(vp, pet), Vec2::new(1130.0, 570.0));
        assert_eq!(PositionPreset::TopLeft.anchor(vp, pet), Vec2::new(30.0, 100.0));
        // tiny viewport never goes negative
        let p = PositionPreset::BottomRight.anchor(Size::new(50.0, 50.0), pet);
        assert_eq!(p, Vec2::zero());
    }

    #[test]
    fn parses_form_values() {
        assert_eq!("top-left".parse::<PositionPreset>().unwrap(), PositionPreset::TopLeft);
        assert_eq!(" low ".parse::<InteractionFrequency>().unwrap(), InteractionFrequency::Low);
        assert!("sideways".parse::<PositionPreset>().is_err());
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let s: Settings = serde_json::from_str(r#"{"interactionFreq":"high","autoActivity":false}"#).unwrap();
        assert_eq!(s.interaction_freq, InteractionFrequency::High);
        assert!(!s.auto_activity);
        assert!(s.physics_enabled);
        assert_eq!(s.position, PositionPreset::BottomRight);
    }

    #[test]
    fn lower_frequency_talks_less() {
        assert!(
            InteractionFrequency::Low.chatter_pass_probability()
                < InteractionFrequency::High.chatter_pass_probability()
        );
        assert!(
            InteractionFrequency::Low.auto_talk_interval_ms()
                > InteractionFrequency::High.auto_talk_interval_ms()
        );
    }
}
