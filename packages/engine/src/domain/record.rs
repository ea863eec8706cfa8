//! Persisted snapshot of the pet
//!
//! Stored as JSON under [`STATE_KEY`]. Older builds wrote an unversioned
//! blob under [`LEGACY_KEY`]; it is migrated on first load and removed.

use serde::{Deserialize, Serialize};

use super::errors::PetError;
use super::geometry::Vec2;
use super::settings::{InteractionFrequency, PositionPreset, Settings};
use super::state::{Gauge, PetState, DEFAULT_PET_NAME};
use super::topping::Topping;

pub const STATE_KEY: &str = "toastPet.state";
pub const LEGACY_KEY: &str = "petSettings";
pub const RECORD_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedPosition {
    pub x: f64,
    pub y: f64,
}

impl From<SavedPosition> for Vec2 {
    fn from(p: SavedPosition) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for SavedPosition {
    fn from(v: Vec2) -> Self {
        SavedPosition { x: v.x, y: v.y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedRecord {
    pub version: u32,
    pub name: String,
    pub mood: u8,
    pub energy: u8,
    pub topping: Topping,
    /// Free position after a drag; `None` means "use the preset"
    pub position: Option<SavedPosition>,
    pub settings: Settings,
}

impl Default for PersistedRecord {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            name: DEFAULT_PET_NAME.to_string(),
            mood: Gauge::MAX,
            energy: Gauge::MAX,
            topping: Topping::None,
            position: None,
            settings: Settings::default(),
        }
    }
}

impl PersistedRecord {
    pub fn capture(state: &PetState, position: Option<Vec2>, settings: &Settings) -> Self {
        Self {
            version: RECORD_VERSION,
            name: state.name.clone(),
            mood: state.mood.value(),
            energy: state.energy.value(),
            topping: state.topping,
            position: position.map(SavedPosition::from),
            settings: settings.clone(),
        }
    }

    /// Copy the persisted fields back onto a fresh state
    pub fn restore_into(&self, state: &mut PetState) {
        let name = self.name.trim();
        state.name = if name.is_empty() { DEFAULT_PET_NAME.to_string() } else { name.to_string() };
        state.mood = Gauge::new(self.mood as i64);
        state.energy = Gauge::new(self.energy as i64);
        state.topping = self.topping;
    }
}

pub fn encode(record: &PersistedRecord) -> Result<String, PetError> {
    Ok(serde_json::to_string(record)?)
}

pub fn decode(json: &str) -> Result<PersistedRecord, PetError> {
    let record: PersistedRecord = serde_json::from_str(json)?;
    if record.version > RECORD_VERSION {
        return Err(PetError::RecordVersion { found: record.version, supported: RECORD_VERSION });
    }
    Ok(record)
}

// === Legacy (unversioned) blob ===

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyPosition {
    x: Option<f64>,
    y: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacySettings {
    position: Option<String>,
    interaction_freq: Option<String>,
    sound_enabled: bool,
    notify_enabled: bool,
    auto_sleep: bool,
}

impl Default for LegacySettings {
    fn default() -> Self {
        Self {
            position: None,
            interaction_freq: None,
            sound_enabled: false,
            notify_enabled: true,
            auto_sleep: true,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyRecord {
    name: Option<String>,
    happiness: Option<f64>,
    energy: Option<f64>,
    position: Option<LegacyPosition>,
    settings: Option<LegacySettings>,
}

/// Migrate the old `petSettings` blob. Unknown preset or frequency strings
/// fall back to defaults instead of failing the whole record.
pub fn decode_legacy(json: &str) -> Result<PersistedRecord, PetError> {
    let legacy: LegacyRecord = serde_json::from_str(json)?;
    let mut record = PersistedRecord::default();

    if let Some(name) = legacy.name.filter(|n| !n.trim().is_empty()) {
        record.name = name.trim().to_string();
    }
    if let Some(h) = legacy.happiness {
        record.mood = Gauge::new(h.round() as i64).value();
    }
    if let Some(e) = legacy.energy {
        record.energy = Gauge::new(e.round() as i64).value();
    }
    record.position = legacy.position.and_then(|p| match (p.x, p.y) {
        (Some(x), Some(y)) => Some(SavedPosition { x, y }),
        _ => None,
    });

    let s = legacy.settings.unwrap_or_default();
    record.settings.position = s
        .position
        .and_then(|p| p.parse::<PositionPreset>().ok())
        .unwrap_or_default();
    record.settings.interaction_freq = s
        .interaction_freq
        .and_then(|f| f.parse::<InteractionFrequency>().ok())
        .unwrap_or_default();
    record.settings.sound_enabled = s.sound_enabled;
    record.settings.notify_enabled = s.notify_enabled;
    record.settings.auto_sleep = s.auto_sleep;

    Ok(record)
}
