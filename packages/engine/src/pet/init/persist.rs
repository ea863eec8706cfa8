use crate::domain::errors::PetError;
use crate::domain::record::{self, PersistedRecord, LEGACY_KEY, STATE_KEY};
use crate::host::store::SettingsStore;
use crate::host::view::PetView;

use super::PetCore;

/// Current record, the migrated legacy blob, or defaults. Never fails.
pub(super) fn load_record<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>) -> PersistedRecord {
    match core.store.load(STATE_KEY) {
        Ok(Some(json)) => match record::decode(&json) {
            Ok(rec) => return rec,
            Err(e @ PetError::RecordVersion { .. }) => {
                pet_warn!("saved pet ignored, saving disabled: {}", e);
                core.persist_blocked = true;
                return PersistedRecord::default();
            }
            Err(e) => {
                pet_error!("saved pet is unreadable: {}", e);
                return PersistedRecord::default();
            }
        },
        Ok(None) => {}
        Err(e) => {
            core.report("load", e);
            return PersistedRecord::default();
        }
    }

    match core.store.load(LEGACY_KEY) {
        Ok(Some(json)) => match record::decode_legacy(&json) {
            Ok(rec) => {
                migrate(core, &rec);
                rec
            }
            Err(e) => {
                pet_warn!("legacy pet settings ignored: {}", e);
                PersistedRecord::default()
            }
        },
        Ok(None) => PersistedRecord::default(),
        Err(e) => {
            core.report("load", e);
            PersistedRecord::default()
        }
    }
}

fn migrate<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>, rec: &PersistedRecord) {
    let saved = record::encode(rec).and_then(|json| core.store.save(STATE_KEY, &json));
    match saved {
        Ok(()) => {
            if let Err(e) = core.store.remove(LEGACY_KEY) {
                core.report("migrate", e);
            }
            pet_log!("migrated legacy pet settings");
        }
        // Keep the legacy blob so the next load can retry
        Err(e) => core.report("migrate", e),
    }
}

pub(super) fn save<V: PetView, S: SettingsStore>(core: &mut PetCore<V, S>) {
    if core.persist_blocked {
        return;
    }
    let rec = PersistedRecord::capture(&core.state, core.free_position, &core.settings);
    let saved = record::encode(&rec).and_then(|json| core.store.save(STATE_KEY, &json));
    if let Err(e) = saved {
        core.report("save", e);
    }
}
