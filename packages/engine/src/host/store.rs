use crate::domain::errors::{PetError, PetResult};

/// String key/value persistence (localStorage-shaped)
pub trait SettingsStore {
    fn load(&self, key: &str) -> PetResult<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> PetResult<()>;
    fn remove(&mut self, key: &str) -> PetResult<()>;
}

/// `window.localStorage`
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn new() -> PetResult<Self> {
        let window = web_sys::window().ok_or_else(|| PetError::Storage("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| PetError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| PetError::Storage("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl SettingsStore for LocalStorageStore {
    fn load(&self, key: &str) -> PetResult<Option<String>> {
        self.storage.get_item(key).map_err(|e| PetError::Storage(format!("{:?}", e)))
    }

    fn save(&mut self, key: &str, value: &str) -> PetResult<()> {
        // Quota errors land here
        self.storage.set_item(key, value).map_err(|e| PetError::Storage(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> PetResult<()> {
        self.storage.remove_item(key).map_err(|e| PetError::Storage(format!("{:?}", e)))
    }
}
