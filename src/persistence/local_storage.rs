//! Browser LocalStorage record store (wasm32)

use web_sys::Storage;

use super::{PersistenceError, RecordStore, decode_records};
use crate::records::Record;
use crate::sim::GameKind;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("LocalStorage not available".into()))
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> PersistenceError {
    PersistenceError::Storage(format!("{:?}", e))
}

impl RecordStore for LocalStorageStore {
    fn fetch_records(&self, kind: GameKind) -> Result<Vec<Record>, PersistenceError> {
        let storage = Self::storage()?;
        let json = storage.get_item(&kind.storage_key()).map_err(js_err)?;
        Ok(json
            .map(|json| decode_records(kind, &json).into_records())
            .unwrap_or_default())
    }

    fn append_record(&mut self, kind: GameKind, record: &Record) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        let key = kind.storage_key();
        let mut book = storage
            .get_item(&key)
            .map_err(js_err)?
            .map(|json| decode_records(kind, &json))
            .unwrap_or_default();
        book.insert(record.clone());

        let json = serde_json::to_string(book.entries())?;
        storage.set_item(&key, &json).map_err(js_err)?;
        log::info!("{} records saved ({} entries)", kind.as_str(), book.len());
        Ok(())
    }

    fn clear_records(&mut self, kind: GameKind) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        storage.remove_item(&kind.storage_key()).map_err(js_err)?;
        log::info!("{} records cleared", kind.as_str());
        Ok(())
    }
}
