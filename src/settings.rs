//! Harness settings
//!
//! Timing knobs for the session runner. Persisted separately from records:
//! a JSON file natively, LocalStorage in the browser. Missing fields take
//! their defaults; unreadable data falls back to defaults entirely.

use serde::{Deserialize, Serialize};

use crate::consts::{ANIM_FRAME_MS, MAX_FRAME_DELTA_MS, MAX_SUBSTEPS, TICK_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical update period (ms)
    pub tick_ms: f32,
    /// Ticks run per host frame at most
    pub max_substeps: u32,
    /// Host frame deltas above this are clamped (ms)
    pub max_frame_delta_ms: f32,
    /// Sprite animation period (ms)
    pub anim_frame_ms: f32,
    /// Fixed RNG seed; `None` draws a fresh one per session
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            max_substeps: MAX_SUBSTEPS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            anim_frame_ms: ANIM_FRAME_MS,
            seed: None,
        }
    }
}

impl Settings {
    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.tick_ms.is_finite() && self.tick_ms > 0.0) {
            self.tick_ms = defaults.tick_ms;
        }
        if self.max_substeps == 0 {
            self.max_substeps = defaults.max_substeps;
        }
        if !(self.max_frame_delta_ms.is_finite() && self.max_frame_delta_ms >= self.tick_ms) {
            self.max_frame_delta_ms = defaults.max_frame_delta_ms.max(self.tick_ms);
        }
        if !(self.anim_frame_ms.is_finite() && self.anim_frame_ms > 0.0) {
            self.anim_frame_ms = defaults.anim_frame_ms;
        }
        self
    }

    /// Parse settings JSON, falling back to defaults when it is malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pet_arcade_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), crate::PersistenceError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| crate::PersistenceError::Unavailable("LocalStorage not available".into()))?;
        let json = serde_json::to_string(self)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| crate::PersistenceError::Storage(format!("{:?}", e)))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from a JSON file; a missing file yields defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {}", path.display(), e);
                }
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, replacing the file atomically
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), crate::PersistenceError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        std::fs::rename(&tmp, path)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
