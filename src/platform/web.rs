//! Browser binding
//!
//! The page owns the animation loop and the sprites; it creates a
//! `WebSession`, forwards key presses as command names, and calls `frame`
//! from `requestAnimationFrame`. Frames return JSON so the page never
//! touches Rust types.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorageStore;
use crate::runner::SessionRunner;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameKind, SessionView};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Pet arcade loaded");
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    view: SessionView,
    events: &'a [GameEvent],
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Current harness settings as JSON
#[wasm_bindgen(js_name = loadSettings)]
pub fn load_settings() -> Result<String, JsValue> {
    to_json(&Settings::load())
}

/// Store settings JSON; applies to sessions created afterwards
#[wasm_bindgen(js_name = saveSettings)]
pub fn save_settings(json: &str) -> Result<(), JsValue> {
    Settings::from_json(json)
        .save()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct WebSession {
    runner: SessionRunner<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebSession {
    /// `game` is "ball_dodge" or "meteor_shower" (aliases accepted)
    #[wasm_bindgen(constructor)]
    pub fn new(game: &str) -> Result<WebSession, JsValue> {
        let kind = GameKind::parse(game)
            .ok_or_else(|| JsValue::from_str(&format!("unknown game: {}", game)))?;
        let runner = SessionRunner::new(kind, Settings::load(), LocalStorageStore::new());
        Ok(Self { runner })
    }

    /// Queue a command by name; returns false for unknown names
    pub fn command(&mut self, name: &str) -> bool {
        self.runner.send_str(name)
    }

    pub fn start(&mut self) {
        self.runner.start();
    }

    /// Advance to `now_ms` and return `{ view, events }` as JSON
    pub fn frame(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let events = self.runner.frame(now_ms);
        to_json(&FrameOutput {
            view: self.runner.view(),
            events: &events,
        })
    }

    pub fn view(&self) -> Result<String, JsValue> {
        to_json(&self.runner.view())
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    /// Leave without recording anything
    pub fn exit(&mut self) {
        self.runner.exit();
    }

    /// Stored records for this game as JSON
    pub fn records(&self) -> Result<String, JsValue> {
        to_json(&self.runner.records())
    }

    #[wasm_bindgen(js_name = clearRecords)]
    pub fn clear_records(&mut self) {
        self.runner.ledger_mut().clear();
    }
}
