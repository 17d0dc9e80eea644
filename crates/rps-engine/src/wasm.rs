//! WASM bindings for the browser front end

#![cfg(feature = "wasm")]

use chrono::{DateTime, Utc};
use wasm_bindgen::prelude::*;

use crate::strategy::describe_difficulty;
use crate::{Choice, Difficulty, GameSession, Mode, PlayerMove, SeededRng, Settings};

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// One game session owned by the page.
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameSession<SeededRng>,
}

#[wasm_bindgen]
impl WasmGame {
    /// # Arguments
    /// * `seed` - 32 random bytes from the page
    /// * `settings_json` - JSON serialized Settings, `{}` for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(seed: &[u8], settings_json: &str) -> Result<WasmGame, JsError> {
        let seed_arr: [u8; 32] = seed.try_into()
            .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))?;
        let settings = Settings::from_json(settings_json).map_err(js_err)?;
        Ok(WasmGame { inner: GameSession::new(settings, SeededRng::new(&seed_arr, 0)) })
    }

    /// Play one round. Returns a JSON serialized RoundResult.
    pub fn play(&mut self, choice: &str, mode: &str, difficulty: &str) -> Result<JsValue, JsError> {
        let mv = PlayerMove::new(
            choice.parse::<Choice>().map_err(js_err)?,
            mode.parse::<Mode>().map_err(js_err)?,
            difficulty.parse::<Difficulty>().map_err(js_err)?,
        );
        let result = self.inner.play_at(mv, now()).map_err(js_err)?;
        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    pub fn configure(&mut self, settings_json: &str) -> Result<(), JsError> {
        let settings = Settings::from_json(settings_json).map_err(js_err)?;
        self.inner.configure(settings);
        Ok(())
    }

    pub fn summary(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.summary())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    pub fn snapshot(&self) -> Result<String, JsError> {
        self.inner.snapshot().map_err(js_err)
    }

    /// Load a saved snapshot.
    ///
    /// Never throws. A bad snapshot leaves a fresh game and the reason is
    /// returned as a string.
    pub fn restore(&mut self, snapshot: &str) -> Option<String> {
        self.inner.restore(snapshot).map(|e| e.to_string())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&mut self) {
        self.inner.clear_history();
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsError> {
        self.inner.export_json().map_err(js_err)
    }

    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> Result<String, JsError> {
        self.inner.export_csv().map_err(js_err)
    }
}

#[derive(serde::Serialize)]
struct DifficultyInfo {
    id: &'static str,
    description: &'static str,
}

/// Get all difficulty tiers with descriptions
#[wasm_bindgen]
pub fn get_difficulty_types() -> Result<JsValue, JsError> {
    let types: Vec<_> = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        .into_iter()
        .map(|d| DifficultyInfo { id: d.as_str(), description: describe_difficulty(d) })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Choices valid in a mode, in display order
#[wasm_bindgen]
pub fn get_mode_choices(mode: &str) -> Result<JsValue, JsError> {
    let mode: Mode = mode.parse().map_err(js_err)?;
    serde_wasm_bindgen::to_value(mode.choices())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
