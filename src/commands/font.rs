use std::sync::{Mutex, MutexGuard, PoisonError};

use tauri::State;

use crate::font::{FontScales, ScaleStore, LOG_TARGET};

/// Event emitted to the frontend after every font-scale publication.
pub const FONT_SCALES_CHANGED: &str = "font-scales-changed";

/// The process-wide store, held in Tauri managed state.
pub struct FontState(pub Mutex<ScaleStore>);

impl FontState {
    pub fn new(store: ScaleStore) -> Self {
        Self(Mutex::new(store))
    }

    /// Every mutation updates memory before it publishes, so a subscriber
    /// that panics mid-publication can at worst skip a storage write. The
    /// lock is taken back instead of failing every later command.
    pub fn lock(&self) -> MutexGuard<'_, ScaleStore> {
        self.0.lock().unwrap_or_else(|poisoned| {
            log::warn!(target: LOG_TARGET, "Recovering font scale store after a panic");
            PoisonError::into_inner(poisoned)
        })
    }
}

// ── Font Scales ──────────────────────────────────────────────────────────────

#[tauri::command]
pub fn get_font_scales(state: State<'_, FontState>) -> FontScales {
    FontScales::from_store(&state.lock())
}

/// Returns the applied (clamped) scale so the selector can reconcile.
#[tauri::command]
pub fn set_font_scale(state: State<'_, FontState>, key: String, scale: i64) -> Result<u8, String> {
    state
        .lock()
        .set_scale_named(&key, scale)
        .map(u8::from)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn reset_font_scales(state: State<'_, FontState>) -> FontScales {
    let mut store = state.lock();
    store.reset();
    FontScales::from_store(&store)
}

// ── Tests ───────────────────────────────────────────────────────────────────
