//! Font-scale preferences — the session and UI text-size multipliers.
//!
//! [`ScaleStore`] owns both values. It loads them from a
//! [`PreferenceStorage`](crate::core::PreferenceStorage), clamps every write
//! into `MIN_SCALE..=MAX_SCALE`, and pushes `scale / 100` into a
//! [`RenderContext`] whenever anything changes. The stylesheet multiplies its
//! font sizes by the `--session-font-scale` / `--ui-font-scale` variables.

mod observe;
mod render;
mod scale;
mod store;
#[cfg(feature = "desktop")]
mod webview;

#[cfg(test)]
mod testing;

use serde::Serialize;

pub use observe::{
    LogObserver, PublishRecord, ScaleEvent, ScaleObserver, StorageFailure, StorageOp, LOG_TARGET,
};
pub use render::{RenderContext, RenderParams, StyleVariables};
pub use scale::{
    Scale, ScaleError, ScaleKey, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, SCALE_OPTIONS,
};
pub use store::{ScaleSnapshot, ScaleStore, Subscriber, SubscriptionId};
#[cfg(feature = "desktop")]
pub use webview::{apply_to_webview, WebviewRenderContext};

// ── Frontend DTO ────────────────────────────────────────────────────────────

/// Everything the settings panel needs to draw the font-size controls.
#[derive(Debug, Clone, Serialize)]
pub struct FontScales {
    pub session: u8,
    pub ui: u8,
    pub min_scale: u8,
    pub max_scale: u8,
    pub default_scale: u8,
    pub options: Vec<u8>,
    /// Both scales are at the default, so "reset" has nothing to do.
    pub is_default: bool,
}

impl FontScales {
    pub fn from_store(store: &ScaleStore) -> Self {
        let snapshot = store.snapshot();
        Self {
            session: snapshot.session.get(),
            ui: snapshot.ui.get(),
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            default_scale: DEFAULT_SCALE,
            options: SCALE_OPTIONS.to_vec(),
            is_default: snapshot.is_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemoryStorage;

    #[test]
    fn test_font_scales_reflect_store() {
        let mut store = ScaleStore::new(MemoryStorage::new(), StyleVariables::new());
        let scales = FontScales::from_store(&store);
        assert!(scales.is_default);
        assert_eq!((scales.session, scales.ui), (100, 100));
        assert_eq!(scales.options.len(), SCALE_OPTIONS.len());

        store.set_scale(ScaleKey::Ui, 140);
        let scales = FontScales::from_store(&store);
        assert!(!scales.is_default);
        assert_eq!(scales.ui, 140);
        assert_eq!((scales.min_scale, scales.max_scale), (50, 150));
    }

    #[test]
    fn test_font_scales_json() {
        let store = ScaleStore::new(MemoryStorage::new(), StyleVariables::new());
        let value = serde_json::to_value(FontScales::from_store(&store)).unwrap();
        assert_eq!(value["default_scale"], 100);
        assert_eq!(value["options"][0], 50);
        assert_eq!(value["is_default"], true);
    }
}
