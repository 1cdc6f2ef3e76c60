use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::scale::ScaleKey;

// ── Parameters ───────────────────────────────────────────────────────────────

/// Live-rendering multipliers derived from the current scales (`scale / 100`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderParams {
    pub session_font_scale: f64,
    pub ui_font_scale: f64,
}

impl RenderParams {
    pub fn get(&self, key: ScaleKey) -> f64 {
        match key {
            ScaleKey::Session => self.session_font_scale,
            ScaleKey::Ui => self.ui_font_scale,
        }
    }

    /// `(css variable, value)` pairs in a stable order.
    pub fn variables(&self) -> [(&'static str, f64); 2] {
        ScaleKey::ALL.map(|key| (key.css_variable(), self.get(key)))
    }

    /// JavaScript that writes both variables onto `document.documentElement`.
    pub fn to_script(&self) -> String {
        let mut script = String::from("(function(){var s=document.documentElement.style;");
        for (name, value) in self.variables() {
            script.push_str(&format!("s.setProperty('{name}','{value}');"));
        }
        script.push_str("})();");
        script
    }
}

// ── Trait ────────────────────────────────────────────────────────────────────

/// Where the scales take visible effect. Always both parameters at once, so
/// a renderer never observes a half-applied update.
pub trait RenderContext: Send {
    fn apply(&self, params: &RenderParams);
}

// ── Style variables ──────────────────────────────────────────────────────────

/// In-process table of document-level style variables.
///
/// Clones share the same table: hand one to the store and keep another to
/// read the applied values back (or to render a stylesheet).
#[derive(Debug, Clone, Default)]
pub struct StyleVariables {
    vars: Arc<RwLock<BTreeMap<String, String>>>,
}

impl StyleVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.read().ok().and_then(|vars| vars.get(name).cloned())
    }

    /// Current value of `name` as a number, if set.
    pub fn factor(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.read().map(|vars| vars.clone()).unwrap_or_default()
    }

    /// Render the table as a `:root` declaration block.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.snapshot() {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

impl RenderContext for StyleVariables {
    fn apply(&self, params: &RenderParams) {
        match self.vars.write() {
            Ok(mut vars) => {
                for (name, value) in params.variables() {
                    vars.insert(name.to_string(), value.to_string());
                }
            }
            Err(e) => log::error!("Failed to apply font scale variables: {e}"),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
