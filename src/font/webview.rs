use tauri::{AppHandle, Manager, Runtime, Webview};

use super::observe::LOG_TARGET;
use super::render::{RenderContext, RenderParams};

/// Writes the scale variables onto `document.documentElement` of every open
/// webview window.
pub struct WebviewRenderContext<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> WebviewRenderContext<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> RenderContext for WebviewRenderContext<R> {
    fn apply(&self, params: &RenderParams) {
        let windows = self.app.webview_windows();
        if windows.is_empty() {
            // Nothing to draw on yet; the page-load hook applies the current
            // values once a document exists.
            log::debug!(target: LOG_TARGET, "No webview window open, deferring font scales");
            return;
        }

        let script = params.to_script();
        for (label, window) in windows {
            if let Err(e) = window.eval(&script) {
                log::error!(target: LOG_TARGET, "Failed to apply font scales to window '{label}': {e}");
            }
        }
    }
}

/// Apply `params` to a single webview, e.g. right after its page finished
/// loading.
pub fn apply_to_webview<R: Runtime>(webview: &Webview<R>, params: &RenderParams) {
    if let Err(e) = webview.eval(&params.to_script()) {
        log::error!(
            target: LOG_TARGET,
            "Failed to apply font scales to webview '{}': {e}",
            webview.label()
        );
    }
}
