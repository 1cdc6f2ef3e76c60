pub mod core;
pub mod font;

#[cfg(feature = "desktop")]
mod commands;

// ── App Entry ────────────────────────────────────────────────────────────────

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::*;
    use tauri::webview::PageLoadEvent;
    use tauri::{Emitter, Manager};

    use crate::core::{JsonFileStorage, MemoryStorage};
    use crate::font::{apply_to_webview, ScaleStore, WebviewRenderContext};

    let log_targets = vec![
        tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Stdout),
        tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Webview),
        tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::LogDir { file_name: None }),
    ];

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(if cfg!(debug_assertions) {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Info
                })
                .targets(log_targets)
                .build(),
        )
        .setup(|app| {
            let render = WebviewRenderContext::new(app.handle().clone());
            let mut store = match JsonFileStorage::open_default() {
                Ok(storage) => {
                    log::debug!("Font scales persisted at {}", storage.path().display());
                    ScaleStore::new(storage, render)
                }
                Err(e) => {
                    // Scales still apply for this session, they just won't
                    // survive a restart.
                    log::error!("Failed to open preferences storage: {e}");
                    ScaleStore::new(MemoryStorage::new(), render)
                }
            };

            let handle = app.handle().clone();
            store.subscribe(move |snapshot| {
                if let Err(e) = handle.emit(FONT_SCALES_CHANGED, *snapshot) {
                    log::error!("Failed to emit {FONT_SCALES_CHANGED} event: {e}");
                }
            });

            // Publish again once the state is registered, so a page that
            // finished loading meanwhile is covered either by this eval or
            // by the page-load hook finding the state.
            app.manage(FontState::new(store));
            app.state::<FontState>().lock().initialize();
            Ok(())
        })
        .on_page_load(|webview, payload| {
            // A reload discards the document's style variables; put them back.
            if !matches!(payload.event(), PageLoadEvent::Finished) {
                return;
            }
            let Some(state) = webview.try_state::<FontState>() else {
                return;
            };
            let params = state.lock().snapshot().params();
            apply_to_webview(webview, &params);
        })
        .invoke_handler(tauri::generate_handler![
            get_font_scales,
            set_font_scale,
            reset_font_scales,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
