mod font;

// Glob re-export so the `#[tauri::command]` helper macros travel with the
// functions into `generate_handler!`.
pub use font::*;
