mod paths;
mod storage;

// Re-export the public API so callers can use `core::name` directly.
pub use paths::{get_anycode_dir, get_preferences_path, HOME_ENV_VAR};
pub use storage::{JsonFileStorage, MemoryStorage, PreferenceStorage, StorageError};
