use std::path::PathBuf;

// ── Path Helpers ─────────────────────────────────────────────────────────────

/// Overrides the application data directory (useful for portable installs).
pub const HOME_ENV_VAR: &str = "ANYCODE_HOME";

/// Application data directory: `$ANYCODE_HOME` if set, else `~/.anycode`.
pub fn get_anycode_dir() -> Result<PathBuf, String> {
    if let Some(dir) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(".anycode"))
}

/// Durable key-value preferences shared by the desktop shell.
pub fn get_preferences_path() -> Result<PathBuf, String> {
    Ok(get_anycode_dir()?.join("preferences.json"))
}
