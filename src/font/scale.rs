use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Bounds ───────────────────────────────────────────────────────────────────

pub const MIN_SCALE: u8 = 50;
pub const MAX_SCALE: u8 = 150;
pub const DEFAULT_SCALE: u8 = 100;

/// The discrete choices offered by the settings selector.
pub const SCALE_OPTIONS: [u8; 11] = [50, 60, 70, 80, 90, 100, 110, 120, 130, 140, 150];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScaleError {
    #[error("unknown font scale key '{0}' (expected \"session\" or \"ui\")")]
    InvalidKey(String),
}

// ── Scale ────────────────────────────────────────────────────────────────────

/// A text-size percentage that is always within `MIN_SCALE..=MAX_SCALE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Scale(u8);

impl Scale {
    pub const MIN: Scale = Scale(MIN_SCALE);
    pub const MAX: Scale = Scale(MAX_SCALE);
    pub const DEFAULT: Scale = Scale(DEFAULT_SCALE);

    /// Clamp an arbitrary request into range. Never fails.
    pub fn clamped(requested: i64) -> Self {
        Scale(requested.clamp(MIN_SCALE as i64, MAX_SCALE as i64) as u8)
    }

    /// Parse a persisted value. Anything that is not a plain decimal integer
    /// inside the range yields `None`; out-of-range values are not clamped
    /// here because they indicate a corrupt or foreign entry.
    pub fn parse_stored(raw: &str) -> Option<Self> {
        let value: i64 = raw.trim().parse().ok()?;
        if (MIN_SCALE as i64..=MAX_SCALE as i64).contains(&value) {
            Some(Scale(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Multiplier handed to the renderer (`75` → `0.75`).
    pub fn factor(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Scale> for u8 {
    fn from(scale: Scale) -> u8 {
        scale.0
    }
}

// Incoming JSON is clamped like any other request, so a frontend can never
// smuggle an out-of-range value past the type.
impl<'de> Deserialize<'de> for Scale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(Scale::clamped(raw))
    }
}

// ── Key ──────────────────────────────────────────────────────────────────────

/// Which text region a scale applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKey {
    /// Conversation transcript text.
    Session,
    /// Sidebar, toolbar, settings panel and the rest of the chrome.
    Ui,
}

impl ScaleKey {
    pub const ALL: [ScaleKey; 2] = [ScaleKey::Session, ScaleKey::Ui];

    pub fn as_str(self) -> &'static str {
        match self {
            ScaleKey::Session => "session",
            ScaleKey::Ui => "ui",
        }
    }

    /// Key in durable storage. These strings are shared with existing
    /// installs and must not change.
    pub fn storage_key(self) -> &'static str {
        match self {
            ScaleKey::Session => "any-code-session-font-scale",
            ScaleKey::Ui => "any-code-ui-font-scale",
        }
    }

    /// CSS custom property the stylesheet multiplies font sizes by.
    pub fn css_variable(self) -> &'static str {
        match self {
            ScaleKey::Session => "--session-font-scale",
            ScaleKey::Ui => "--ui-font-scale",
        }
    }
}

impl fmt::Display for ScaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleKey {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session" => Ok(ScaleKey::Session),
            "ui" => Ok(ScaleKey::Ui),
            other => Err(ScaleError::InvalidKey(other.to_string())),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_matches_min_max_formula() {
        for v in -300i64..=400 {
            let expected = v.max(50).min(150);
            assert_eq!(Scale::clamped(v).get() as i64, expected, "input {v}");
        }
        assert_eq!(Scale::clamped(i64::MIN), Scale::MIN);
        assert_eq!(Scale::clamped(i64::MAX), Scale::MAX);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(Scale::clamped(49).get(), 50);
        assert_eq!(Scale::clamped(50).get(), 50);
        assert_eq!(Scale::clamped(100).get(), 100);
        assert_eq!(Scale::clamped(150).get(), 150);
        assert_eq!(Scale::clamped(151).get(), 150);
    }

    #[test]
    fn test_parse_stored_accepts_in_range_integers() {
        assert_eq!(Scale::parse_stored("75"), Some(Scale::clamped(75)));
        assert_eq!(Scale::parse_stored(" 120\n"), Some(Scale::clamped(120)));
        assert_eq!(Scale::parse_stored("50"), Some(Scale::MIN));
        assert_eq!(Scale::parse_stored("150"), Some(Scale::MAX));
    }

    #[test]
    fn test_parse_stored_rejects_malformed_and_out_of_range() {
        for raw in ["abc", "", "  ", "75.5", "1e2", "49", "151", "-100", "99999999999999999999"] {
            assert_eq!(Scale::parse_stored(raw), None, "input {raw:?}");
        }
    }

    #[test]
    fn test_factor() {
        assert_eq!(Scale::clamped(75).factor(), 0.75);
        assert_eq!(Scale::DEFAULT.factor(), 1.0);
        assert_eq!(Scale::MAX.factor(), 1.5);
    }

    #[test]
    fn test_deserialize_clamps() {
        let scale: Scale = serde_json::from_str("400").unwrap();
        assert_eq!(scale, Scale::MAX);
        let scale: Scale = serde_json::from_str("-3").unwrap();
        assert_eq!(scale, Scale::MIN);
        assert_eq!(serde_json::to_string(&Scale::clamped(90)).unwrap(), "90");
    }

    #[test]
    fn test_options_are_in_range_and_contain_default() {
        assert!(SCALE_OPTIONS.iter().all(|&v| (MIN_SCALE..=MAX_SCALE).contains(&v)));
        assert!(SCALE_OPTIONS.contains(&DEFAULT_SCALE));
        assert_eq!(SCALE_OPTIONS.first(), Some(&MIN_SCALE));
        assert_eq!(SCALE_OPTIONS.last(), Some(&MAX_SCALE));
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("session".parse::<ScaleKey>(), Ok(ScaleKey::Session));
        assert_eq!("ui".parse::<ScaleKey>(), Ok(ScaleKey::Ui));
        assert_eq!(
            "UI".parse::<ScaleKey>(),
            Err(ScaleError::InvalidKey("UI".to_string()))
        );
    }

    #[test]
    fn test_keys_have_distinct_storage_and_css_names() {
        assert_ne!(
            ScaleKey::Session.storage_key(),
            ScaleKey::Ui.storage_key()
        );
        assert_ne!(
            ScaleKey::Session.css_variable(),
            ScaleKey::Ui.css_variable()
        );
        for key in ScaleKey::ALL {
            assert_eq!(key.as_str().parse::<ScaleKey>(), Ok(key));
        }
    }
}
