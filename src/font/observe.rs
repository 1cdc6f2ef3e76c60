use serde::Serialize;

use super::render::RenderParams;
use super::scale::{Scale, ScaleKey};

/// Log target for everything the font-scale store reports.
pub const LOG_TARGET: &str = "font_scale";

// ── Records ──────────────────────────────────────────────────────────────────

/// What caused a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleEvent {
    Initialized,
    ScaleChanged,
    Reset,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishRecord {
    pub event: ScaleEvent,
    pub session_scale: Scale,
    pub ui_scale: Scale,
    pub params: RenderParams,
    /// RFC 3339 timestamp.
    pub at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageOp {
    Read,
    Write,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageFailure {
    pub operation: StorageOp,
    pub key: ScaleKey,
    pub error: String,
    pub at: String,
}

pub(crate) fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ── Trait ────────────────────────────────────────────────────────────────────

/// Fire-and-forget sink for store activity. Nothing is returned and nothing
/// an observer does can fail the operation being reported.
pub trait ScaleObserver: Send {
    fn published(&self, record: &PublishRecord);

    fn storage_failed(&self, failure: &StorageFailure);
}

/// Default observer: one structured line per record through `log`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ScaleObserver for LogObserver {
    fn published(&self, record: &PublishRecord) {
        match serde_json::to_string(record) {
            Ok(json) => log::info!(target: LOG_TARGET, "Applied font scales: {json}"),
            Err(e) => log::warn!(target: LOG_TARGET, "Failed to serialize publish record: {e}"),
        }
    }

    fn storage_failed(&self, failure: &StorageFailure) {
        match serde_json::to_string(failure) {
            Ok(json) => log::error!(target: LOG_TARGET, "Font scale storage failure: {json}"),
            Err(_) => log::error!(
                target: LOG_TARGET,
                "Failed to {:?} font scale '{}': {}",
                failure.operation,
                failure.key,
                failure.error
            ),
        }
    }
}
