//! Recording doubles for store tests.

use std::sync::{Arc, Mutex};

use super::observe::{PublishRecord, ScaleObserver, StorageFailure};
use super::render::{RenderContext, RenderParams};
use crate::core::{MemoryStorage, PreferenceStorage, StorageError};

#[derive(Debug, Clone, Default)]
pub struct RecordingRender {
    applied: Arc<Mutex<Vec<RenderParams>>>,
}

impl RecordingRender {
    pub fn applied(&self) -> Vec<RenderParams> {
        self.applied.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<RenderParams> {
        self.applied.lock().unwrap().last().copied()
    }
}

impl RenderContext for RecordingRender {
    fn apply(&self, params: &RenderParams) {
        self.applied.lock().unwrap().push(*params);
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    published: Arc<Mutex<Vec<PublishRecord>>>,
    failures: Arc<Mutex<Vec<StorageFailure>>>,
}

impl RecordingObserver {
    pub fn records(&self) -> Vec<PublishRecord> {
        self.published.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<StorageFailure> {
        self.failures.lock().unwrap().clone()
    }
}

impl ScaleObserver for RecordingObserver {
    fn published(&self, record: &PublishRecord) {
        self.published.lock().unwrap().push(record.clone());
    }

    fn storage_failed(&self, failure: &StorageFailure) {
        self.failures.lock().unwrap().push(failure.clone());
    }
}

/// Memory storage that refuses reads, writes, or both.
#[derive(Debug, Clone, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingStorage {
    pub fn reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl PreferenceStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("read refused".into()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        self.inner.set(key, value)
    }
}
