use serde::Serialize;

use super::observe::{
    current_timestamp, LogObserver, PublishRecord, ScaleEvent, ScaleObserver, StorageFailure,
    StorageOp, LOG_TARGET,
};
use super::render::{RenderContext, RenderParams};
use super::scale::{Scale, ScaleError, ScaleKey};
use crate::core::{PreferenceStorage, StorageError};

// ── Snapshot ─────────────────────────────────────────────────────────────────

/// Both scales as they were at one publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScaleSnapshot {
    pub session: Scale,
    pub ui: Scale,
}

impl ScaleSnapshot {
    pub fn get(&self, key: ScaleKey) -> Scale {
        match key {
            ScaleKey::Session => self.session,
            ScaleKey::Ui => self.ui,
        }
    }

    fn slot(&mut self, key: ScaleKey) -> &mut Scale {
        match key {
            ScaleKey::Session => &mut self.session,
            ScaleKey::Ui => &mut self.ui,
        }
    }

    pub fn params(&self) -> RenderParams {
        RenderParams {
            session_font_scale: self.session.factor(),
            ui_font_scale: self.ui.factor(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.session.is_default() && self.ui.is_default()
    }
}

// ── Subscriptions ────────────────────────────────────────────────────────────

pub type Subscriber = Box<dyn Fn(&ScaleSnapshot) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// ── Store ────────────────────────────────────────────────────────────────────

/// Owner of the session and UI font scales.
///
/// Every mutation updates memory, publishes both values to the render
/// context (and subscribers), then persists. Storage trouble is reported to
/// the observer and otherwise ignored: the new scale stays applied for the
/// rest of the process even if it will not survive a restart.
pub struct ScaleStore {
    storage: Box<dyn PreferenceStorage>,
    render: Box<dyn RenderContext>,
    observer: Box<dyn ScaleObserver>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    current: ScaleSnapshot,
}

impl ScaleStore {
    /// Load both scales from `storage` and publish them, reporting through
    /// the `log` crate.
    pub fn new(
        storage: impl PreferenceStorage + 'static,
        render: impl RenderContext + 'static,
    ) -> Self {
        Self::with_observer(storage, render, LogObserver)
    }

    pub fn with_observer(
        storage: impl PreferenceStorage + 'static,
        render: impl RenderContext + 'static,
        observer: impl ScaleObserver + 'static,
    ) -> Self {
        let mut store = Self {
            storage: Box::new(storage),
            render: Box::new(render),
            observer: Box::new(observer),
            subscribers: Vec::new(),
            next_subscription: 0,
            current: ScaleSnapshot::default(),
        };
        store.initialize();
        store
    }

    /// (Re)load both scales from storage and publish them. Missing, malformed
    /// or unreadable entries fall back to the default.
    pub fn initialize(&mut self) -> (Scale, Scale) {
        let mut loaded = ScaleSnapshot::default();
        for key in ScaleKey::ALL {
            *loaded.slot(key) = self.load(key);
        }
        self.current = loaded;
        self.publish(ScaleEvent::Initialized);
        (loaded.session, loaded.ui)
    }

    /// Clamp `requested` into range, apply it to `key` and persist it.
    /// Returns the value actually applied.
    pub fn set_scale(&mut self, key: ScaleKey, requested: i64) -> Scale {
        let applied = Scale::clamped(requested);
        if i64::from(applied.get()) != requested {
            log::debug!(
                target: LOG_TARGET,
                "Clamped {key} font scale request {requested} to {applied}"
            );
        }

        *self.current.slot(key) = applied;
        self.publish(ScaleEvent::ScaleChanged);
        self.persist(key, applied);
        applied
    }

    /// String-keyed variant for callers that cross a serialization boundary.
    pub fn set_scale_named(&mut self, key: &str, requested: i64) -> Result<Scale, ScaleError> {
        let key = parse_key(key)?;
        Ok(self.set_scale(key, requested))
    }

    /// Put both scales back to the default in a single publication.
    pub fn reset(&mut self) -> (Scale, Scale) {
        self.current = ScaleSnapshot::default();
        self.publish(ScaleEvent::Reset);
        for key in ScaleKey::ALL {
            self.persist(key, Scale::DEFAULT);
        }
        (Scale::DEFAULT, Scale::DEFAULT)
    }

    pub fn scale(&self, key: ScaleKey) -> Scale {
        self.current.get(key)
    }

    pub fn scale_named(&self, key: &str) -> Result<Scale, ScaleError> {
        Ok(self.scale(parse_key(key)?))
    }

    pub fn session_scale(&self) -> Scale {
        self.current.session
    }

    pub fn ui_scale(&self) -> Scale {
        self.current.ui
    }

    pub fn snapshot(&self) -> ScaleSnapshot {
        self.current
    }

    /// True when there is nothing for a reset to do.
    pub fn is_default(&self) -> bool {
        self.current.is_default()
    }

    /// Call `subscriber` after every publication from now on.
    pub fn subscribe(
        &mut self,
        subscriber: impl Fn(&ScaleSnapshot) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn load(&self, key: ScaleKey) -> Scale {
        match self.storage.get(key.storage_key()) {
            Ok(Some(raw)) => Scale::parse_stored(&raw).unwrap_or_else(|| {
                log::debug!(
                    target: LOG_TARGET,
                    "Ignoring stored {key} font scale {raw:?}, using default"
                );
                Scale::DEFAULT
            }),
            Ok(None) => Scale::DEFAULT,
            Err(e) => {
                self.report(StorageOp::Read, key, &e);
                Scale::DEFAULT
            }
        }
    }

    fn persist(&self, key: ScaleKey, scale: Scale) {
        if let Err(e) = self.storage.set(key.storage_key(), &scale.to_string()) {
            self.report(StorageOp::Write, key, &e);
        }
    }

    fn report(&self, operation: StorageOp, key: ScaleKey, error: &StorageError) {
        self.observer.storage_failed(&StorageFailure {
            operation,
            key,
            error: error.to_string(),
            at: current_timestamp(),
        });
    }

    fn publish(&self, event: ScaleEvent) {
        let snapshot = self.current;
        let params = snapshot.params();

        self.render.apply(&params);
        for (_, subscriber) in &self.subscribers {
            subscriber(&snapshot);
        }
        self.observer.published(&PublishRecord {
            event,
            session_scale: snapshot.session,
            ui_scale: snapshot.ui,
            params,
            at: current_timestamp(),
        });
    }
}

/// An unknown key is a caller bug: it trips an assertion in debug builds and
/// comes back as `InvalidKey` in release builds.
fn parse_key(key: &str) -> Result<ScaleKey, ScaleError> {
    key.parse().map_err(|e: ScaleError| {
        log::error!(target: LOG_TARGET, "{e}");
        debug_assert!(false, "{e}");
        e
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
