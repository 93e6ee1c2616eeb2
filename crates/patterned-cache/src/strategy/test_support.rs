//! Test doubles shared by the pattern tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

use super::{Collaborators, Pattern};
use crate::cache::MemoryCacher;
use crate::error::{CacheError, StoreError};
use crate::observer::{
    BackgroundListener, BackgroundOutcome, ErrorObserver, SuppressedError, Suppression,
};
use crate::options::SetConfiguration;
use crate::repository::MemoryPersister;
use crate::repository::traits::{Cacher, Persistence, Persister, SharedCacher, SharedPersister};

/// Ordered log of collaborator calls, e.g. `cache.set:k` or `store.delete:k`.
#[derive(Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    fn record(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Memory cacher with failure switches
pub(crate) struct FlakyCacher {
    inner: MemoryCacher<String>,
    journal: Journal,
    pub fail_set: AtomicBool,
    pub fail_get: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_load: AtomicBool,
    pub fail_close: AtomicBool,
}

impl FlakyCacher {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: MemoryCacher::new(),
            journal,
            fail_set: AtomicBool::new(false),
            fail_get: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            fail_load: AtomicBool::new(false),
            fail_close: AtomicBool::new(false),
        }
    }

    /// Seed a value without journaling.
    pub async fn put(&self, key: &str, value: &str) {
        self.inner
            .set(key, &value.to_string(), &SetConfiguration::default())
            .await
            .unwrap();
    }

    /// Read a value without journaling.
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }

    fn check(&self, flag: &AtomicBool, op: &str, key: &str) -> Result<(), CacheError> {
        self.journal.record(format!("cache.{op}:{key}"));
        if flag.load(Ordering::SeqCst) {
            return Err(CacheError::new(format!("cache {op} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl Cacher<String> for FlakyCacher {
    async fn set(&self, key: &str, value: &String, config: &SetConfiguration) -> Result<(), CacheError> {
        self.check(&self.fail_set, "set", key)?;
        self.inner.set(key, value, config).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.check(&self.fail_get, "get", key)?;
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.check(&self.fail_delete, "delete", key)?;
        self.inner.delete(key).await
    }

    async fn load(&self, entries: HashMap<String, String>) -> Result<(), CacheError> {
        self.check(&self.fail_load, "load", "*")?;
        self.inner.load(entries).await
    }

    async fn close(&self) -> Result<(), CacheError> {
        self.check(&self.fail_close, "close", "*")?;
        self.inner.close().await
    }
}

/// Memory persister with failure switches and an optional save gate
pub(crate) struct FlakyPersister {
    inner: MemoryPersister<String>,
    journal: Journal,
    save_gate: Option<Arc<Notify>>,
    pub fail_save: AtomicBool,
    pub fail_select: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_select_all: AtomicBool,
    pub fail_close: AtomicBool,
}

impl FlakyPersister {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: MemoryPersister::new(),
            journal,
            save_gate: None,
            fail_save: AtomicBool::new(false),
            fail_select: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            fail_select_all: AtomicBool::new(false),
            fail_close: AtomicBool::new(false),
        }
    }

    /// Saves block until the returned gate is notified.
    pub fn gated(journal: Journal) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut persister = Self::new(journal);
        persister.save_gate = Some(Arc::clone(&gate));
        (persister, gate)
    }

    pub async fn put(&self, key: &str, value: &str) {
        self.inner.save(key, &value.to_string()).await.unwrap();
    }

    pub async fn peek(&self, key: &str) -> Option<String> {
        self.inner.select_one(key).await.unwrap()
    }

    fn check(&self, flag: &AtomicBool, op: &str, key: &str) -> Result<(), StoreError> {
        self.journal.record(format!("store.{op}:{key}"));
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::new(format!("store {op} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl Persister<String> for FlakyPersister {
    async fn save(&self, key: &str, value: &String) -> Result<(), StoreError> {
        if let Some(gate) = &self.save_gate {
            gate.notified().await;
        }
        self.check(&self.fail_save, "save", key)?;
        self.inner.save(key, value).await
    }

    async fn select_one(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check(&self.fail_select, "select", key)?;
        self.inner.select_one(key).await
    }

    async fn select_all(&self) -> Result<HashMap<String, String>, StoreError> {
        self.check(&self.fail_select_all, "select_all", "*")?;
        self.inner.select_all().await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check(&self.fail_delete, "delete", key)?;
        self.inner.delete(key).await
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.check(&self.fail_close, "close", "*")?;
        self.inner.close().await
    }
}

/// Keeps every suppressed error for inspection
#[derive(Default)]
pub(crate) struct RecordingObserver(Mutex<Vec<SuppressedError>>);

impl RecordingObserver {
    pub fn kinds(&self) -> Vec<Suppression> {
        self.0.lock().unwrap().iter().map(|s| s.kind).collect()
    }

    pub fn patterns(&self) -> Vec<Pattern> {
        self.0.lock().unwrap().iter().map(|s| s.pattern).collect()
    }
}

impl ErrorObserver for RecordingObserver {
    fn observe(&self, suppressed: SuppressedError) {
        self.0.lock().unwrap().push(suppressed);
    }
}

/// Forwards background outcomes into a channel
pub(crate) struct ChannelListener(mpsc::UnboundedSender<BackgroundOutcome>);

impl BackgroundListener for ChannelListener {
    fn on_complete(&self, outcome: BackgroundOutcome) {
        let _ = self.0.send(outcome);
    }
}

/// Collaborators wired to doubles
pub(crate) struct Fixture {
    pub cacher: Arc<FlakyCacher>,
    pub persister: Arc<FlakyPersister>,
    pub observer: Arc<RecordingObserver>,
    pub journal: Journal,
    pub outcomes: mpsc::UnboundedReceiver<BackgroundOutcome>,
    pub stores: Collaborators<String>,
}

impl Fixture {
    /// Persister attached
    pub fn new() -> Self {
        let journal = Journal::default();
        let persister = FlakyPersister::new(journal.clone());
        Self::build(journal, persister, true)
    }

    /// No persister attached
    pub fn detached() -> Self {
        let journal = Journal::default();
        let persister = FlakyPersister::new(journal.clone());
        Self::build(journal, persister, false)
    }

    /// Persister attached, saves held until the gate is notified
    pub fn gated() -> (Self, Arc<Notify>) {
        let journal = Journal::default();
        let (persister, gate) = FlakyPersister::gated(journal.clone());
        (Self::build(journal, persister, true), gate)
    }

    fn build(journal: Journal, persister: FlakyPersister, attached: bool) -> Self {
        let cacher = Arc::new(FlakyCacher::new(journal.clone()));
        let persister = Arc::new(persister);
        let observer = Arc::new(RecordingObserver::default());
        let (tx, outcomes) = mpsc::unbounded_channel();

        let persistence = if attached {
            Persistence::Attached(Arc::clone(&persister) as SharedPersister<String>)
        } else {
            Persistence::Detached
        };

        let stores = Collaborators {
            cacher: Arc::clone(&cacher) as SharedCacher<String>,
            persistence,
            backfill: SetConfiguration::default(),
            observer: Arc::clone(&observer) as Arc<dyn ErrorObserver>,
            listener: Some(Arc::new(ChannelListener(tx)) as Arc<dyn BackgroundListener>),
        };

        Self {
            cacher,
            persister,
            observer,
            journal,
            outcomes,
            stores,
        }
    }

    /// Wait for the next write-behind background task to finish.
    pub async fn next_outcome(&mut self) -> BackgroundOutcome {
        self.outcomes.recv().await.expect("listener dropped")
    }
}
