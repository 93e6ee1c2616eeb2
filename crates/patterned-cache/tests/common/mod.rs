#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use patterned_cache::{
    BackgroundListener, BackgroundOutcome, ErrorObserver, MemoryCacher, MemoryPersister, Pattern,
    PatternedCache, Persister, StoreError, SuppressedError, Suppression,
};
use tokio::sync::mpsc;

/// Persister whose store can be switched off
#[derive(Default)]
pub struct SwitchablePersister {
    inner: MemoryPersister<String>,
    pub down: AtomicBool,
}

impl SwitchablePersister {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::new("store unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl Persister<String> for SwitchablePersister {
    async fn save(&self, key: &str, value: &String) -> Result<(), StoreError> {
        self.check()?;
        self.inner.save(key, value).await
    }

    async fn select_one(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        self.inner.select_one(key).await
    }

    async fn select_all(&self) -> Result<HashMap<String, String>, StoreError> {
        self.check()?;
        self.inner.select_all().await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(key).await
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingObserver(Mutex<Vec<Suppression>>);

impl RecordingObserver {
    pub fn kinds(&self) -> Vec<Suppression> {
        self.0.lock().unwrap().clone()
    }
}

impl ErrorObserver for RecordingObserver {
    fn observe(&self, suppressed: SuppressedError) {
        self.0.lock().unwrap().push(suppressed.kind);
    }
}

pub struct ChannelListener(pub mpsc::UnboundedSender<BackgroundOutcome>);

impl BackgroundListener for ChannelListener {
    fn on_complete(&self, outcome: BackgroundOutcome) {
        let _ = self.0.send(outcome);
    }
}

pub struct Harness {
    pub cache: PatternedCache<String>,
    pub cacher: Arc<MemoryCacher<String>>,
    pub persister: Arc<SwitchablePersister>,
    pub observer: Arc<RecordingObserver>,
    pub outcomes: mpsc::UnboundedReceiver<BackgroundOutcome>,
}

impl Harness {
    pub fn new(pattern: Pattern) -> Self {
        let cacher = Arc::new(MemoryCacher::<String>::new());
        let persister = Arc::new(SwitchablePersister::default());
        let observer = Arc::new(RecordingObserver::default());
        let (tx, outcomes) = mpsc::unbounded_channel();

        let cache = PatternedCache::<String>::builder()
            .cacher(cacher.clone())
            .persister(persister.clone())
            .pattern(pattern)
            .observer(observer.clone())
            .background_listener(Arc::new(ChannelListener(tx)))
            .build()
            .unwrap();

        Self {
            cache,
            cacher,
            persister,
            observer,
            outcomes,
        }
    }

    /// Wait for every write-behind task launched so far.
    pub async fn settle(&mut self, tasks: usize) -> Vec<BackgroundOutcome> {
        let mut done = Vec::with_capacity(tasks);
        for _ in 0..tasks {
            done.push(self.outcomes.recv().await.expect("listener dropped"));
        }
        done
    }
}
