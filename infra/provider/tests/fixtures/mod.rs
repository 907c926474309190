use async_trait::async_trait;
use forma_domain::{Lookup, SelectOptions, Selection};
use forma_provider::{DataProvider, FetchError, MemoryProvider};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Wraps a [`MemoryProvider`], counting upstream calls and optionally delaying or failing them.
#[derive(Debug, Default)]
pub struct CountingProvider {
    pub memory: MemoryProvider,
    pub delay: Duration,
    gets: AtomicUsize,
    selects: AtomicUsize,
    failing: AtomicBool,
}

impl CountingProvider {
    #[must_use]
    pub fn seeded() -> Self {
        let memory = MemoryProvider::new();
        memory.insert_record("user", json!({ "name": "Ann", "age": 30 }));
        memory.insert_record("site", json!({ "title": "Forma" }));
        memory.insert_record("page", json!({ "path": "/" }));
        memory.insert_collection(
            "posts",
            vec![
                json!({ "title": "b", "rank": 2, "lang": "en" }),
                json!({ "title": "a", "rank": 1, "lang": "en" }),
                json!({ "title": "c", "rank": 3, "lang": "de" }),
            ],
        );
        Self { memory, ..Self::default() }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn selects(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    async fn pause(&self) -> Result<(), FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::upstream("backend unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl DataProvider for CountingProvider {
    async fn get(&self, slug: &str) -> Result<Lookup, FetchError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.pause().await?;
        self.memory.get(slug).await
    }

    async fn select(&self, schema: &str, options: &SelectOptions) -> Result<Selection, FetchError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.pause().await?;
        self.memory.select(schema, options).await
    }
}

/// Upstream and the handle tests keep to inspect it.
#[must_use]
pub fn counting(provider: CountingProvider) -> (Arc<CountingProvider>, Arc<dyn DataProvider>) {
    let provider = Arc::new(provider);
    let upstream: Arc<dyn DataProvider> = provider.clone();
    (provider, upstream)
}
