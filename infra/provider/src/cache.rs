use crate::DataProvider;
use crate::error::FetchError;
use crate::key::{CacheKey, Operation};
use async_trait::async_trait;
use forma_domain::config::CacheConfig;
use forma_domain::{Lookup, SelectOptions, Selection};
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Counters describing cache effectiveness since construction (or the last [`CacheProvider::clear`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Callers that joined an in-flight fetch instead of issuing their own.
    pub coalesced: u64,
}

#[derive(Debug, Clone)]
enum Payload {
    Lookup(Lookup),
    Selection(Selection),
}

impl Payload {
    fn into_lookup(self) -> Result<Lookup, FetchError> {
        match self {
            Self::Lookup(lookup) => Ok(lookup),
            Self::Selection(_) => Err("cached selection stored under a get key".into()),
        }
    }

    fn into_selection(self) -> Result<Selection, FetchError> {
        match self {
            Self::Selection(selection) => Ok(selection),
            Self::Lookup(_) => Err("cached lookup stored under a select key".into()),
        }
    }
}

/// A stored provider result.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    key: CacheKey,
    value: Payload,
    inserted_at: Instant,
    expires_at: Instant,
    last_used: u64,
}

impl CacheEntry {
    #[must_use]
    pub const fn key(&self) -> &CacheKey {
        &self.key
    }

    #[must_use]
    pub const fn inserted_at(&self) -> Instant {
        self.inserted_at
    }

    #[must_use]
    pub const fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// An entry is live strictly before its expiry instant.
    #[must_use]
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

type Outcome = Option<Result<Payload, FetchError>>;

#[derive(Debug, Default)]
struct CacheState {
    entries: FxHashMap<CacheKey, CacheEntry>,
    in_flight: FxHashMap<CacheKey, watch::Receiver<Outcome>>,
    tick: u64,
    generation: u64,
    stats: CacheStats,
}

impl CacheState {
    fn hit(&mut self, key: &CacheKey, now: Instant) -> Option<Payload> {
        self.tick += 1;
        let tick = self.tick;
        let entry = self.entries.get_mut(key)?;
        if !entry.is_live(now) {
            self.entries.remove(key);
            return None;
        }
        entry.last_used = tick;
        Some(entry.value.clone())
    }

    /// Inserts `value`, evicting at most one live entry; returns the evicted key.
    fn store(
        &mut self,
        key: CacheKey,
        value: Payload,
        ttl: Duration,
        now: Instant,
        max_size: usize,
    ) -> Option<CacheKey> {
        let mut evicted = None;
        if !self.entries.contains_key(&key) && self.entries.len() >= max_size {
            self.entries.retain(|_, entry| entry.is_live(now));
            if self.entries.len() >= max_size {
                let oldest = self
                    .entries
                    .values()
                    .min_by_key(|entry| entry.last_used)
                    .map(|entry| entry.key.clone());
                if let Some(oldest) = oldest {
                    self.entries.remove(&oldest);
                    self.stats.evictions += 1;
                    evicted = Some(oldest);
                }
            }
        }

        self.tick += 1;
        let entry =
            CacheEntry { key: key.clone(), value, inserted_at: now, expires_at: now + ttl, last_used: self.tick };
        self.entries.insert(key, entry);
        evicted
    }
}

#[derive(Debug)]
struct CacheInner {
    upstream: Arc<dyn DataProvider>,
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl CacheInner {
    fn trace(&self, event: &'static str, key: &CacheKey) {
        if self.config.enable_logging {
            debug!(%key, "Cache {event}");
        }
    }
}

#[derive(Debug, Clone)]
enum Request {
    Get(String),
    Select(String, SelectOptions),
}

impl Request {
    async fn send(&self, upstream: &dyn DataProvider) -> Result<Payload, FetchError> {
        match self {
            Self::Get(slug) => upstream.get(slug).await.map(Payload::Lookup),
            Self::Select(schema, options) => {
                upstream.select(schema, options).await.map(Payload::Selection)
            },
        }
    }
}

/// Removes the in-flight marker if the fetch task ends without publishing (e.g. a panicking
/// provider), so later callers start a fresh fetch.
struct InFlightGuard {
    inner: Arc<CacheInner>,
    key: Option<CacheKey>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.inner.state.lock().in_flight.remove(&key);
        }
    }
}

/// A [`DataProvider`] that memoizes another one.
///
/// * Results are kept for a TTL (`default_ttl_ms`, or per call via
///   [`get_with_ttl`](Self::get_with_ttl) / [`select_with_ttl`](Self::select_with_ttl)).
/// * At most `max_size` entries are held; inserting into a full cache first drops expired
///   entries, then the least-recently-used one.
/// * Identical concurrent requests share one upstream call. The call runs on its own task, so
///   it completes and populates the cache even if every caller has gone away.
/// * Failures are returned to every waiter and never cached.
///
/// Clones share the same entries.
#[derive(Debug, Clone)]
pub struct CacheProvider {
    inner: Arc<CacheInner>,
}

impl CacheProvider {
    /// # Errors
    /// Returns [`FetchError::InvalidConfiguration`] if `config.max_size` is zero.
    pub fn new(upstream: Arc<dyn DataProvider>, config: CacheConfig) -> Result<Self, FetchError> {
        if config.max_size == 0 {
            return Err(FetchError::InvalidConfiguration {
                message: "max_size must be greater than zero".into(),
                context: Some("Building cache provider".into()),
            });
        }
        let state = Mutex::new(CacheState::default());
        Ok(Self { inner: Arc::new(CacheInner { upstream, config, state }) })
    }

    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.inner.config.default_ttl_ms)
    }

    /// Like [`DataProvider::get`], storing the result for `ttl` instead of the default.
    ///
    /// # Errors
    /// Propagates the upstream [`FetchError`].
    pub async fn get_with_ttl(&self, slug: &str, ttl: Duration) -> Result<Lookup, FetchError> {
        self.fetch(CacheKey::get(slug), ttl, Request::Get(slug.to_owned())).await?.into_lookup()
    }

    /// Like [`DataProvider::select`], storing the result for `ttl` instead of the default.
    ///
    /// # Errors
    /// Propagates the upstream [`FetchError`].
    pub async fn select_with_ttl(
        &self,
        schema: &str,
        options: &SelectOptions,
        ttl: Duration,
    ) -> Result<Selection, FetchError> {
        let key = CacheKey::select(schema, options)?;
        let request = Request::Select(schema.to_owned(), options.clone());
        self.fetch(key, ttl, request).await?.into_selection()
    }

    async fn fetch(
        &self,
        key: CacheKey,
        ttl: Duration,
        request: Request,
    ) -> Result<Payload, FetchError> {
        let mut receiver = {
            let mut state = self.inner.state.lock();
            if let Some(value) = state.hit(&key, Instant::now()) {
                state.stats.hits += 1;
                self.inner.trace("hit", &key);
                return Ok(value);
            }

            if let Some(receiver) = state.in_flight.get(&key) {
                let receiver = receiver.clone();
                state.stats.coalesced += 1;
                self.inner.trace("join", &key);
                receiver
            } else {
                state.stats.misses += 1;
                self.inner.trace("miss", &key);
                let (sender, receiver) = watch::channel(None);
                state.in_flight.insert(key.clone(), receiver.clone());
                self.spawn_fetch(key, ttl, request, sender, state.generation);
                receiver
            }
        };

        match receiver.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone().unwrap_or_else(|| Err("empty fetch outcome".into())),
            Err(_) => Err(FetchError::Internal {
                message: "fetch task ended without a result".into(),
                context: Some("Waiting for in-flight fetch".into()),
            }),
        }
    }

    fn spawn_fetch(
        &self,
        key: CacheKey,
        ttl: Duration,
        request: Request,
        sender: watch::Sender<Outcome>,
        generation: u64,
    ) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let mut guard = InFlightGuard { inner: Arc::clone(&inner), key: Some(key.clone()) };
            let outcome = request.send(inner.upstream.as_ref()).await;

            {
                let mut state = inner.state.lock();
                state.in_flight.remove(&key);
                guard.key = None;

                match &outcome {
                    Ok(value) if !ttl.is_zero() && state.generation == generation => {
                        let max_size = inner.config.max_size;
                        let evicted = state.store(key.clone(), value.clone(), ttl, Instant::now(), max_size);
                        inner.trace("store", &key);
                        if let Some(evicted) = evicted {
                            inner.trace("evict", &evicted);
                        }
                    },
                    Ok(_) => {},
                    Err(e) => warn!(%key, error = %e, "Upstream fetch failed"),
                }
            }

            sender.send_replace(Some(outcome));
        });
    }

    /// Drops the cached `get` result for `slug`. Returns whether an entry was removed.
    pub fn invalidate_slug(&self, slug: &str) -> bool {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        state.entries.remove(&CacheKey::get(slug)).is_some()
    }

    /// Drops every cached `select` result for `schema`, whatever its options.
    /// Returns the number of entries removed.
    pub fn invalidate_schema(&self, schema: &str) -> usize {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        let before = state.entries.len();
        state
            .entries
            .retain(|key, _| !(key.operation() == Operation::Select && key.target() == schema));
        before - state.entries.len()
    }

    /// Drops every entry and resets [`stats`](Self::stats). In-flight fetches still complete
    /// for their callers but are not stored.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        state.generation += 1;
        state.entries.clear();
        state.stats = CacheStats::default();
    }

    /// Number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.inner.state.lock().entries.values().filter(|entry| entry.is_live(now)).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the live entry stored under `key`, without touching its recency.
    #[must_use]
    pub fn entry(&self, key: &CacheKey) -> Option<CacheEntry> {
        let now = Instant::now();
        self.inner.state.lock().entries.get(key).filter(|entry| entry.is_live(now)).cloned()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.state.lock().stats
    }
}

#[async_trait]
impl DataProvider for CacheProvider {
    async fn get(&self, slug: &str) -> Result<Lookup, FetchError> {
        self.get_with_ttl(slug, self.default_ttl()).await
    }

    async fn select(
        &self,
        schema: &str,
        options: &SelectOptions,
    ) -> Result<Selection, FetchError> {
        self.select_with_ttl(schema, options, self.default_ttl()).await
    }
}
