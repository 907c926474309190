use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the engine crates and the CLI.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormaConfigInner {
    pub log: LogSettings,
    pub cache: CacheConfig,
    pub resolver: ResolverConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct FormaConfig {
    #[serde(flatten, default)]
    inner: Arc<FormaConfigInner>,
}

impl Deref for FormaConfig {
    type Target = FormaConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for FormaConfig {
    fn deref_mut(&mut self) -> &mut FormaConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging knobs; mapped onto the logger builder by applications.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// One of `trace`, `debug`, `info`, `warn`, `error`, `off`.
    pub level: String,
    pub console: bool,
    pub json: bool,
    /// Directory for rolling log files; file logging is off when unset.
    pub directory: Option<PathBuf>,
    /// Extra `EnvFilter` directives, e.g. `forma_provider=debug`.
    pub filter: Option<String>,
}

/// Cache construction settings.
///
/// Both `snake_case` (config files, env vars) and `camelCase` keys are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of live entries; must be greater than zero.
    #[serde(alias = "maxSize")]
    pub max_size: usize,
    /// Time-to-live applied when a call does not specify one; `0` disables retention.
    #[serde(alias = "defaultTtlMs")]
    pub default_ttl_ms: u64,
    /// Emits `debug` events for hits, misses, stores and evictions.
    #[serde(alias = "enableLogging")]
    pub enable_logging: bool,
}

/// Content resolver settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Wrap the data provider with a cache built from [`CacheConfig`].
    pub cache_enabled: bool,
}

// --- Default ---

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, json: false, directory: None, filter: None }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_size: 256, default_ttl_ms: 60_000, enable_logging: false }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { cache_enabled: true }
    }
}
