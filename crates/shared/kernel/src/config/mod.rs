use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `FORMA__CACHE__MAX_SIZE=64`.
pub const ENV_PREFIX: &str = "FORMA";

/// Custom error type for config loading.
#[forma_derive::forma_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layering, lowest precedence first:
/// 1. **Defaults**: whatever `#[serde(default)]` supplies on `T`.
/// 2. **File**: when `path` is given, the file must exist; the format (TOML, JSON, YAML, ...)
///    is inferred from the extension.
/// 3. **Environment**: variables prefixed with `FORMA__`; nested keys use double underscores
///    (`FORMA__CACHE__DEFAULT_TTL_MS` maps to `cache.default_ttl_ms`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or unreadable, or if the merged
/// sources do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use forma_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
/// assert_eq!(cfg.port, 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    match path.as_ref().map(AsRef::as_ref) {
        Some(path) => {
            info!("Loading config from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        },
        None => info!("No config file given, using defaults and environment"),
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
