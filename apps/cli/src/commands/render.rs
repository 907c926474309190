use anyhow::{Context, Result};
use forma::content::{CacheMode, ContentResolver};
use forma::domain::config::FormaConfig;
use forma::provider::MemoryProvider;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Loads a [`MemoryProvider`] from `data` and resolves `template` through a [`ContentResolver`].
///
/// # Errors
/// Fails on unreadable or malformed data files and on expression errors in the template.
pub async fn run(
    config: &FormaConfig,
    data: &Path,
    template: &str,
    no_cache: bool,
    out: &mut impl Write,
) -> Result<()> {
    let provider = load_provider(data)?;
    let mode = if no_cache { CacheMode::Disabled } else { CacheMode::from_settings(&config.resolver, config.cache) };

    let resolver = ContentResolver::builder()
        .data_provider(Arc::new(provider))
        .cache(mode)
        .build()
        .context("Failed to build content resolver")?;

    let rendered = resolver.resolve_template(template).await.context("Template could not be resolved")?;
    if let Some(cache) = resolver.cache() {
        debug!(stats = ?cache.stats(), entries = cache.len(), "Cache statistics");
    }

    writeln!(out, "{rendered}")?;
    Ok(())
}

fn load_provider(path: &Path) -> Result<MemoryProvider> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let document: Value =
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))?;
    MemoryProvider::from_json(document).with_context(|| format!("{} is not a record set", path.display()))
}
