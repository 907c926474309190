use crate::context::TemplateContext;
use crate::error::{ContentError, ContentErrorExt, ExpressionError};
use crate::expression::{PathExpressionEngine, TemplateResolver};
use crate::scan::{extract_field_groups, has_expressions};
use forma_domain::SelectOptions;
use forma_domain::config::{CacheConfig, ResolverConfig};
use forma_provider::{CacheProvider, DataProvider};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Whether, and how, fetches are cached.
#[derive(Debug, Clone, Default)]
pub enum CacheMode {
    /// Wrap the data provider with a cache using [`CacheConfig::default`].
    #[default]
    Default,
    /// Call the data provider directly.
    Disabled,
    /// Fetch through an existing cache; it already wraps its own upstream.
    Custom(Arc<CacheProvider>),
    /// Wrap the data provider with a cache built from these settings.
    Config(CacheConfig),
}

impl CacheMode {
    /// Maps loaded settings: `Config(cache)` when caching is enabled, otherwise `Disabled`.
    #[must_use]
    pub const fn from_settings(resolver: &ResolverConfig, cache: CacheConfig) -> Self {
        if resolver.cache_enabled { Self::Config(cache) } else { Self::Disabled }
    }
}

impl From<bool> for CacheMode {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Default } else { Self::Disabled }
    }
}

#[derive(Debug)]
pub struct NoProvider;
#[derive(Debug)]
pub struct WithProvider(Arc<dyn DataProvider>);

mod private {
    pub trait Sealed {}
}
impl private::Sealed for NoProvider {}
impl private::Sealed for WithProvider {}

/// Builder for [`ContentResolver`]; a data provider is required before
/// [`build`](ContentResolverBuilder::build) becomes available.
#[derive(Debug)]
pub struct ContentResolverBuilder<P: private::Sealed = NoProvider> {
    provider: P,
    templates: Option<Arc<dyn TemplateResolver>>,
    cache: CacheMode,
}

impl ContentResolverBuilder<NoProvider> {
    pub fn data_provider(self, provider: Arc<dyn DataProvider>) -> ContentResolverBuilder<WithProvider> {
        ContentResolverBuilder { provider: WithProvider(provider), templates: self.templates, cache: self.cache }
    }
}

impl<P: private::Sealed> ContentResolverBuilder<P> {
    /// Replaces the built-in [`PathExpressionEngine`].
    #[must_use = "The builder must be configured before it can be used to build the resolver."]
    pub fn template_resolver(mut self, resolver: impl TemplateResolver + 'static) -> Self {
        self.templates = Some(Arc::new(resolver));
        self
    }

    /// Accepts a [`CacheMode`] or a plain `bool`.
    #[must_use = "The builder must be configured before it can be used to build the resolver."]
    pub fn cache(mut self, mode: impl Into<CacheMode>) -> Self {
        self.cache = mode.into();
        self
    }
}

impl ContentResolverBuilder<WithProvider> {
    /// # Errors
    /// Returns [`ContentError::Provider`] if the cache settings are invalid.
    pub fn build(self) -> Result<ContentResolver, ContentError> {
        let WithProvider(source) = self.provider;
        let cache = match self.cache {
            CacheMode::Disabled => None,
            CacheMode::Custom(cache) => Some(cache),
            CacheMode::Default => Some(Arc::new(
                CacheProvider::new(Arc::clone(&source), CacheConfig::default())
                    .context("Building default cache")?,
            )),
            CacheMode::Config(config) => Some(Arc::new(
                CacheProvider::new(Arc::clone(&source), config).context("Building configured cache")?,
            )),
        };

        let fetcher: Arc<dyn DataProvider> = match &cache {
            Some(cache) => Arc::clone(cache) as Arc<dyn DataProvider>,
            None => Arc::clone(&source),
        };
        let templates = self.templates.unwrap_or_else(|| Arc::new(PathExpressionEngine));

        debug!(cached = cache.is_some(), "Content resolver built");
        Ok(ContentResolver { source, fetcher, cache, templates })
    }
}

/// Renders templates by fetching only the field groups they reference.
///
/// Per call: scan the template for `{{ group.path }}` expressions, fetch each distinct group
/// concurrently (first record of `select(group)`, else `get(group)`), then hand the assembled
/// [`TemplateContext`] to the expression engine. A failed fetch drops that group only.
///
/// # Example
/// ```rust
/// use forma_content::ContentResolver;
/// use forma_provider::MemoryProvider;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let memory = MemoryProvider::new();
/// memory.insert_collection("user", vec![json!({ "name": "Ann" })]);
///
/// let resolver = ContentResolver::builder().data_provider(Arc::new(memory)).build()?;
/// assert_eq!(resolver.resolve_template("Hi {{ user.name }}").await?, "Hi Ann");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ContentResolver {
    source: Arc<dyn DataProvider>,
    fetcher: Arc<dyn DataProvider>,
    cache: Option<Arc<CacheProvider>>,
    templates: Arc<dyn TemplateResolver>,
}

impl ContentResolver {
    #[must_use = "The builder must be configured before it can be used to build the resolver."]
    pub fn builder() -> ContentResolverBuilder {
        ContentResolverBuilder { provider: NoProvider, templates: None, cache: CacheMode::Default }
    }

    /// The uncached provider given to the builder.
    #[must_use]
    pub fn data_provider(&self) -> &Arc<dyn DataProvider> {
        &self.source
    }

    /// The cache fetches go through, unless caching is disabled.
    #[must_use]
    pub fn cache(&self) -> Option<&Arc<CacheProvider>> {
        self.cache.as_ref()
    }

    /// Resolves every expression in `template`.
    ///
    /// Templates without expression markers are returned unchanged and trigger no fetch.
    ///
    /// # Errors
    /// Returns the expression engine's [`ExpressionError`] unmodified. Fetch failures are
    /// logged and never surface here.
    #[instrument(skip(self, template), fields(len = template.len()))]
    pub async fn resolve_template(&self, template: &str) -> Result<String, ExpressionError> {
        if !has_expressions(template) {
            return Ok(template.to_owned());
        }
        let context = self.build_context(template).await;
        self.templates.resolve(template, &context)
    }

    /// Fetches the field groups referenced by `template` into a fresh context.
    pub async fn build_context(&self, template: &str) -> TemplateContext {
        self.fetch_groups(extract_field_groups(template)).await
    }

    /// Resolves every string inside `value` (a serialized element tree, for instance) against
    /// one context built from all the field groups the document references.
    ///
    /// # Errors
    /// Returns the first [`ExpressionError`] met in document order.
    #[instrument(skip_all)]
    pub async fn resolve_value(&self, value: &Value) -> Result<Value, ExpressionError> {
        let mut groups = Vec::new();
        collect_groups(value, &mut groups);
        if groups.is_empty() {
            return Ok(value.clone());
        }
        let context = self.fetch_groups(groups).await;
        self.render_value(value, &context)
    }

    fn render_value(&self, value: &Value, context: &TemplateContext) -> Result<Value, ExpressionError> {
        Ok(match value {
            Value::String(text) if has_expressions(text) => Value::String(self.templates.resolve(text, context)?),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.render_value(item, context)).collect::<Result<_, _>>()?)
            },
            Value::Object(object) => Value::Object(
                object
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), self.render_value(item, context)?)))
                    .collect::<Result<_, ExpressionError>>()?,
            ),
            other => other.clone(),
        })
    }

    async fn fetch_groups(&self, groups: Vec<String>) -> TemplateContext {
        debug!(?groups, "Fetching field groups");
        let records = join_all(groups.iter().map(|group| self.fetch_group(group))).await;
        groups
            .into_iter()
            .zip(records)
            .filter_map(|(group, record)| record.map(|record| (group, record)))
            .collect()
    }

    async fn fetch_group(&self, group: &str) -> Option<Value> {
        match self.fetcher.select(group, &SelectOptions::default()).await {
            Ok(selection) => {
                if let Some(first) = selection.into_first() {
                    return Some(first);
                }
            },
            Err(e) => {
                warn!(group, kind = e.kind(), error = %e, "Field group select failed, skipping");
                return None;
            },
        }

        match self.fetcher.get(group).await {
            Ok(lookup) => lookup.into_record(),
            Err(e) => {
                warn!(group, kind = e.kind(), error = %e, "Field group get failed, skipping");
                None
            },
        }
    }
}

fn collect_groups(value: &Value, groups: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            for group in extract_field_groups(text) {
                if !groups.contains(&group) {
                    groups.push(group);
                }
            }
        },
        Value::Array(items) => items.iter().for_each(|item| collect_groups(item, groups)),
        Value::Object(object) => object.values().for_each(|item| collect_groups(item, groups)),
        _ => {},
    }
}
