//! # Logger
//!
//! Installs the process-wide `tracing` subscriber used by Forma applications.
//! Console output, rolling log files (non-blocking) and JSON formatting can be combined;
//! `RUST_LOG` directives are honoured on top of the configured default level.
//!
//! The builder can be driven programmatically or from the serde-loaded
//! [`LogSettings`](forma_domain::config::LogSettings) via [`Logger::from_settings`].
//!
//! ## Example
//!
//! ```rust
//! # use forma_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("forma-doc")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use forma_domain::config::LogSettings;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    stderr: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            stderr: false,
            directory: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl private::Sealed for NoName {}
impl private::Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
///
/// A name is mandatory before [`LoggerBuilder::init`] becomes available; it prefixes
/// rolling log files (`<name>.<date>.log`).
#[derive(Debug)]
pub struct LoggerBuilder<N: private::Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name of the logger.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { config: self.config, name: WithName(name.into()) }
    }
}

impl<N: private::Sealed> LoggerBuilder<N> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `forma_provider=debug`).
    ///
    /// `RUST_LOG` is ignored when an explicit filter is set.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables or disables console logging.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Sends console output to stderr instead of stdout.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn stderr(mut self, enabled: bool) -> Self {
        self.config.stderr = enabled;
        self
    }

    /// Writes rolling log files into `directory` (created on init).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = Some(directory.into());
        self
    }

    /// Configures the log file rotation strategy.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Configures the maximum number of rolled files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Formats file output as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }
}

impl LoggerBuilder<WithName> {
    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. It owns the [`WorkerGuard`] of the file writer; keep it alive
    /// for the duration of the program so buffered lines are flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_config(&self.config, &self.name.0)?;

        let env_filter = build_env_filter(&self.config)?;
        let mut layers = Vec::new();

        if self.config.console {
            let console = layer().compact();
            layers.push(match (self.config.stderr, self.config.json) {
                (false, false) => console.with_ansi(true).boxed(),
                (false, true) => console.json().boxed(),
                (true, false) => console.with_writer(std::io::stderr).with_ansi(true).boxed(),
                (true, true) => console.with_writer(std::io::stderr).json().boxed(),
            });
        }

        let guard = match self.config.directory {
            Some(directory) => {
                fs::create_dir_all(&directory).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Failed to create path: {}", directory.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(self.config.rotation)
                    .filename_prefix(&self.name.0)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(self.config.max_files)
                    .build(directory)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(if self.config.json { file.json().boxed() } else { file.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    /// Maps loaded [`LogSettings`] onto a named builder.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] if `settings.level` is not a level name.
    pub fn from_settings(
        name: impl Into<String>,
        settings: &LogSettings,
    ) -> Result<LoggerBuilder<WithName>, LoggerError> {
        let mut builder = Self::builder()
            .name(name)
            .level(parse_level(&settings.level)?)
            .console(settings.console)
            .json(settings.json);
        if let Some(directory) = &settings.directory {
            builder = builder.directory(directory);
        }
        if let Some(filter) = &settings.filter {
            builder = builder.env_filter(filter);
        }
        Ok(builder)
    }

    /// Returns `true` when file output is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

/// Parses `trace`/`debug`/`info`/`warn`/`error`/`off` (case-insensitive).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for anything else.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid log level '{level}': {e}").into(),
        context: None,
    })
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.directory.is_some() && config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}
