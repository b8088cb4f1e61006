//! Service logger
//!
//! One logger is shared by the whole process. It is built on first access
//! with the options of that call; later options are ignored until
//! [`reset_logger`] drops it.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::Level;

/// Default logger name
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

static LOGGER: Mutex<Option<Arc<Logger>>> = Mutex::new(None);

/// What the service utilities need from a logger.
pub trait Log: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
}

/// Options applied when the shared logger is built
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub name: String,
    /// Most verbose level emitted
    pub level: Level,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            name: PACKAGE_NAME.to_string(),
            level: Level::DEBUG,
        }
    }
}

/// Logger emitting `tracing` events tagged with its name.
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: Level,
}

impl Logger {
    /// Build a logger, installing a stdout subscriber if none is set yet.
    pub fn new(options: LoggerOptions) -> Self {
        install_subscriber(options.level);
        Self {
            name: options.name,
            level: options.level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether events at `level` pass this logger's level
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    pub fn warn(&self, message: &str) {
        if self.enabled(Level::WARN) {
            tracing::warn!(logger = %self.name, "{}", message);
        }
    }

    pub fn error(&self, message: &str) {
        if self.enabled(Level::ERROR) {
            tracing::error!(logger = %self.name, "{}", message);
        }
    }
}

impl Log for Logger {
    fn debug(&self, message: &str) {
        if self.enabled(Level::DEBUG) {
            tracing::debug!(logger = %self.name, "{}", message);
        }
    }

    fn info(&self, message: &str) {
        if self.enabled(Level::INFO) {
            tracing::info!(logger = %self.name, "{}", message);
        }
    }
}

/// The shared logger, built with `options` if it does not exist yet.
pub fn get_logger(options: Option<LoggerOptions>) -> Arc<Logger> {
    let mut logger = LOGGER.lock();
    logger
        .get_or_insert_with(|| Arc::new(Logger::new(options.unwrap_or_default())))
        .clone()
}

/// Drop the shared logger so the next [`get_logger`] builds a new one.
pub fn reset_logger() {
    LOGGER.lock().take();
}

fn install_subscriber(level: Level) {
    // Fails when the host already installed a subscriber, which then wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.as_str().to_lowercase().into()),
        )
        .with_writer(std::io::stdout)
        .try_init();
}
