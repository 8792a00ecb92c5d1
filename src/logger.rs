//! Log output for the front end.
//!
//! The library only emits `tracing` events; nothing is printed until the
//! embedding program installs a subscriber, e.g.
//!
//! ```rust
//! use texel::logger::{self, LogLevel};
//!
//! logger::init_with_level(LogLevel::Debug);
//! let compiled = texel::compile("fn main(): void { }", None);
//! assert!(compiled.is_ok());
//! ```

use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn layer(level: LogLevel) -> impl Layer<Registry> {
    tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(LevelFilter::from_level(level.into()))
}

/// Installs a global `[LEVEL] message` subscriber. Does nothing when a
/// global subscriber is already set.
pub fn init_with_level(level: LogLevel) {
    let _ = Registry::default().with(layer(level)).try_init();
}

/// Trace-level output for tests; repeated calls are harmless.
pub fn try_init_for_tests() {
    let _ = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_test_writer()
                .with_filter(LevelFilter::TRACE),
        )
        .try_init();
}
