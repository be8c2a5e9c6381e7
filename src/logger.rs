//! Logging setup with a verbosity that can be changed after start-up.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
}

impl LogLevel {
    pub fn from_debug(debug: bool) -> Self {
        if debug { LogLevel::Debug } else { LogLevel::Info }
    }

    fn directive(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Handle for adjusting the global log filter.
///
/// When `RUST_LOG` is set it wins and [`Logger::set_level`] is a no-op.
#[derive(Clone)]
pub struct Logger {
    handle: Option<reload::Handle<EnvFilter, Registry>>,
}

impl Logger {
    /// Install the global subscriber. Starts at `info`.
    pub fn init() -> Self {
        let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
        let filter = if from_env {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(LogLevel::Info.directive())
        };

        let (filter, handle) = reload::Layer::new(filter);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();

        Self {
            handle: (!from_env).then_some(handle),
        }
    }

    /// A logger that never touches the global subscriber.
    pub fn detached() -> Self {
        Self { handle: None }
    }

    pub fn set_level(&self, level: LogLevel) {
        let Some(handle) = &self.handle else {
            return;
        };
        if let Err(err) = handle.reload(EnvFilter::new(level.directive())) {
            tracing::warn!(%err, "failed to change log level");
        }
    }
}
