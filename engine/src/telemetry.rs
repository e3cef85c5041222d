//! Telemetry and Observability
//!
//! Sets up `tracing-subscriber`. Sara's own crates and the HTTP trace layer
//! log at the configured level; the HTTP client stack stays at `warn` so a
//! `debug` run is not drowned in connection-pool noise. `RUST_LOG` replaces
//! the whole filter when set.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Targets that follow the configured level
const SARA_TARGETS: [&str; 3] = ["sara_engine", "sdk", "tower_http"];

/// Dependency targets pinned to `warn`
const QUIET_TARGETS: [&str; 3] = ["hyper", "reqwest", "h2"];

/// Output format (`[core] log_format`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Pretty in debug builds, JSON in release builds
    #[default]
    Auto,
    Pretty,
    Json,
}

impl LogFormat {
    /// Collapse `Auto` for the current build
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto if cfg!(debug_assertions) => Self::Pretty,
            Self::Auto => Self::Json,
            other => other,
        }
    }
}

/// Filter directives used when `RUST_LOG` is unset
pub fn default_filter(log_level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(SARA_TARGETS.iter().map(|t| format!("{}={}", t, log_level)));
    directives.extend(QUIET_TARGETS.iter().map(|t| format!("{}=warn", t)));
    directives.join(",")
}

/// Install the global subscriber.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init_telemetry(log_level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    let registry = tracing_subscriber::registry().with(env_filter);

    match format.resolve() {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .ok(),
        _ => registry
            .with(fmt::layer().pretty().with_target(false))
            .try_init()
            .ok(),
    };
}
