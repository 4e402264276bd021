//! Tracing subscriber setup

use lockdown_core::AgentConfig;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Safe to call more than once; later
/// calls leave the first subscriber in place and return `false`.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Install a formatting subscriber using the agent's configured `log_filter`
pub fn init_logging_from(config: &AgentConfig) -> bool {
    init_logging(&config.log_filter)
}
