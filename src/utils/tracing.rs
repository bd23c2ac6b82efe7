use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::ENV_LOG_LEVEL;

pub fn init_standard_tracing(crate_name: &str) {
    let level = std::env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
    init_tracing_with_level(crate_name, &level);
}

pub fn init_tracing_with_level(crate_name: &str, level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{crate_name}={level},mongodb={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().event_format(tracing_subscriber::fmt::format()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installs_a_global_subscriber() {
        // Uses the explicit-level entry point: reading LOG_LEVEL here would
        // race the test that mutates the process environment, and no other
        // test installs a subscriber, so init cannot collide.
        init_tracing_with_level("vod_db", "info");
        tracing::info!("tracing initialized");
    }
}
