// Environment detection and logger configuration.

use std::sync::OnceLock;

/// Cached environment mode.
static ENV_MODE: OnceLock<EnvMode> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    Production,
    Development,
    Test,
}

/// Detect the current environment mode from environment variables.
/// Checks `AUTHGATE_ENV` then `RUST_ENV` in order.
pub fn detect_env_mode() -> EnvMode {
    *ENV_MODE.get_or_init(|| {
        let env_val = std::env::var("AUTHGATE_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default()
            .to_lowercase();

        match env_val.as_str() {
            "production" | "prod" => EnvMode::Production,
            "test" | "testing" => EnvMode::Test,
            _ => EnvMode::Development,
        }
    })
}

pub fn is_production() -> bool {
    detect_env_mode() == EnvMode::Production
}

/// Initialize the `tracing` subscriber with appropriate defaults.
pub fn init_logger() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production() {
            EnvFilter::new("authgate=info")
        } else {
            EnvFilter::new("authgate=debug")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();
}
