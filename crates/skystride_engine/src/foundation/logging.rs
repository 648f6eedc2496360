//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize logging with a default level filter.
///
/// `RUST_LOG`, when set, still wins. Calling this twice is harmless; the
/// second call keeps the first logger.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
