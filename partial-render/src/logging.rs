//! Log setup for apps built on this crate.
//!
//! [`Logger::init`] sends `tracing` events to stderr. Requests are logged at `INFO`,
//! one line each. Every render is logged at `DEBUG` with its view name, mode and
//! trace id. Use `RUST_LOG=debug` to see renders, or `RUST_LOG=warn` to see only
//! captured render failures and bad configuration.
//!
//! Colours are used only when stderr is a terminal.
//!
//! ```rust
//! use partial_render::prelude::*;
//!
//! Logger::init();
//! Logger::init(); // no-op
//! ```
use crate::config::get_config;
use once_cell::sync::OnceCell;
use tracing_subscriber::{filter::LevelFilter, fmt, util::SubscriberInitExt, EnvFilter};

static LOGGER: OnceCell<()> = OnceCell::new();

pub struct Logger;

impl Logger {
    /// Install the subscriber and report where the configuration came from.
    ///
    /// Only the first call does anything. If a global subscriber is already
    /// installed, it's kept.
    pub fn init() {
        LOGGER.get_or_init(|| {
            let config = get_config();

            let filter = EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy();

            let _ = fmt()
                .with_env_filter(filter)
                .with_ansi(config.tty)
                .with_target(false)
                .finish()
                .try_init();

            config.log_info();
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_init_twice() {
        Logger::init();
        Logger::init();
        assert!(LOGGER.get().is_some());
    }
}
