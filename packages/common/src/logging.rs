//! Logging initialisation
//!
//! All crates log through the `log` facade; the binary installs `env_logger`
//! once at startup. Logs go to stderr so that stdout only ever carries
//! command output (tokens, JSON documents, `signature OK`).
//!
//! Levels can be overridden with `RUST_LOG`:
//! - `RUST_LOG=debug` - everything, including loader format attempts
//! - `RUST_LOG=jose_jwk=debug` - only the key material loader

use std::sync::Once;

use env_logger::Env;
use log::debug;

static INIT_LOGGER: Once = Once::new();

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Initialize logging (should be called once at application startup)
///
/// Later calls are no-ops.
pub fn init(verbose: bool) {
    INIT_LOGGER.call_once(|| {
        let filter = default_filter(verbose);
        env_logger::Builder::from_env(Env::default().default_filter_or(filter))
            .format_timestamp(None)
            .format_target(false)
            .init();

        debug!("logging initialized (default filter: {filter})");
    });
}

/// Initialize logging for test environments
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_default_level() {
        assert_eq!(default_filter(false), "warn");
        assert_eq!(default_filter(true), "debug");
    }

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_test();
        init_test();
        log::warn!("logged from test");
    }
}
