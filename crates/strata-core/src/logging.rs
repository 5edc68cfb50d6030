//! Logging setup based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "trace,winit=info,calloop=info,egui=info";

/// Installs the global fmt subscriber with the default filter.
///
/// `RUST_LOG` takes precedence over the default when present. Calling this more
/// than once is harmless: later calls leave the installed subscriber in place.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Installs the global fmt subscriber, falling back to `filter` when `RUST_LOG`
/// is not set.
pub fn init_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::trace!("tracing subscriber already installed");
    }
}

/// Logs an error and aborts the current thread when `cond` is false.
///
/// Reserved for broken structural invariants that the rest of the engine
/// assumes hold, such as a second live application instance.
///
/// ```should_panic
/// strata_core::strata_assert!(1 + 1 == 3, "arithmetic is broken: {}", 42);
/// ```
#[macro_export]
macro_rules! strata_assert {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            let message = ::std::format!($($arg)+);
            ::tracing::error!("assertion failed: {}", message);
            ::std::panic!("{}", message);
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_is_idempotent() {
        super::init();
        super::init_with_filter("info");
    }

    #[test]
    fn test_assert_passes_when_true() {
        strata_assert!(true, "never shown");
    }

    #[test]
    #[should_panic(expected = "layer stack corrupted: 3")]
    fn test_assert_panics_with_message() {
        strata_assert!(false, "layer stack corrupted: {}", 3);
    }
}
