//! Logger setup for the CLI (env_logger on stderr) and the browser (console_log).
//!
//! The CLI prints the puzzle itself on stdout, so by default only warnings
//! (generator misbehaviour, mismatched crossings) reach stderr.

/// Environment variable that turns on debug logging for the CLI.
/// Any value except empty, `0` or `false` enables it.
pub const DEBUG_ENV_VAR: &str = "CROSSWORD_DEBUG";

/// Initialize logging for the crossword composer.
///
/// - **Native:** `Warn` for this crate, `Debug` when `debug_enabled`.
///   `RUST_LOG` replaces both when set.
/// - **WASM:** `Info` in the browser console, `Debug` when `debug_enabled`.
///
/// A second call leaves the first logger in place.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = if debug_enabled { log::Level::Debug } else { log::Level::Info };
        if let Err(e) = console_log::init_with_level(level) {
            web_sys::console::error_1(&format!("crossword: console logging unavailable: {e}").into());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = if debug_enabled { log::LevelFilter::Debug } else { log::LevelFilter::Warn };

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, log::LevelFilter::Warn)
            .filter_module(env!("CARGO_CRATE_NAME"), level)
            .format_timestamp(None)
            .format_target(false);
        if let Ok(filters) = std::env::var(env_logger::DEFAULT_FILTER_ENV) {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("debug logging enabled");
        }
    }
}

/// Whether [`DEBUG_ENV_VAR`] asks for debug output (native builds only).
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn debug_requested() -> bool {
    std::env::var(DEBUG_ENV_VAR).is_ok_and(|v| env_flag_enabled(&v))
}

#[cfg(not(target_arch = "wasm32"))]
fn env_flag_enabled(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
