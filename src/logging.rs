use flexi_logger::{LogSpecification, Logger, LoggerHandle};

use crate::errors::BookError;

pub const DEFAULT_LEVEL: &str = "warn";

/// `--debug` wins over the configured level.
pub fn effective_level(debug: bool, configured: &str) -> &str {
    if debug {
        "debug"
    } else {
        configured
    }
}

/// Starts stderr logging. `RUST_LOG` takes precedence over `level`.
///
/// Keep the returned handle alive for as long as logging is needed.
pub fn init_logging(level: &str) -> Result<LoggerHandle, BookError> {
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()?;
    log::debug!(
        "event=app_start platform={} version={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

/// Switches a running logger to `level`, again deferring to `RUST_LOG`.
pub fn apply_level(handle: &LoggerHandle, level: &str) -> Result<(), BookError> {
    handle.set_new_spec(LogSpecification::env_or_parse(level)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::*;

    #[test]
    fn debug_flag_overrides_configured_level() {
        assert_eq!(effective_level(true, "warn"), "debug");
        assert_eq!(effective_level(false, "info"), "info");
        assert_eq!(effective_level(false, DEFAULT_LEVEL), "warn");
    }

    // the global logger can only be started once per process, so this is the
    // only test that starts it
    #[test]
    fn logger_starts_and_follows_level_changes() {
        let rust_log_set = std::env::var_os("RUST_LOG").is_some();
        let handle = init_logging(effective_level(true, DEFAULT_LEVEL)).unwrap();
        if !rust_log_set {
            assert_eq!(log::max_level(), LevelFilter::Debug);
        }

        apply_level(&handle, "info").unwrap();
        if !rust_log_set {
            assert_eq!(log::max_level(), LevelFilter::Info);
        }
        log::info!("logger test event");
    }
}
