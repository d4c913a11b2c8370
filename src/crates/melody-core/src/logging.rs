//! Logging bootstrap shared by both binaries.
//!
//! Diagnostics go to stderr through the `log` facade so they never mix with
//! the prompts and results printed on stdout. `RUST_LOG`, when set, wins over
//! the level passed on the command line.

use flexi_logger::{Logger, LoggerHandle};

/// Start the stderr logger at `level`.
///
/// Keep the returned handle alive for the life of the process.
///
/// # Errors
/// - Returns an error when `level` is not one of trace|debug|info|warn|error.
/// - Returns an error when the logger backend fails to start.
pub fn init(level: &str) -> Result<LoggerHandle, String> {
    let level = normalize_level(level)?;

    let handle = Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    log::debug!("logging started at level {}", level);
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}
