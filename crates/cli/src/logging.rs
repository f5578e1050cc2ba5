//! Diagnostics for the CLI: stderr, plus an optional log file.
//!
//! stdout carries command output (JSON records, documents), so nothing is
//! ever logged there.

use fencepost_core::config::LoggingConfig;
use std::fs::File;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Targets the configured level applies to. Dependencies stay at `warn`.
const TARGETS: [&str; 2] = ["fencepost", "fencepost_core"];

/// Install the subscriber.
///
/// The returned guard flushes the log file when dropped, so it must live
/// until the command has finished.
pub fn init(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(filter_for(&cfg.level));

    let registry = tracing_subscriber::registry().with(stderr_layer);

    let Some(ref path) = cfg.file else {
        registry.init();
        return None;
    };

    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to create log file {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(file);

    // Decode failures are reported at debug level with the parser's target.
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter_for(cfg.file_level.as_deref().unwrap_or(&cfg.level)));

    registry.with(file_layer).init();
    Some(guard)
}

/// `RUST_LOG` when set, otherwise the configured level for fencepost's targets.
fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(directives(parse_level(level).unwrap_or(LevelFilter::INFO)))
    })
}

fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let scoped: Vec<String> = TARGETS.iter().map(|target| format!("{target}={level}")).collect();
    format!("warn,{}", scoped.join(","))
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_case_insensitive() {
        assert_eq!(parse_level("off"), Some(LevelFilter::OFF));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("Debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn configured_level_is_scoped_to_fencepost() {
        assert_eq!(
            directives(LevelFilter::DEBUG),
            "warn,fencepost=debug,fencepost_core=debug"
        );
        assert_eq!(directives(LevelFilter::OFF), "warn,fencepost=off,fencepost_core=off");
    }
}
