//! Integration tests for logging system

use bridge_traits::logging::{ConsoleLogger, LogLevel};
use core_runtime::logging::{init_logging, strip_path, LogFormat, LoggingConfig};
use core_runtime::Error;
use std::sync::Arc;

#[test]
fn test_init_logging_only_once() {
    // The global subscriber can be installed once per process; this is the
    // only test in this binary that touches it.
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_logger_sink(Arc::new(ConsoleLogger {
            min_level: LogLevel::Warn,
        }));

    init_logging(config.clone()).expect("first initialization succeeds");
    tracing::info!(target: "core_playback::controller", "logging ready");

    let err = init_logging(config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_config_debug_hides_sink() {
    let config = LoggingConfig::default().with_logger_sink(Arc::new(ConsoleLogger::default()));
    let rendered = format!("{:?}", config);
    assert!(rendered.contains("logger_sink: true"));
}

#[test]
fn test_path_stripping() {
    // Android storage paths
    assert_eq!(strip_path("/storage/emulated/0/Music/song.mid"), "song.mid");
    assert_eq!(strip_path("/data/user/0/app/cache/track.mid"), "track.mid");

    // Windows paths
    assert_eq!(strip_path("C:\\Users\\John\\Music\\song.mid"), "song.mid");

    // Already basename
    assert_eq!(strip_path("song.mid"), "song.mid");

    // Edge cases
    assert_eq!(strip_path("/var/log/"), "");
    assert_eq!(strip_path(""), "");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    assert_eq!(LogFormat::default(), LogFormat::Pretty);

    #[cfg(not(debug_assertions))]
    assert_eq!(LogFormat::default(), LogFormat::Json);
}
