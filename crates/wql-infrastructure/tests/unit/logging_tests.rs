//! Logging Tests

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use wql_infrastructure::config::ConfigLoader;
use wql_infrastructure::constants::DEFAULT_LOG_LEVEL;
use wql_infrastructure::logging::{
    LoggingConfig, init_logging, log_config_loaded, parse_log_level,
};

/// Counts every event it sees
struct EventCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for EventCounter {
    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_init_rejects_unknown_level() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_config_source_is_logged_only_when_asked() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wql.toml");
    fs::write(&path, "[warehouse]\nprovider = \"memory\"\n").unwrap();
    let loader = ConfigLoader::new().with_config_path(&path);

    let events = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(EventCounter(Arc::clone(&events)));
    tracing::subscriber::with_default(subscriber, || {
        loader.load().unwrap();
        assert_eq!(events.load(Ordering::SeqCst), 0);

        log_config_loaded(loader.source_path().as_deref());
        assert_eq!(events.load(Ordering::SeqCst), 1);
    });
}
