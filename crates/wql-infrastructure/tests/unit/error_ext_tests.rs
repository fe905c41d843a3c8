//! Error Extension Tests

use std::io;

use wql_domain::error::{Error, Result};
use wql_infrastructure::error_ext::{ErrorContext, registry_error};

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "file not found")
}

#[test]
fn test_io_context() {
    let result: Result<()> = Err(not_found()).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_context() {
    let result: Result<()> = Err(not_found()).config_context("bad config");
    assert!(matches!(result, Err(Error::Configuration { source: Some(_), .. })));
}

#[test]
fn test_ok_passes_through() {
    let result: Result<u32> = Ok::<u32, io::Error>(7).config_context("unused");
    assert_eq!(result.unwrap(), 7);
}

#[test]
fn test_registry_error() {
    let error = registry_error("warehouse", "Unknown warehouse provider 'x'".to_string());
    assert!(matches!(error, Error::Configuration { source: None, .. }));
    assert!(error.to_string().contains("Unknown warehouse provider 'x'"));
}
