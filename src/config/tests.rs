// OpenConfig tests

use super::*;

#[test]
fn test_open_config_defaults() {
    let config = OpenConfig::default();
    assert_eq!(config.mode, OpenMode::Read);
    assert_eq!(config.buffer_size, 0);
    assert_eq!(config.replication, 0);
    assert_eq!(config.block_size, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_open_config_builder() {
    let config = OpenConfig::write()
        .buffer_size(4096)
        .replication(3)
        .block_size(128 * 1024 * 1024);

    assert_eq!(config.mode, OpenMode::Write);
    assert_eq!(config.buffer_size, 4096);
    assert_eq!(config.replication, 3);
    assert_eq!(config.block_size, 128 * 1024 * 1024);
}

#[test]
fn test_open_mode_access() {
    assert!(OpenMode::Read.is_readable());
    assert!(!OpenMode::Read.is_writable());
    assert!(OpenMode::Write.is_writable());
    assert!(OpenMode::Append.is_writable());
    assert!(!OpenMode::Append.is_readable());
}

#[test]
fn test_open_config_from_json() {
    let config = OpenConfig::from_json(r#"{"mode": "a", "replication": 2}"#).unwrap();
    assert_eq!(config.mode, OpenMode::Append);
    assert_eq!(config.replication, 2);
    assert_eq!(config.buffer_size, 0);

    let json = config.to_json().unwrap();
    assert!(json.contains(r#""mode":"a""#));
}

#[test]
fn test_open_config_rejects_bad_json() {
    let result = OpenConfig::from_json(r#"{"mode": "rw"}"#);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_open_config_rejects_negative_sizes() {
    let result = OpenConfig::from_json(r#"{"buffer_size": -1}"#);
    assert!(matches!(result, Err(ConfigError::InvalidArgument(_))));

    let err = OpenConfig::read().block_size(-4).validate().unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: block_size must not be negative, got -4");
}
