//! Tests for loading configuration from disk.

use peer_sync::{SyncConfig, SyncCoordinator, LocalBus};
use peer_tictactoe::Marker;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
local_id = "A"
peer_id = "B"
board_size = 4
first_marker = "X"
tick_hz = 20
"#
    )
    .unwrap();

    let config = SyncConfig::from_file(file.path()).unwrap();
    assert_eq!(config.local_id(), "A");
    assert_eq!(config.peer_id(), "B");
    assert_eq!(*config.board_size(), 4);
    assert_eq!(*config.first_marker(), Marker::X);
    assert_eq!(config.tick_period(), Duration::from_millis(50));

    let coordinator = SyncCoordinator::new(&config, LocalBus::default()).unwrap();
    assert_eq!(coordinator.engine().board_size(), 4);
    assert_eq!(coordinator.engine().current_marker(), Marker::X);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SyncConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "board_size = \"big\"").unwrap();

    let err = SyncConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_small_board_is_clamped() {
    let config = SyncConfig::from_toml_str("board_size = 1").unwrap();
    let coordinator = SyncCoordinator::new(&config, LocalBus::default()).unwrap();
    assert_eq!(coordinator.engine().board_size(), 2);
}

#[test]
fn test_oversized_board_is_an_error() {
    let err = SyncConfig::from_toml_str("board_size = 8589934592").unwrap_err();
    assert!(err.message.contains("exceeds the maximum"));

    let config = SyncConfig::new("A", "B").with_board_size(usize::MAX);
    assert!(config.validate().is_err());
    assert!(SyncCoordinator::new(&config, LocalBus::default()).is_err());
}
