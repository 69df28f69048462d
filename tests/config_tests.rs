// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashplan::config;

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let cfg = config::Config {
        server_url: Some("http://budget.local:9000".to_string()),
    };
    config::save_to(&path, &cfg).unwrap();

    let loaded = config::load_from(&path).unwrap();
    assert_eq!(
        loaded.server_url.as_deref(),
        Some("http://budget.local:9000")
    );
}

#[test]
fn missing_file_is_the_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = config::load_from(&dir.path().join("config.json")).unwrap();
    assert!(loaded.server_url.is_none());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(config::load_from(&path).is_err());
}

#[test]
fn explicit_flag_wins_resolution() {
    let url = config::resolve_server_url(Some("http://flagged:1234")).unwrap();
    assert_eq!(url, "http://flagged:1234");
}
