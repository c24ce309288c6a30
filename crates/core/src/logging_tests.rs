// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    none = { "none", LogLevel::None },
    info = { "info", LogLevel::Info },
    warn = { "warn", LogLevel::Warn },
    warning = { "warning", LogLevel::Warn },
    debug = { "debug", LogLevel::Debug },
    error = { "error", LogLevel::Error },
    upper = { "ERROR", LogLevel::Error },
)]
fn parses_known_levels(input: &str, expected: LogLevel) {
    assert_eq!(LogLevel::from_str(input).unwrap(), expected);
}

#[test]
fn rejects_unknown_level() {
    assert!(LogLevel::from_str("verbose").is_err());
}

#[test]
fn default_level_is_info() {
    assert_eq!(LogLevel::default(), LogLevel::Info);
}

#[test]
fn display_round_trips_through_from_str() {
    for level in [
        LogLevel::None,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Error,
    ] {
        assert_eq!(LogLevel::from_str(&level.to_string()).unwrap(), level);
    }
}

#[test]
fn init_with_none_does_not_panic() {
    init(LogLevel::None);
}
