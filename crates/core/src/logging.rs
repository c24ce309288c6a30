// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging bootstrap. Grounded on `oj-daemon`'s `setup_logging` (an
//! `EnvFilter` layered onto a `tracing_subscriber` fmt layer), simplified
//! since ccm always logs to stderr rather than a rotated file.
//!
//! Maps the five-level contract from SPEC_FULL §4.J / §6 onto `tracing`:
//! `NONE` skips subscriber installation entirely (no bracketed prefixes at
//! all, matching the original `ccm_log`'s "NONE suppresses the bracketed
//! prefix").

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    None,
    Warn,
    #[default]
    Info,
    Debug,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "debug" => Ok(Self::Debug),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

impl LogLevel {
    fn filter_directive(self) -> &'static str {
        match self {
            Self::None => "off",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Error => "error",
        }
    }
}

/// Install a global `tracing_subscriber` fmt layer honoring `level`, unless
/// `level` is [`LogLevel::None`] in which case no subscriber is installed
/// and log calls are simply dropped by the no-op default dispatcher.
///
/// Safe to call at most once per process; a second call is a no-op (the
/// underlying `tracing` dispatcher refuses to be set twice).
pub fn init(level: LogLevel) {
    if level == LogLevel::None {
        return;
    }

    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("CCM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
