// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A downcastable marker so `main` can recover a specific process exit code
//! from an `anyhow::Error` chain. Grounded on `oj`'s `exit_error.rs`.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
}

impl fmt::Display for ExitError {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl std::error::Error for ExitError {}
