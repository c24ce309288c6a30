// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn removes_declared_outputs_and_exits_zero() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::write(&out, b"stale").unwrap();
    let manifest = dir.path().join("ccm.toml");
    fs::write(
        &manifest,
        format!(
            r#"
            [spec]
            compiler = "cc"

            [[target]]
            output = "{out}"
            "#,
            out = out.display(),
        ),
    )
    .unwrap();

    let code = run(CleanArgs { manifest }).unwrap();
    assert_eq!(code, 0);
    assert!(!out.exists());
}

#[test]
fn missing_manifest_is_an_error() {
    let args = CleanArgs {
        manifest: PathBuf::from("/no/such/ccm.toml"),
    };
    assert!(run(args).is_err());
}
