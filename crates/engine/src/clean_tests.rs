// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ccm_core::Target;
use std::fs;
use tempfile::tempdir;

#[test]
fn removes_existing_outputs() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::write(&out, b"binary").unwrap();

    let mut b = BuildSpec::builder("cc");
    b.add_target(Target::new(&out));
    let spec = b.build();

    let report = clean(&spec);
    assert_eq!(report.removed, vec![out.clone()]);
    assert!(report.failed.is_empty());
    assert!(!out.exists());
}

#[test]
fn missing_output_is_not_a_failure() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never-built");

    let mut b = BuildSpec::builder("cc");
    b.add_target(Target::new(&out));
    let spec = b.build();

    let report = clean(&spec);
    assert!(report.removed.is_empty());
    assert!(report.failed.is_empty());
}

#[test]
fn does_not_traverse_dependencies() {
    let dir = tempdir().unwrap();
    let dep_out = dir.path().join("dep");
    let top_out = dir.path().join("top");
    fs::write(&dep_out, b"x").unwrap();
    fs::write(&top_out, b"y").unwrap();

    let mut b = BuildSpec::builder("cc");
    let dep = b.add_target(Target::new(&dep_out));
    b.add_target(Target::new(&top_out).with_deps([dep]));
    let spec = b.build();

    let report = clean(&spec);
    assert_eq!(report.removed.len(), 2);
    assert!(!dep_out.exists());
    assert!(!top_out.exists());
}
