// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ccm_core::Target;
use std::fs::File;
use std::io::Write;
use std::thread::sleep;
use std::time::Duration;

fn touch(path: &Path) {
    File::create(path).unwrap().flush().unwrap();
}

#[test]
fn missing_output_needs_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a.c");
    touch(&src);

    let target = Target::new(dir.path().join("out")).with_sources([src]);
    assert!(needs_rebuild(&target));
}

#[test]
fn output_newer_than_source_is_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a.c");
    let out = dir.path().join("out");
    touch(&src);
    sleep(Duration::from_millis(10));
    touch(&out);

    let target = Target::new(out).with_sources([src]);
    assert!(!needs_rebuild(&target));
}

#[test]
fn source_newer_than_output_needs_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a.c");
    let out = dir.path().join("out");
    touch(&out);
    sleep(Duration::from_millis(10));
    touch(&src);

    let target = Target::new(out).with_sources([src]);
    assert!(needs_rebuild(&target));
}

#[test]
fn watch_path_newer_than_output_needs_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a.c");
    let watched = dir.path().join("a.h");
    let out = dir.path().join("out");
    touch(&src);
    touch(&out);
    sleep(Duration::from_millis(10));
    touch(&watched);

    let target = Target::new(out).with_sources([src]).with_watch([watched]);
    assert!(needs_rebuild(&target));
}

#[test]
fn missing_source_is_ignored_for_freshness() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    touch(&out);

    let target = Target::new(out).with_sources([dir.path().join("missing.c")]);
    assert!(!needs_rebuild(&target));
}
