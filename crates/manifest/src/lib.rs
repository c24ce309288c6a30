// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Loads a `ccm.toml` manifest into a [`BuildSpec`], as an alternative to
//! constructing one programmatically via `BuildSpecBuilder`. Grounded on
//! `oj-runbook`'s parse/validate split (`parser.rs` deserializes, `find.rs`
//! resolves string references after the full file is in memory) — here
//! collapsed into one module since the schema is a single file rather than
//! a directory of cross-referencing runbooks.

use ccm_core::{BuildSpec, BuildSpecBuilder, Target, TargetId};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything a `ccm.toml` file can declare: the target graph plus an
/// optional self-rebuild description (§4.G/§4.I).
#[derive(Debug)]
pub struct Manifest {
    pub spec: BuildSpec,
    pub bootstrap: Option<BootstrapTargets>,
}

/// The `[bootstrap]` table, resolved to owned paths. Absent unless the
/// manifest opts into self-rebuild.
#[derive(Debug, Clone)]
pub struct BootstrapTargets {
    pub compiler: String,
    /// Defaults to the running executable's own path when unset.
    pub output: Option<PathBuf>,
    pub sources: Vec<PathBuf>,
    pub watch: Vec<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("target '{target}' depends on unknown target '{dep}'")]
    UnresolvedDependency { target: String, dep: String },

    #[error("target '{0}' is declared more than once")]
    DuplicateTarget(String),
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    spec: SpecSection,
    #[serde(rename = "target", default)]
    targets: Vec<TargetSection>,
    bootstrap: Option<BootstrapSection>,
}

#[derive(Debug, Deserialize)]
struct BootstrapSection {
    compiler: String,
    output: Option<String>,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    watch: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SpecSection {
    compiler: String,
    output_flag: Option<String>,
    #[serde(default)]
    common_opts: Vec<String>,
    jobs: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TargetSection {
    output: String,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    watch: Vec<String>,
    #[serde(default)]
    pre_opts: Vec<String>,
    #[serde(default)]
    post_opts: Vec<String>,
    /// Dependency output paths, resolved to [`TargetId`]s after every
    /// target in the file has been registered.
    #[serde(default)]
    deps: Vec<String>,
}

/// Read and parse `path` into a [`Manifest`].
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&text, path)
}

fn parse(text: &str, path: &Path) -> Result<Manifest, ManifestError> {
    let file: ManifestFile = toml::from_str(text).map_err(|source| ManifestError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let mut builder: BuildSpecBuilder = BuildSpec::builder(file.spec.compiler);
    if let Some(flag) = file.spec.output_flag {
        builder = builder.output_flag(flag);
    }
    builder = builder.common_opts(file.spec.common_opts);
    if let Some(jobs) = file.spec.jobs {
        builder = builder.jobs(jobs);
    }

    let mut ids_by_output: HashMap<String, TargetId> = HashMap::with_capacity(file.targets.len());
    for section in &file.targets {
        if ids_by_output.contains_key(&section.output) {
            return Err(ManifestError::DuplicateTarget(section.output.clone()));
        }
        let id = builder.add_target(
            Target::new(&section.output)
                .with_sources(section.sources.clone())
                .with_watch(section.watch.clone())
                .with_pre_opts(section.pre_opts.clone())
                .with_post_opts(section.post_opts.clone()),
        );
        ids_by_output.insert(section.output.clone(), id);
    }

    for section in &file.targets {
        let id = ids_by_output[&section.output];
        for dep_name in &section.deps {
            let dep_id = ids_by_output
                .get(dep_name)
                .ok_or_else(|| ManifestError::UnresolvedDependency {
                    target: section.output.clone(),
                    dep: dep_name.clone(),
                })?;
            builder.targets_mut()[id.index()].deps.push(*dep_id);
        }
    }

    let bootstrap = file.bootstrap.map(|b| BootstrapTargets {
        compiler: b.compiler,
        output: b.output.map(PathBuf::from),
        sources: b.sources.into_iter().map(PathBuf::from).collect(),
        watch: b.watch.into_iter().map(PathBuf::from).collect(),
    });

    Ok(Manifest {
        spec: builder.build(),
        bootstrap,
    })
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
