// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The command builder — assembles the argument vector for one target's
//! compile line. Grounded on `ccm.h`'s `ccm_spec_prepare_common_prefix` +
//! `ccm_spec_build_target`: compiler, common options, pre-options, output
//! flag, output path, sources, post-options. The builder never inspects or
//! shell-escapes any string; arguments reach `execvp` verbatim (Non-goal:
//! no shell semantics).

use ccm_core::{BuildSpec, Target};

/// A fully-assembled argument vector for one compile invocation. `argv[0]`
/// is the compiler program name, matching the POSIX `execvp` convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub argv: Vec<String>,
}

impl Command {
    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

/// Build the argument vector that compiles `target` under `spec`.
pub fn build_command(spec: &BuildSpec, target: &Target) -> Command {
    let mut argv = Vec::with_capacity(
        1 + spec.common_opts.len()
            + target.pre_opts.len()
            + 2
            + target.sources.len()
            + target.post_opts.len(),
    );

    argv.push(spec.compiler.clone());
    argv.extend(spec.common_opts.iter().cloned());
    argv.extend(target.pre_opts.iter().cloned());
    argv.push(spec.output_flag.clone());
    argv.push(target.output.to_string_lossy().into_owned());
    argv.extend(target.sources.iter().map(|p| p.to_string_lossy().into_owned()));
    argv.extend(target.post_opts.iter().cloned());

    Command { argv }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
