// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ccm - a self-hosting parallel build orchestrator

mod commands;
mod exit_error;

use clap::{Parser, Subcommand};
use exit_error::ExitError;

#[derive(Parser)]
#[command(name = "ccm", version, about = "Self-hosting parallel build orchestrator")]
struct Cli {
    /// Log verbosity: none, info, warn, debug, error.
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap if needed, then build all declared targets.
    Build(commands::build::BuildArgs),
    /// Remove each declared target's output path.
    Clean(commands::clean::CleanArgs),
}

fn main() {
    let cli = Cli::parse();

    let level: ccm_core::logging::LogLevel = cli.log_level.parse().unwrap_or_default();
    ccm_core::logging::init(level);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            let code = e.downcast_ref::<ExitError>().map_or(1, |c| c.code);
            if !e.to_string().is_empty() {
                eprintln!("ccm: {e:#}");
            }
            code
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let original_argv: Vec<String> = std::env::args().collect();

    match cli.command {
        Some(Commands::Build(args)) => commands::build::run(args, &original_argv),
        Some(Commands::Clean(args)) => commands::clean::run(args),
        None => {
            eprintln!("usage: ccm <build|clean>");
            Ok(1)
        }
    }
}
