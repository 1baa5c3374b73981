//! Kiln CLI - image builder and runner for Python web services
//!
//! Usage: kiln <COMMAND>
//!
//! Commands:
//!   build    Build an image from a build definition
//!   run      Run a built image in the foreground
//!   smoke    Launch an image and fail unless its port accepts in time
//!   check    Validate a build definition without building
//!   images   List built images
//!   inspect  Show one image's manifest
//!   diff     Compare two built images
//!   clean    Remove images from the store
//!   push     Copy a built image to a remote host
//!   init     Scaffold a new build definition

mod cli;
mod commands;
mod ui;

use anyhow::{bail, Result};
use clap::Parser;

use kiln::config::ColorMode;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let color = match cli.color.as_deref() {
        Some(value) => match cli::parse_color(value) {
            Some(mode) => Some(mode),
            None => bail!("invalid --color '{}' (expected auto, always or never)", value),
        },
        None => None,
    };

    dispatch(cli, color)
}

fn dispatch(cli: Cli, color: Option<ColorMode>) -> Result<()> {
    let json = cli.json;
    let verbose = cli.verbose;

    match cli.command {
        Commands::Build {
            file,
            tag,
            store,
            repository,
            timeout_secs,
            dry_run,
        } => commands::build::cmd_build(
            file,
            tag,
            store,
            repository,
            timeout_secs,
            dry_run,
            json,
            verbose,
            color,
        ),
        Commands::Run {
            reference,
            env,
            wait_port,
            wait_timeout_secs,
            store,
        } => commands::run::cmd_run(
            reference,
            env,
            wait_port,
            wait_timeout_secs,
            store,
            json,
            verbose,
            color,
        ),
        Commands::Smoke {
            reference,
            timeout_secs,
            env,
            port,
            store,
        } => commands::smoke::cmd_smoke(
            reference,
            timeout_secs,
            env,
            port,
            store,
            json,
            verbose,
            color,
        ),
        Commands::Check {
            file,
            repository,
            strict_warnings,
        } => commands::check::cmd_check(file, repository, strict_warnings, json, verbose, color),
        Commands::Images { store } => commands::images::cmd_images(store, json, verbose, color),
        Commands::Inspect {
            reference,
            files,
            store,
        } => commands::inspect::cmd_inspect(reference, files, store, json, verbose, color),
        Commands::Diff { left, right, store } => {
            commands::diff::cmd_diff(left, right, store, json, verbose, color)
        }
        Commands::Clean {
            reference,
            all,
            yes,
            dry_run,
            store,
        } => commands::clean::cmd_clean(reference, all, yes, dry_run, store, json, verbose, color),
        Commands::Push {
            reference,
            destination,
            timeout_secs,
            store,
        } => commands::push::cmd_push(
            reference,
            destination,
            timeout_secs,
            store,
            json,
            verbose,
            color,
        ),
        Commands::Init {
            dir,
            template,
            force,
        } => commands::init::cmd_init(&dir, &template, force, json, verbose, color),
    }
}
