use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kiln::config::ColorMode;

/// Kiln - image builder and runner for Python web services
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
#[command(after_help = "Run 'kiln init' to scaffold a new build definition.")]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Color output: auto, always, never
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an image from a build definition
    Build {
        /// Path to the build definition
        #[arg(short, long, default_value = "kiln.toml")]
        file: PathBuf,

        /// Tag override (wins over the definition's tag)
        #[arg(short, long)]
        tag: Option<String>,

        /// Image store root
        #[arg(long)]
        store: Option<PathBuf>,

        /// Package repository root
        #[arg(long)]
        repository: Option<PathBuf>,

        /// Install deadline in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,

        /// Resolve and validate without staging or promoting
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a built image in the foreground
    Run {
        /// Image reference (name:tag; tag defaults to latest)
        reference: String,

        /// KEY=VALUE environment override (repeatable)
        #[arg(short, long)]
        env: Vec<String>,

        /// Report when the exposed port first accepts a connection
        #[arg(long)]
        wait_port: bool,

        /// Startup window for --wait-port
        #[arg(long, value_name = "SECS", default_value_t = 30)]
        wait_timeout_secs: u64,

        /// Image store root
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Launch an image and fail unless its port accepts in time
    Smoke {
        /// Image reference (name:tag; tag defaults to latest)
        reference: String,

        /// Startup window in seconds
        #[arg(long, value_name = "SECS", default_value_t = 30)]
        timeout_secs: u64,

        /// KEY=VALUE environment override (repeatable)
        #[arg(short, long)]
        env: Vec<String>,

        /// Probe this port instead of the image's exposed port
        #[arg(long)]
        port: Option<u16>,

        /// Image store root
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Validate a build definition without building (CI friendly)
    Check {
        /// Path to the build definition
        #[arg(short, long, default_value = "kiln.toml")]
        file: PathBuf,

        /// Package repository root
        #[arg(long)]
        repository: Option<PathBuf>,

        /// Fail on warnings too (CI mode)
        #[arg(long)]
        strict_warnings: bool,
    },

    /// List built images
    Images {
        /// Image store root
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show one image's manifest
    Inspect {
        /// Image reference (name:tag; tag defaults to latest)
        reference: String,

        /// List every rootfs file with its digest
        #[arg(long)]
        files: bool,

        /// Image store root
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Compare two built images
    Diff {
        /// Older side of the comparison
        left: String,

        /// Newer side of the comparison
        right: String,

        /// Image store root
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Remove images from the store
    Clean {
        /// Image to remove (name:tag)
        reference: Option<String>,

        /// Remove every image
        #[arg(long, conflicts_with = "reference")]
        all: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Show what would be removed
        #[arg(long)]
        dry_run: bool,

        /// Image store root
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Copy a built image to a remote host (user@host:/path)
    Push {
        /// Image reference (name:tag; tag defaults to latest)
        reference: String,

        /// Remote destination (user@host:/path)
        destination: String,

        /// Transfer deadline in seconds
        #[arg(long, value_name = "SECS", default_value_t = 60)]
        timeout_secs: u64,

        /// Image store root
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Scaffold a new build definition
    Init {
        /// Project directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Template: minimal or standard
        #[arg(long, default_value = "minimal")]
        template: String,

        /// Overwrite an existing kiln.toml
        #[arg(long)]
        force: bool,
    },
}

/// Parse the `--color` flag value.
pub fn parse_color(value: &str) -> Option<ColorMode> {
    match value {
        "auto" => Some(ColorMode::Auto),
        "always" => Some(ColorMode::Always),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}
