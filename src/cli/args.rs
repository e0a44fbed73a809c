//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::assets::AssetKind;
use crate::platform::Platform;

/// Companion - locate, provision and check the Python companion interpreter.
#[derive(Debug, Parser)]
#[command(name = "companion")]
#[command(author, version)]
#[command(about = "Locate, provision and check the Python companion interpreter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to an extra config file, applied over the user config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Resolve for this platform instead of the running one
    #[arg(long, global = true, value_enum)]
    pub platform: Option<Platform>,

    /// Application bundle directory (overrides config)
    #[arg(long, global = true)]
    pub bundle_dir: Option<PathBuf>,

    /// Per-user data directory (overrides config)
    #[arg(long, global = true)]
    pub user_data_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find a compatible Python 3 interpreter
    Locate(LocateArgs),

    /// Copy bundled assets to their runnable location
    Provision(ProvisionArgs),

    /// Show where assets are shipped and run from
    Paths,

    /// Run the dependency-check script and report missing modules
    Check(CheckArgs),
}

/// Arguments for the `locate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LocateArgs {
    /// Print the resolved interpreter as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `provision` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ProvisionArgs {
    /// Asset family to provision
    #[arg(long, value_enum, default_value_t = AssetKind::Scripts)]
    pub kind: AssetKind,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Run the check script from this directory and skip provisioning
    #[arg(long)]
    pub script_dir: Option<PathBuf>,
}
