//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use crate::env::Env;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Developer log overlay with a terminal log panel
#[derive(Parser, Debug, Default)]
#[command(name = "devlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: devlog.toml in the working directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Host name the application is served from (overrides config)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Simulate an environment (stored in preferences)
    #[arg(long, value_enum, value_name = "ENV")]
    pub env: Option<EnvArg>,

    /// Run without the TUI: emit the sample sequence and print entries
    #[arg(long)]
    pub headless: bool,

    /// In headless mode, print events as JSON lines
    #[arg(long, requires = "headless")]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvArg {
    Development,
    Production,
}

impl From<EnvArg> for Env {
    fn from(arg: EnvArg) -> Self {
        match arg {
            EnvArg::Development => Env::Development,
            EnvArg::Production => Env::Production,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
