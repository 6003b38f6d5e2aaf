//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::links::LocatorKind;

/// course-portal - weekly course content with GitHub / Google Drive resources
#[derive(Parser)]
#[command(name = "course-portal")]
#[command(version)]
#[command(about = "Course portfolio backend: weeks, resource links and a public listing", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage staff accounts
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Resolve a Drive link/ID or GitHub file URL and print its links
    Resolve {
        /// Sharing URL, bare Drive ID or GitHub file URL
        input: String,

        /// drive or github (default: portal.locator_kind from config)
        #[arg(long)]
        kind: Option<LocatorKind>,
    },
}

/// Staff account commands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a staff account
    Add {
        email: String,

        /// Password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,

        /// Read password from stdin (for scripting)
        #[arg(long, conflicts_with = "password")]
        stdin: bool,
    },

    /// Change a staff account's password
    Passwd {
        email: String,

        #[arg(long)]
        password: Option<String>,

        #[arg(long, conflicts_with = "password")]
        stdin: bool,
    },

    /// List staff accounts
    List,

    /// Remove a staff account
    Remove { email: String },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
