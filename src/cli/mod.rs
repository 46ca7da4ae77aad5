//! CLI module - Command-line interface for Watchlist
//!
//! Administrative commands are never exposed over HTTP.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Watchlist - a small movie watchlist web application
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (overrides the default search paths)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Create the database schema
    Initdb {
        /// Drop all tables before creating them
        #[arg(long)]
        drop: bool,
    },

    /// Insert demo data (one user and nine movies)
    Forge,

    /// Create the administrator account, or update its credentials
    Admin {
        /// Login username (prompted when omitted)
        #[arg(long)]
        username: Option<String>,
        /// Login password (prompted when omitted)
        #[arg(long, env = "WATCHLIST_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create default config file
    #[command(name = "init-config")]
    InitConfig,
}

pub use commands::*;
